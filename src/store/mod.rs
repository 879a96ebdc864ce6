pub(crate) mod job;
pub(crate) mod observer;
pub(crate) mod patch;
pub(crate) mod timeline;
