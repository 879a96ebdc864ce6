pub(crate) mod evaluator;
pub(crate) mod filter;
pub(crate) mod fingerprint;
pub(crate) mod transitions;
