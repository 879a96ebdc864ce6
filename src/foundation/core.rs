use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Fresh random (v4 UUID) identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a [`crate::Track`].
    TrackId
);
string_id!(
    /// Identifier of a [`crate::Clip`].
    ClipId
);
string_id!(
    /// Identifier of an external render job.
    JobId
);

/// Format a frame count as `MM:SS:FF` at the given frame rate.
///
/// A zero `fps` is treated as 30, the editor default.
pub fn format_timecode(frame: u64, fps: u32) -> String {
    let fps = if fps == 0 { 30 } else { u64::from(fps) };
    let seconds = frame / fps;
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;
    let remaining_frames = frame % fps;
    format!("{minutes:02}:{remaining_seconds:02}:{remaining_frames:02}")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
