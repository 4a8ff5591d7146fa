use thiserror::Error;

/// Error types for skeleton loading and animation playback
#[derive(Error, Debug)]
pub enum AnimError {
    /// A bone references a parent that is not an earlier bone
    #[error("Malformed skeleton: bone {bone} has parent index {parent}")]
    MalformedSkeleton { bone: usize, parent: i32 },

    /// The skeleton does not fit in the fixed-size skinning palette
    #[error("Skeleton has {count} bones, the skinning palette holds at most {max}")]
    TooManyBones { count: usize, max: usize },

    /// No clip with this name exists in the animation set
    #[error("Unknown animation clip: '{0}'")]
    UnknownClip(String),

    /// A clip with this name was already added to the animation set
    #[error("Duplicate animation clip: '{0}'")]
    DuplicateClip(String),

    /// No bone with this name exists in the skeleton
    #[error("Unknown bone: '{0}'")]
    UnknownBone(String),

    /// Bone index past the end of the skeleton
    #[error("Bone index {index} out of range (skeleton has {count} bones)")]
    BoneIndexOutOfRange { index: usize, count: usize },

    /// Clip data that cannot be played back
    #[error("Invalid clip: {reason}")]
    InvalidClip { reason: String },

    /// A frame does not carry exactly one keyframe per skeleton bone
    #[error(
        "Frame size mismatch in clip '{clip}': frame {frame} has {actual} keyframes, expected {expected}"
    )]
    FrameSizeMismatch {
        clip: String,
        frame: usize,
        expected: usize,
        actual: usize,
    },

    /// A pose was requested before any clip was selected
    #[error("No active animation clip")]
    NoActiveClip,

    /// I/O error while reading an animation asset
    #[cfg(feature = "serde")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON animation asset
    #[cfg(feature = "serde")]
    #[error("Asset parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using AnimError
pub type Result<T> = std::result::Result<T, AnimError>;
