use thiserror::Error;

/// Problems found while assembling a scene from joint specs and path parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("unrecognized joint variant in `{spec}`")]
    MalformedJointSpec { spec: String },

    #[error("invalid body length in `{spec}`")]
    InvalidBodyLength { spec: String },

    #[error("path radii must be positive and finite, got ({rad1}, {rad2})")]
    InvalidRadii { rad1: f32, rad2: f32 },

    #[error("scene has no joints")]
    EmptyArm,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IkError {
    #[error("least-squares decomposition failed: {0}")]
    Decomposition(&'static str),
}
