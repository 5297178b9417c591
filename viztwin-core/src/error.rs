//! Error type shared by the VizTwin crates

/// Errors raised by core operations
#[derive(thiserror::Error, Debug)]
pub enum VizTwinError {
    #[error("no project with id {0:?}")]
    UnknownProject(String),

    #[error("unknown layer {0:?}")]
    UnknownLayer(String),

    #[error("no rename in progress")]
    NotRenaming,

    #[error("project name cannot be empty")]
    EmptyName,

    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VizTwinError {
    pub fn config<T: ToString>(msg: T) -> Self {
        VizTwinError::Config(msg.to_string())
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, VizTwinError>;
