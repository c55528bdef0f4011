use thiserror::Error;

/// Errors raised when an event is not valid for the current view state
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The event has no transition from the current state
    #[error("Cannot {event} while {state}")]
    InvalidTransition {
        event: &'static str,
        state: &'static str,
    },
    /// An operation of the same kind is still waiting for its result
    #[error("{0} already in progress")]
    Busy(&'static str),
    /// The sticker id does not exist in the catalog
    #[error("Unknown sticker: {0}")]
    UnknownSticker(usize),
}

/// Errors that can occur while turning a picked file into an image
#[derive(Debug, Error)]
pub enum PickError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Picked image is empty")]
    Empty,

    #[error("Image picker failed: {0}")]
    Provider(String),
}

/// Errors that can occur while exporting the composite
#[derive(Debug, Error)]
pub enum ExportError {
    /// There is no image on screen, nothing was exported
    #[error("Nothing to export")]
    NothingToExport,

    #[error("Another export is still running")]
    Busy,

    #[error("Permission to write to the photo library was not granted")]
    PermissionDenied,

    #[error("Failed to capture composite: {0}")]
    Capture(String),

    #[error("Failed to encode composite: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to save to the photo library: {0}")]
    Persist(String),

    #[error("Failed to start download: {0}")]
    Download(String),
}

/// Errors raised when loading or validating the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
