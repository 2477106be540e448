use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for locator operations.
pub type LocatorResult<T> = Result<T, LocatorError>;

/// The error type for all template search operations.
///
/// "No match found" is never an error; searches report it as `None` or an
/// empty result list.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("confidence {value} is outside the allowed 0.0..=1.0 range")]
    ConfidenceOutOfRange { value: f32 },

    #[error("result limit must be greater than zero")]
    ZeroResultLimit,

    #[error("multi-scale search requested with an empty scale step list")]
    EmptyScaleSteps,

    #[error("scale step {value} is not positive")]
    NonPositiveScaleStep { value: f32 },

    #[error("search region has empty dimensions: {width}x{height}")]
    EmptyRegion { width: u32, height: u32 },

    #[error(
        "search region at ({x},{y}) sized {width}x{height} exceeds screen bounds {screen_width}x{screen_height}"
    )]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        screen_width: u32,
        screen_height: u32,
    },

    #[error("failed to read template file {path:?}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode template image: {source}")]
    TemplateDecode {
        #[from]
        source: image::ImageError,
    },

    #[error("screen capture failed: {description}")]
    Capture { description: String },
}

impl LocatorError {
    /// Check if this error was raised while validating a match configuration.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LocatorError::ConfidenceOutOfRange { .. }
                | LocatorError::ZeroResultLimit
                | LocatorError::EmptyScaleSteps
                | LocatorError::NonPositiveScaleStep { .. }
        )
    }

    /// Check if this error was raised while validating a search region.
    pub fn is_bounds(&self) -> bool {
        matches!(
            self,
            LocatorError::EmptyRegion { .. } | LocatorError::RegionOutOfBounds { .. }
        )
    }
}
