//! Template matching pipeline: configuration, scale space expansion,
//! per-scale scoring, and cross-scale aggregation.

pub mod config;
pub mod resource;
pub mod result;

pub(crate) mod aggregate;
pub(crate) mod matcher;
pub(crate) mod plane;
pub(crate) mod scale;

pub use config::MatchConfig;
pub use resource::ImageResource;
pub use result::MatchResult;
