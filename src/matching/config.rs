//! Configuration for template search operations.

use serde::{Deserialize, Serialize};

use crate::error::{LocatorError, LocatorResult};

/// Configuration for a template search.
///
/// A default-constructed config is always valid; `validate` guards the
/// public entry points against hand-built values before any capture work
/// happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Search the template at multiple scales (default: true)
    pub search_multiple_scales: bool,
    /// Compare single-channel luminance instead of RGB (default: false)
    pub use_grayscale: bool,
    /// Resize factors applied to the template when multi-scale search is on
    pub scale_steps: Vec<f32>,
    /// Minimum confidence for a reported match, 0.0..=1.0 (default: 0.8)
    pub confidence: f32,
    /// Maximum number of results returned per search (default: 100)
    pub limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            search_multiple_scales: true,
            use_grayscale: false,
            scale_steps: vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5],
            confidence: 0.8,
            limit: 100,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_multi_scale(mut self, enabled: bool) -> Self {
        self.search_multiple_scales = enabled;
        self
    }

    pub fn with_grayscale(mut self, enabled: bool) -> Self {
        self.use_grayscale = enabled;
        self
    }

    pub fn with_scale_steps(mut self, steps: Vec<f32>) -> Self {
        self.scale_steps = steps;
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Check every field, rejecting values the pipeline cannot honor.
    ///
    /// Out-of-range input is an error rather than being clamped, so a bad
    /// config fails loudly before the first capture.
    pub fn validate(&self) -> LocatorResult<()> {
        if !(0.0..=1.0).contains(&self.confidence) || self.confidence.is_nan() {
            return Err(LocatorError::ConfidenceOutOfRange {
                value: self.confidence,
            });
        }

        if self.limit == 0 {
            return Err(LocatorError::ZeroResultLimit);
        }

        if self.search_multiple_scales {
            if self.scale_steps.is_empty() {
                return Err(LocatorError::EmptyScaleSteps);
            }
            if let Some(&step) = self.scale_steps.iter().find(|s| !(**s > 0.0)) {
                return Err(LocatorError::NonPositiveScaleStep { value: step });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MatchConfig::default();
        assert!(config.search_multiple_scales);
        assert!(!config.use_grayscale);
        assert_eq!(config.confidence, 0.8);
        assert_eq!(config.limit, 100);
        assert_eq!(config.scale_steps.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = MatchConfig::new()
            .with_confidence(0.95)
            .with_multi_scale(false)
            .with_grayscale(true)
            .with_limit(5)
            .with_scale_steps(vec![1.0, 0.5]);

        assert_eq!(config.confidence, 0.95);
        assert!(!config.search_multiple_scales);
        assert!(config.use_grayscale);
        assert_eq!(config.limit, 5);
        assert_eq!(config.scale_steps, vec![1.0, 0.5]);
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let err = MatchConfig::new().with_confidence(1.5).validate().unwrap_err();
        assert!(err.is_validation());

        let err = MatchConfig::new().with_confidence(-0.1).validate().unwrap_err();
        assert!(matches!(err, LocatorError::ConfidenceOutOfRange { .. }));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = MatchConfig::new().with_limit(0).validate().unwrap_err();
        assert!(matches!(err, LocatorError::ZeroResultLimit));
    }

    #[test]
    fn empty_scale_steps_are_rejected_only_for_multi_scale() {
        let config = MatchConfig::new().with_scale_steps(vec![]);
        assert!(matches!(
            config.validate().unwrap_err(),
            LocatorError::EmptyScaleSteps
        ));

        // A single-scale search never consults the step list.
        let config = MatchConfig::new()
            .with_scale_steps(vec![])
            .with_multi_scale(false);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_scale_step_is_rejected() {
        let err = MatchConfig::new()
            .with_scale_steps(vec![1.0, 0.0])
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            LocatorError::NonPositiveScaleStep { value } if value == 0.0
        ));

        let err = MatchConfig::new()
            .with_scale_steps(vec![-0.5])
            .validate()
            .unwrap_err();
        assert!(matches!(err, LocatorError::NonPositiveScaleStep { .. }));
    }
}
