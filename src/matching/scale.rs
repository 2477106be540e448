//! Template scale space expansion.

use image::{DynamicImage, imageops::FilterType};

use super::config::MatchConfig;

/// Scales within this distance of 1.0 reuse the template without resampling.
const IDENTITY_EPSILON: f32 = 1e-3;

/// One resized template variant, independent of every other variant.
#[derive(Debug, Clone)]
pub(crate) struct ScaledTemplate {
    pub scale: f32,
    pub image: DynamicImage,
}

/// Expand the template into the variants worth searching.
///
/// Scaled dimensions round to the nearest integer with a 1x1 floor. A scale
/// whose template would not fit inside the haystack in either axis cannot
/// match anywhere and is skipped rather than reported as an error.
pub(crate) fn build_scale_space(
    template: &DynamicImage,
    config: &MatchConfig,
    haystack_width: u32,
    haystack_height: u32,
) -> Vec<ScaledTemplate> {
    let steps: &[f32] = if config.search_multiple_scales {
        &config.scale_steps
    } else {
        &[1.0]
    };

    let mut variants = Vec::with_capacity(steps.len());

    for &scale in steps {
        let scaled_width = ((template.width() as f32 * scale).round() as u32).max(1);
        let scaled_height = ((template.height() as f32 * scale).round() as u32).max(1);

        if scaled_width > haystack_width || scaled_height > haystack_height {
            log::debug!(
                "skipping scale {scale}: {scaled_width}x{scaled_height} exceeds \
                 {haystack_width}x{haystack_height} haystack"
            );
            continue;
        }

        let image = if (scale - 1.0).abs() < IDENTITY_EPSILON {
            template.clone()
        } else {
            DynamicImage::ImageRgba8(image::imageops::resize(
                template,
                scaled_width,
                scaled_height,
                FilterType::Triangle,
            ))
        };

        variants.push(ScaledTemplate { scale, image });
    }

    variants
}
