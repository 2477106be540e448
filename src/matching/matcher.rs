//! Single-scale template scoring and local suppression.
//!
//! Evaluations for different scales are pure functions of their inputs and
//! run concurrently; the aggregator joins their outputs afterwards.

use crate::matching::config::MatchConfig;
use crate::matching::plane::ChannelPlanes;
use crate::matching::result::MatchResult;
use crate::matching::scale::ScaledTemplate;

/// A thresholded score at one haystack position, before suppression.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    x: u32,
    y: u32,
    score: f32,
}

/// Slide one scaled template over the haystack and emit every surviving
/// local maximum at or above the configured confidence.
///
/// The similarity metric is a normalized sum of squared differences over
/// all channels: `1 - ssd / (pixels * channels)` with samples in `[0, 1]`.
/// It is symmetric, lands in `[0, 1]`, and scores a pixel-identical
/// placement at exactly 1.0 because every per-pixel difference is exactly
/// zero.
pub(crate) fn match_at_scale(
    haystack: &ChannelPlanes,
    scaled: &ScaledTemplate,
    config: &MatchConfig,
) -> Vec<MatchResult> {
    let template = ChannelPlanes::from_image(&scaled.image, config.use_grayscale);

    if template.width > haystack.width || template.height > haystack.height {
        return Vec::new();
    }

    let out_width = haystack.width - template.width + 1;
    let out_height = haystack.height - template.height + 1;

    let sample_count = template.width as f64 * template.height as f64 * template.channels as f64;
    // Largest difference budget that can still reach the threshold.
    let allowed_ssd = sample_count * (1.0 - config.confidence as f64);

    let mut candidates = Vec::new();

    for y in 0..out_height {
        for x in 0..out_width {
            if let Some(score) =
                score_position(haystack, &template, x, y, sample_count, allowed_ssd)
            {
                if score >= config.confidence {
                    candidates.push(Candidate { x, y, score });
                }
            }
        }
    }

    let kept = suppress_neighbors(candidates, template.width, template.height);

    log::debug!(
        "scale {}: {} candidates after local suppression",
        scaled.scale,
        kept.len()
    );

    kept.into_iter()
        .map(|c| {
            MatchResult::new(
                c.x,
                c.y,
                template.width,
                template.height,
                c.score,
                scaled.scale,
            )
        })
        .collect()
}

/// Score the template at `(x, y)`, bailing out as soon as the accumulated
/// difference exceeds what the threshold allows.
fn score_position(
    haystack: &ChannelPlanes,
    template: &ChannelPlanes,
    x: u32,
    y: u32,
    sample_count: f64,
    allowed_ssd: f64,
) -> Option<f32> {
    let mut ssd = 0.0f64;

    for ty in 0..template.height {
        let haystack_row = haystack.row_segment(x, y + ty, template.width);
        let template_row = template.row_segment(0, ty, template.width);

        let mut row_ssd = 0.0f32;
        for (&h, &t) in haystack_row.iter().zip(template_row) {
            let diff = h - t;
            row_ssd += diff * diff;
        }
        ssd += row_ssd as f64;

        if ssd > allowed_ssd {
            return None;
        }
    }

    Some((1.0 - ssd / sample_count) as f32)
}

/// Greedy local non-maximum suppression: keep the strongest candidate and
/// drop anything closer than one template extent in both axes.
fn suppress_neighbors(mut candidates: Vec<Candidate>, width: u32, height: u32) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let shadowed = kept.iter().any(|k| {
            candidate.x.abs_diff(k.x) < width && candidate.y.abs_diff(k.y) < height
        });
        if !shadowed {
            kept.push(candidate);
        }
    }

    kept
}
