//! Screen and region search orchestration.

use image::DynamicImage;
use rayon::prelude::*;

use crate::capture::{CaptureProvider, Frame, Region};
use crate::error::LocatorResult;
use crate::matching::plane::ChannelPlanes;
use crate::matching::scale::build_scale_space;
use crate::matching::{ImageResource, MatchConfig, MatchResult, aggregate, matcher};

/// Stateless search façade over a capture provider.
///
/// Every call validates its inputs, captures a fresh frame, and runs the
/// full scale-space pipeline; nothing is retained between calls, so
/// unrelated searches from multiple tasks need no coordination.
pub struct ScreenSearcher<C: CaptureProvider> {
    provider: C,
}

impl<C: CaptureProvider> ScreenSearcher<C> {
    pub fn new(provider: C) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &C {
        &self.provider
    }

    /// Locate the best occurrence of `template` anywhere on screen.
    pub async fn find_on_screen(
        &self,
        template: &ImageResource,
        config: &MatchConfig,
    ) -> LocatorResult<Option<MatchResult>> {
        let results = self.find_all_on_screen(template, config).await?;
        Ok(results.into_iter().next())
    }

    /// Locate every occurrence of `template` on screen, ranked by
    /// confidence.
    pub async fn find_all_on_screen(
        &self,
        template: &ImageResource,
        config: &MatchConfig,
    ) -> LocatorResult<Vec<MatchResult>> {
        config.validate()?;
        let decoded = template.decode()?;

        let frame = self.provider.capture(None).await?;
        run_pipeline(&frame, &decoded, config)
    }

    /// Locate the best occurrence of `template` inside `region`.
    ///
    /// The region is checked against the current screen bounds before any
    /// capture happens; returned coordinates are absolute.
    pub async fn find_in_region(
        &self,
        template: &ImageResource,
        region: Region,
        config: &MatchConfig,
    ) -> LocatorResult<Option<MatchResult>> {
        let results = self.find_all_in_region(template, region, config).await?;
        Ok(results.into_iter().next())
    }

    /// Region-bounded variant of [`ScreenSearcher::find_all_on_screen`].
    pub async fn find_all_in_region(
        &self,
        template: &ImageResource,
        region: Region,
        config: &MatchConfig,
    ) -> LocatorResult<Vec<MatchResult>> {
        config.validate()?;

        let (screen_width, screen_height) = self.provider.screen_size()?;
        region.ensure_within(screen_width, screen_height)?;

        let decoded = template.decode()?;

        let frame = self.provider.capture(Some(region)).await?;
        let mut results = run_pipeline(&frame, &decoded, config)?;

        // Pipeline coordinates are region-local; report absolute positions.
        for result in &mut results {
            result.x += region.x;
            result.y += region.y;
        }

        Ok(results)
    }
}

/// Scale-space fan-out, per-scale matching, cross-scale fan-in.
fn run_pipeline(
    frame: &Frame,
    template: &DynamicImage,
    config: &MatchConfig,
) -> LocatorResult<Vec<MatchResult>> {
    let started = std::time::Instant::now();

    let haystack_image = DynamicImage::ImageRgba8(frame.to_rgba()?);
    let haystack = ChannelPlanes::from_image(&haystack_image, config.use_grayscale);

    let scale_space = build_scale_space(template, config, haystack.width, haystack.height);

    let candidates: Vec<MatchResult> = scale_space
        .par_iter()
        .flat_map(|scaled| matcher::match_at_scale(&haystack, scaled, config))
        .collect();

    let ranked = aggregate::rank(candidates, config.limit);

    log::debug!(
        "ranked {} matches across {} scales in {:?}",
        ranked.len(),
        scale_space.len(),
        started.elapsed()
    );

    Ok(ranked)
}
