//! Capture provider boundary and the default screen-backed implementation.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use xcap::Monitor;

use crate::error::{LocatorError, LocatorResult};

/// An absolute rectangle of screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Validate that this region has usable dimensions and lies fully within
    /// the given screen bounds. Runs before any capture is attempted.
    pub fn ensure_within(&self, screen_width: u32, screen_height: u32) -> LocatorResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LocatorError::EmptyRegion {
                width: self.width,
                height: self.height,
            });
        }

        let fits_x = self
            .x
            .checked_add(self.width)
            .is_some_and(|right| right <= screen_width);
        let fits_y = self
            .y
            .checked_add(self.height)
            .is_some_and(|bottom| bottom <= screen_height);

        if !fits_x || !fits_y {
            return Err(LocatorError::RegionOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                screen_width,
                screen_height,
            });
        }

        Ok(())
    }
}

/// A captured slice of the screen: tightly packed RGBA8 pixel data.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Reinterpret the raw pixel data as an image buffer.
    pub(crate) fn to_rgba(&self) -> LocatorResult<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(|| {
            LocatorError::Capture {
                description: format!(
                    "frame buffer of {} bytes does not match {}x{} RGBA dimensions",
                    self.pixels.len(),
                    self.width,
                    self.height
                ),
            }
        })
    }
}

/// Source of raw pixel data for the whole screen or a sub-region.
///
/// The engine treats capture failures as opaque and never caches frames
/// between calls.
#[allow(async_fn_in_trait)]
pub trait CaptureProvider {
    /// Current screen dimensions, queried before capture so that region
    /// bounds can be rejected without any capture work.
    fn screen_size(&self) -> LocatorResult<(u32, u32)>;

    /// Capture the full screen, or only `region` when given.
    async fn capture(&self, region: Option<Region>) -> LocatorResult<Frame>;
}

/// Default capture provider backed by the primary monitor.
pub struct ScreenCapture {
    monitor: Monitor,
}

impl ScreenCapture {
    /// Attach to the primary monitor, falling back to the first one reported.
    pub fn primary() -> LocatorResult<Self> {
        let monitors = Monitor::all().map_err(|e| LocatorError::Capture {
            description: e.to_string(),
        })?;

        monitors
            .into_iter()
            .reduce(|best, candidate| if candidate.is_primary() { candidate } else { best })
            .map(|monitor| Self { monitor })
            .ok_or_else(|| LocatorError::Capture {
                description: "no monitors available".to_string(),
            })
    }
}

impl CaptureProvider for ScreenCapture {
    fn screen_size(&self) -> LocatorResult<(u32, u32)> {
        Ok((self.monitor.width(), self.monitor.height()))
    }

    async fn capture(&self, region: Option<Region>) -> LocatorResult<Frame> {
        let image = self
            .monitor
            .capture_image()
            .map_err(|e| LocatorError::Capture {
                description: e.to_string(),
            })?;

        let image = match region {
            Some(r) => {
                image::imageops::crop_imm(&image, r.x, r.y, r.width, r.height).to_image()
            }
            None => image,
        };

        log::debug!("captured {}x{} frame", image.width(), image.height());

        Ok(Frame::new(image.width(), image.height(), image.into_raw()))
    }
}
