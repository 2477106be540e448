//! Multi-scale image template matching for locating UI elements inside
//! screen captures, plus the polling primitives built on top of it.
//!
//! A search expands the template into a scale space, scores every scaled
//! variant against a freshly captured frame in parallel, merges the
//! per-scale candidates into one ranked list, and reports absolute screen
//! coordinates. [`ScreenSearcher::wait_for`] and
//! [`ScreenSearcher::wait_for_gone`] repeat that pipeline on an interval
//! under a deadline.
//!
//! The engine is stateless: captures are never cached and nothing is shared
//! between calls, so concurrent unrelated searches need no locking.

pub mod capture;
pub mod error;
pub mod matching;
pub mod poll;
pub mod search;

pub use capture::{CaptureProvider, Frame, Region, ScreenCapture};
pub use error::{LocatorError, LocatorResult};
pub use matching::{ImageResource, MatchConfig, MatchResult};
pub use poll::{DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT};
pub use search::ScreenSearcher;
