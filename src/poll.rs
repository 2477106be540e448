//! Polling primitives built on region search.

use tokio::time::{Duration, Instant, sleep};

use crate::capture::CaptureProvider;
use crate::error::LocatorResult;
use crate::matching::{ImageResource, MatchConfig, MatchResult};
use crate::search::ScreenSearcher;

pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollState {
    Polling,
    Found,
    TimedOut,
}

fn transition(state: &mut PollState, next: PollState) {
    if *state != next {
        log::debug!("poll state {:?} -> {:?}", *state, next);
        *state = next;
    }
}

impl<C: CaptureProvider> ScreenSearcher<C> {
    /// Poll until `template` appears on screen or `timeout` elapses.
    ///
    /// A match returns immediately without a trailing delay; otherwise each
    /// attempt sleeps `interval` before re-checking the deadline, so the
    /// true cadence is `interval` plus the cost of one capture-and-match
    /// pass. Any error from an underlying step aborts the poll.
    pub async fn wait_for(
        &self,
        template: &ImageResource,
        timeout: Duration,
        interval: Duration,
        config: &MatchConfig,
    ) -> LocatorResult<Option<MatchResult>> {
        let deadline = Instant::now() + timeout;
        let mut state = PollState::Polling;

        loop {
            if let Some(found) = self.find_on_screen(template, config).await? {
                transition(&mut state, PollState::Found);
                return Ok(Some(found));
            }

            sleep(interval).await;

            if Instant::now() >= deadline {
                transition(&mut state, PollState::TimedOut);
                return Ok(None);
            }
        }
    }

    /// Poll until `template` is no longer found on screen.
    ///
    /// Returns `true` the moment a search comes back empty, `false` when
    /// the deadline expires while the template is still present.
    pub async fn wait_for_gone(
        &self,
        template: &ImageResource,
        timeout: Duration,
        interval: Duration,
        config: &MatchConfig,
    ) -> LocatorResult<bool> {
        let deadline = Instant::now() + timeout;
        let mut state = PollState::Polling;

        loop {
            if self.find_on_screen(template, config).await?.is_none() {
                transition(&mut state, PollState::Found);
                return Ok(true);
            }

            sleep(interval).await;

            if Instant::now() >= deadline {
                transition(&mut state, PollState::TimedOut);
                return Ok(false);
            }
        }
    }
}
