//! Periodic refresh ticks.
//!
//! A single background task sends [`FeedMessage::PollTick`] on a fixed
//! period. The controller decides whether a tick turns into a refresh, so
//! ticks keep firing while a search is displayed and are ignored there.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::messages::FeedMessage;

/// Default refresh period (30 seconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Shortest refresh period; shorter requests are raised to this.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the repeating refresh timer.
///
/// Cancelling aborts the timer task; dropping the scheduler cancels it too.
#[derive(Debug)]
pub struct PollingScheduler {
    handle: Option<JoinHandle<()>>,
}

impl PollingScheduler {
    /// Start ticking every `period`. The first tick fires one full period
    /// after start, since the controller refreshes on mount by itself.
    ///
    /// A period below [`MIN_POLL_INTERVAL`] is raised to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(period: Duration, message_tx: mpsc::UnboundedSender<FeedMessage>) -> Self {
        if period < MIN_POLL_INTERVAL {
            tracing::warn!(
                "Poll interval {:?} too short, using {:?}",
                period,
                MIN_POLL_INTERVAL
            );
        }
        let period = period.max(MIN_POLL_INTERVAL);
        let handle = tokio::spawn(async move {
            tracing::info!("Poll scheduler started (interval: {}s)", period.as_secs());

            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                tracing::trace!("Poll tick");
                if message_tx.send(FeedMessage::PollTick).is_err() {
                    tracing::debug!("Message channel closed, stopping poll scheduler");
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Stop the timer. Later calls do nothing.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::info!("Poll scheduler stopped");
        }
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _scheduler = PollingScheduler::spawn(Duration::from_secs(30), tx);

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(matches!(rx.try_recv(), Ok(FeedMessage::PollTick)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_repeat_on_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _scheduler = PollingScheduler::spawn(Duration::from_secs(30), tx);

        tokio::time::sleep(Duration::from_secs(95)).await;
        let mut ticks = 0;
        while rx.try_recv().is_ok() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks_and_closes_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = PollingScheduler::spawn(Duration::from_secs(30), tx);
        assert!(scheduler.is_running());

        scheduler.cancel();
        scheduler.cancel();
        assert!(!scheduler.is_running());

        tokio::time::sleep(Duration::from_secs(120)).await;
        // The aborted task dropped its sender, so the channel ends without a tick.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_raised_to_minimum() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = PollingScheduler::spawn(Duration::ZERO, tx);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert!(scheduler.is_running());
        let mut ticks = 0;
        while rx.try_recv().is_ok() {
            ticks += 1;
        }
        assert_eq!(ticks, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(PollingScheduler::spawn(Duration::from_secs(1), tx));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.recv().await.is_none());
    }
}
