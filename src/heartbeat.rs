//! Periodic heartbeat logger.
//!
//! Ticks once at startup and then on a fixed period, writing one log line per
//! tick. It never touches the pet store and never runs the authorization
//! middleware.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub struct Heartbeat {
    period: Duration,
    ticks: Arc<AtomicU64>,
}

impl Heartbeat {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of ticks logged so far, shared with the running task
    #[cfg(test)]
    pub fn ticks(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.ticks)
    }

    /// Run the heartbeat on the current tokio runtime until aborted
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut timer = interval(self.period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                timer.tick().await;
                self.tick(Utc::now());
            }
        })
    }

    fn tick(&self, now: DateTime<Utc>) {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(tick, "{}", tic_tac_line(now));
    }
}

pub fn tic_tac_line(now: DateTime<Utc>) -> String {
    format!("Tic-Tac -------> {} <-----------------", now.format("%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tic_tac_line_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
        assert_eq!(
            tic_tac_line(now),
            "Tic-Tac -------> 07:05:03 <-----------------"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_on_startup_then_every_period() {
        let heartbeat = Heartbeat::new(Duration::from_secs(10));
        let ticks = heartbeat.ticks();
        let handle = heartbeat.spawn();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(ticks.load(Ordering::Relaxed), 1);

        tokio::time::sleep(Duration::from_secs(24)).await;
        assert_eq!(ticks.load(Ordering::Relaxed), 3);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_stops_ticking() {
        let heartbeat = Heartbeat::new(Duration::from_secs(10));
        let ticks = heartbeat.ticks();
        let handle = heartbeat.spawn();

        tokio::time::sleep(Duration::from_secs(5)).await;
        handle.abort();
        let _ = handle.await;
        let before = ticks.load(Ordering::Relaxed);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(ticks.load(Ordering::Relaxed), before);
    }
}
