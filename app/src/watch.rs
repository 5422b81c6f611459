// In app/src/watch.rs

use crate::display::stats_table;
use crate::loader::load_trades;
use analytics::{StatsEngine, TradeStats};
use anyhow::Result;
use core_types::Period;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Prevents a new refresh from starting while the previous one is in flight.
#[derive(Debug, Default)]
pub struct RefreshGuard {
    in_flight: AtomicBool,
}

impl RefreshGuard {
    /// Claims the guard, or returns `None` if a refresh is already running.
    /// The guard is released when the returned permit is dropped.
    pub fn try_acquire(self: &Arc<Self>) -> Option<RefreshPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RefreshPermit {
                guard: Arc::clone(self),
            })
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct RefreshPermit {
    guard: Arc<RefreshGuard>,
}

impl Drop for RefreshPermit {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

type Latest = Arc<Mutex<Option<TradeStats>>>;

/// Polls the trade log and recomputes statistics on every tick until Ctrl-C.
///
/// A failed reload is logged and the previous statistics are kept.
pub async fn run_watch(
    input: PathBuf,
    period: Period,
    engine: StatsEngine,
    interval: Duration,
) -> Result<()> {
    let guard = Arc::new(RefreshGuard::default());
    let latest: Latest = Arc::new(Mutex::new(None));

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(input = %input.display(), %period, ?interval, "Watching trade log.");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let Some(permit) = guard.try_acquire() else {
                    tracing::debug!("Previous refresh still running; skipping tick.");
                    continue;
                };
                tokio::spawn(refresh(permit, input.clone(), period, engine, Arc::clone(&latest)));
            }
            _ = tokio::signal::ctrl_c() => {
                if guard.is_refreshing() {
                    tracing::info!("Stopping watch; the refresh in flight is abandoned.");
                } else {
                    tracing::info!("Stopping watch.");
                }
                break;
            }
        }
    }

    Ok(())
}

async fn refresh(permit: RefreshPermit, input: PathBuf, period: Period, engine: StatsEngine, latest: Latest) {
    let computed = tokio::task::spawn_blocking(move || {
        load_trades(&input).map(|trades| engine.compute_stats(&trades, period))
    })
    .await;
    drop(permit);

    let stats = match computed {
        Ok(Ok(stats)) => stats,
        Ok(Err(e)) => {
            tracing::warn!(error = %format!("{e:#}"), "Refresh failed; keeping previous statistics.");
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "Refresh task panicked.");
            return;
        }
    };

    if publish(&latest, stats.clone()) {
        tracing::info!(
            trades = stats.total_trades,
            total_pnl = %stats.total_pnl,
            max_drawdown = %stats.max_drawdown,
            "Statistics updated."
        );
        println!("{}", stats_table(&stats));
    } else {
        tracing::debug!("Statistics unchanged.");
    }
}

/// Stores `stats` as the latest result. Returns `true` if it differs from the previous one.
fn publish(latest: &Latest, stats: TradeStats) -> bool {
    let Ok(mut slot) = latest.lock() else {
        tracing::error!("Latest statistics lock is poisoned.");
        return false;
    };
    if slot.as_ref() == Some(&stats) {
        return false;
    }
    *slot = Some(stats);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_blocks_overlapping_refresh() {
        let guard = Arc::new(RefreshGuard::default());

        let permit = guard.try_acquire().expect("first refresh should start");
        assert!(guard.is_refreshing());
        assert!(guard.try_acquire().is_none());

        drop(permit);
        assert!(!guard.is_refreshing());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_publish_reports_changes_only() {
        let latest: Latest = Arc::new(Mutex::new(None));
        let stats = TradeStats::new(Period::Daily);

        assert!(publish(&latest, stats.clone()));
        assert!(!publish(&latest, stats.clone()));

        let mut changed = stats;
        changed.total_trades = 1;
        assert!(publish(&latest, changed));
    }

    #[tokio::test]
    async fn test_refresh_releases_guard_after_failed_load() {
        let guard = Arc::new(RefreshGuard::default());
        let latest: Latest = Arc::new(Mutex::new(None));
        let permit = guard.try_acquire().unwrap();

        refresh(
            permit,
            PathBuf::from("does-not-exist.csv"),
            Period::All,
            StatsEngine::new(),
            Arc::clone(&latest),
        )
        .await;

        assert!(!guard.is_refreshing());
        assert!(latest.lock().unwrap().is_none());
    }
}
