//! Countdown monitor background task

use std::{sync::Arc, time::Duration};

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    state::AppState,
    timer::TimerState,
    utils::format_hms_cs,
};

/// Background task that polls the countdown, publishes snapshots and logs
/// transitions as they happen
pub async fn countdown_monitor_task(state: Arc<AppState>, tick: Duration, auto_defrost: bool) {
    info!("Starting countdown monitor task (tick={}ms, auto_defrost={})",
          tick.as_millis(), auto_defrost);

    let mut transition_rx = state.transition_tx.subscribe();
    let mut interval = tokio::time::interval(tick);
    let mut expired_reported = false;

    loop {
        tokio::select! {
            // Tick - refresh the published snapshot
            _ = interval.tick() => {
                let snapshot = match state.poll(auto_defrost) {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        error!("Failed to poll timer: {}", e);
                        continue;
                    }
                };

                debug!("Timer {} {} remaining {}", snapshot.id, snapshot.state,
                       format_hms_cs(snapshot.remaining()));

                if snapshot.expired && snapshot.state != TimerState::Default {
                    if !expired_reported {
                        info!("Countdown {} expired", snapshot.id);
                        expired_reported = true;
                    }
                } else {
                    expired_reported = false;
                }
            }

            // Transition - log the state change
            received = transition_rx.recv() => {
                match received {
                    Ok(timer) => {
                        info!("Timer {} transition: {} -> {}",
                              timer.id(), timer.previous_state(), timer.state());
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Countdown monitor lagged, skipped {} transitions", skipped);
                    }
                    Err(RecvError::Closed) => {
                        info!("Transition channel closed, stopping countdown monitor");
                        break;
                    }
                }
            }
        }
    }
}
