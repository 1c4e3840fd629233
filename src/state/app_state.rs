//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    clock::Clock,
    timer::{Timer, TimerEngine, TimerState},
};
use super::TimerSnapshot;

/// Clock handle shared between the engine and anything else that needs time
pub type SharedClock = Arc<dyn Clock>;

/// Outcome of a transition request
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub accepted: bool,
    pub snapshot: TimerSnapshot,
}

/// Main application state that owns the countdown and its engine
pub struct AppState {
    /// The countdown being driven
    pub timer: Arc<Mutex<Timer>>,
    pub engine: TimerEngine<SharedClock>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last accepted action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Fired with the mutated timer after every accepted transition
    pub transition_tx: broadcast::Sender<Timer>,
    /// Latest snapshot for pollers
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState around a timer and clock
    pub fn new(timer: Timer, clock: SharedClock, port: u16, host: String) -> Self {
        let (transition_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) =
            watch::channel(TimerSnapshot::capture(&timer, clock.now()));

        let mut engine = TimerEngine::new(clock);
        let forward_tx = transition_tx.clone();
        engine.subscribe(move |timer: &Timer| {
            // No receivers is normal before the monitor task subscribes
            if let Err(e) = forward_tx.send(timer.clone()) {
                debug!("No transition listeners: {}", e);
            }
        });

        Self {
            timer: Arc::new(Mutex::new(timer)),
            engine,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            transition_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply a transition to the timer and publish the resulting snapshot
    pub fn apply<F>(&self, action: &str, transition: F) -> Result<TransitionOutcome, String>
    where
        F: FnOnce(&TimerEngine<SharedClock>, &mut Timer) -> bool,
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        let accepted = transition(&self.engine, &mut *timer);
        let snapshot = TimerSnapshot::capture(&timer, self.engine.clock().now());
        drop(timer); // Release the lock early

        if accepted {
            info!("Timer {} {}: now {}", snapshot.id, action, snapshot.state);
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(snapshot.taken_at);
            }
        } else {
            debug!("Timer {} {} ignored in state {}", snapshot.id, action, snapshot.state);
        }

        self.publish(snapshot.clone());
        Ok(TransitionOutcome { accepted, snapshot })
    }

    /// Start the countdown, optionally with a new duration
    pub fn start(&self, duration: Option<TimeDelta>) -> Result<TransitionOutcome, String> {
        self.apply("start", |engine, timer| match duration {
            Some(duration) => engine.start_with(timer, duration),
            None => engine.start(timer),
        })
    }

    pub fn stop(&self) -> Result<TransitionOutcome, String> {
        self.apply("stop", |engine, timer| engine.stop(timer))
    }

    pub fn pause(&self) -> Result<TransitionOutcome, String> {
        self.apply("pause", |engine, timer| engine.pause(timer))
    }

    pub fn resume(&self) -> Result<TransitionOutcome, String> {
        self.apply("resume", |engine, timer| engine.resume(timer))
    }

    pub fn freeze(&self, freeze_duration: TimeDelta) -> Result<TransitionOutcome, String> {
        self.apply("freeze", |engine, timer| engine.freeze(timer, freeze_duration))
    }

    pub fn defrost(&self) -> Result<TransitionOutcome, String> {
        self.apply("defrost", |engine, timer| engine.defrost(timer))
    }

    pub fn reset(&self) -> Result<TransitionOutcome, String> {
        self.apply("reset", |engine, timer| engine.reset(timer))
    }

    /// Evaluate the timer at the current instant without publishing
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|timer| TimerSnapshot::capture(&timer, self.engine.clock().now()))
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    /// Periodic check: defrost a thawed freeze if asked to, then publish
    pub fn poll(&self, auto_defrost: bool) -> Result<TimerSnapshot, String> {
        if auto_defrost {
            let thawed = self.timer.lock()
                .map(|timer| timer.state() == TimerState::Frozen && self.engine.is_defrosted(&timer))
                .map_err(|e| format!("Failed to lock timer: {}", e))?;
            if thawed {
                let outcome = self.apply("auto-defrost", |engine, timer| engine.defrost(timer))?;
                return Ok(outcome.snapshot);
            }
        }

        let snapshot = self.get_snapshot()?;
        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send timer snapshot: {}", e);
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
