//! Keepalive loop
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  Keepalive Task      │
//! │  (tokio spawn)       │
//! │                      │
//! │  loop:               │
//! │  1. send {"c":"ping"}├──> CommandSender ──> Transport
//! │  2. wait interval    │      (failure logged, loop continues)
//! │     or stop signal   │
//! └──────────────────────┘
//! ```
//!
//! The first ping goes out as soon as the task starts. The wait between
//! ticks races the stop signal, so `stop()` never waits out a full interval,
//! and `stop()` awaits the task handle, so no ping can be sent once it
//! returns.

use crate::core::codec::Command;
use crate::core::outbound::CommandSender;
use crate::core::pong_tracker::PongTracker;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Default interval between pings
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(5);

struct Running {
    handle: JoinHandle<()>,
    stop_tx: oneshot::Sender<()>,
}

/// Start/stop handle for the ping task
pub struct Keepalive {
    interval: Duration,
    sender: CommandSender,
    tracker: Arc<PongTracker>,
    running: Mutex<Option<Running>>,
}

impl Keepalive {
    pub fn new(interval: Duration, sender: CommandSender, tracker: Arc<PongTracker>) -> Self {
        Self {
            interval,
            sender,
            tracker,
            running: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the ping task unless one is already running
    ///
    /// Outside a tokio runtime this logs an error and does nothing.
    pub fn start(&self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            error!("Cannot start ping task: no tokio runtime");
            return;
        };

        let mut running = self.running.lock();

        if let Some(current) = running.as_ref() {
            if !current.handle.is_finished() {
                warn!("Ping task is already running");
                return;
            }
        }

        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = runtime.spawn(ping_loop(
            self.interval,
            self.sender.clone(),
            Arc::clone(&self.tracker),
            stop_rx,
        ));

        *running = Some(Running { handle, stop_tx });
        info!("Ping task started");
    }

    /// Signal the ping task and wait until it has exited
    ///
    /// No-op when nothing is running.
    pub async fn stop(&self) {
        let running = self.running.lock().take();
        let Some(Running { handle, stop_tx }) = running else {
            return;
        };

        let _ = stop_tx.send(());
        if let Err(e) = handle.await {
            error!("Ping task ended abnormally: {}", e);
        }
        info!("Ping task stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .as_ref()
            .map(|r| !r.handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Keepalive {
    fn drop(&mut self) {
        if let Some(running) = self.running.get_mut().take() {
            running.handle.abort();
        }
    }
}

async fn ping_loop(
    interval: Duration,
    sender: CommandSender,
    tracker: Arc<PongTracker>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    // If a send stalls past a tick, skip it rather than bursting
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    debug!("Entering ping loop with interval {:?}", interval);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop_rx => break,
            _ = ticker.tick() => {}
        }

        match sender.send_command(&Command::Ping).await {
            Ok(()) => {
                tracker.record_ping_sent();
                debug!("Ping command sent");
            }
            Err(e) => error!("Error sending ping: {}", e),
        }
    }

    debug!("Exiting ping loop");
}
