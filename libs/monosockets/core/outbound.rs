use crate::core::codec::Command;
use crate::core::session_state::{AtomicMetrics, AtomicSessionState};
use crate::traits::{MonoSocketError, Result, Transport};
use std::sync::Arc;
use tracing::debug;

/// Encodes commands and pushes them through the shared transport
///
/// Cloned into the keepalive task; the transport serializes the writes.
/// Every send is refused once the session state reaches `Closed`.
#[derive(Clone)]
pub struct CommandSender {
    transport: Arc<dyn Transport>,
    metrics: Arc<AtomicMetrics>,
    state: Arc<AtomicSessionState>,
}

impl CommandSender {
    pub fn new(
        transport: Arc<dyn Transport>,
        metrics: Arc<AtomicMetrics>,
        state: Arc<AtomicSessionState>,
    ) -> Self {
        Self {
            transport,
            metrics,
            state,
        }
    }

    pub async fn send_command(&self, command: &Command) -> Result<()> {
        if self.state.is_closed() {
            return Err(MonoSocketError::InvalidState(format!(
                "cannot send '{}' on a closed session",
                command.name()
            )));
        }

        let raw = command.encode()?;
        self.transport.send(raw.clone()).await?;
        self.metrics.increment_sent();
        if *command == Command::Ping {
            self.metrics.increment_pings();
        }
        debug!("Sent command: {}", raw);
        Ok(())
    }
}
