use anyhow::Context;
use optin_mfa_models::flow::FlowSession;
use optin_mfa_session_contracts::{FlowSessionStore, SessionLoad, SessionManager};

pub mod memory;

/// Session attribute under which the flow session record is stored.
pub const FLOW_SESSION_KEY: &str = "optinmfa:flow";

/// Stores the [`FlowSession`] as a single opaque JSON value in the host's
/// session storage.
#[derive(Debug, Clone)]
pub struct FlowSessionStoreImpl<S> {
    session_manager: S,
}

impl<S> FlowSessionStoreImpl<S> {
    pub fn new(session_manager: S) -> Self {
        Self { session_manager }
    }
}

impl<S: SessionManager> FlowSessionStore for FlowSessionStoreImpl<S> {
    fn load(&self) -> anyhow::Result<SessionLoad> {
        let Some(value) = self.session_manager.get(FLOW_SESSION_KEY)? else {
            return Ok(SessionLoad::Absent);
        };

        match serde_json::from_value(value) {
            Ok(session) => Ok(SessionLoad::Present(session)),
            Err(err) => {
                tracing::warn!(%err, "Failed to deserialize the flow session record");
                Ok(SessionLoad::Invalid)
            }
        }
    }

    fn store(&self, session: &FlowSession) -> anyhow::Result<()> {
        let value = serde_json::to_value(session)
            .context("Failed to serialize the flow session record")?;
        self.session_manager.put(FLOW_SESSION_KEY, value)
    }

    fn clear(&self) -> anyhow::Result<()> {
        self.session_manager.remove(FLOW_SESSION_KEY)?;
        Ok(())
    }
}
