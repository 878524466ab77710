use optin_mfa_core_steps_contracts::confirm::{ConfirmCodesError, ConfirmCodesService};
use optin_mfa_models::flow::FlowStep;
use optin_mfa_session_contracts::FlowSessionStore;

use crate::load_session;

pub struct ConfirmCodesServiceImpl<FlowSessions> {
    flow_sessions: FlowSessions,
}

impl<FlowSessions> ConfirmCodesServiceImpl<FlowSessions> {
    pub fn new(flow_sessions: FlowSessions) -> Self {
        Self { flow_sessions }
    }
}

impl<FlowSessions: FlowSessionStore> ConfirmCodesService
    for ConfirmCodesServiceImpl<FlowSessions>
{
    fn confirm(&self) -> Result<(), ConfirmCodesError> {
        let mut session = load_session(&self.flow_sessions, || ConfirmCodesError::InvalidState)?;
        let FlowStep::ConfirmScratchCodes { .. } = session.step else {
            return Err(ConfirmCodesError::InvalidState);
        };

        session.step = FlowStep::ScratchCodesConfirmed;
        self.flow_sessions.store(&session)?;
        Ok(())
    }
}
