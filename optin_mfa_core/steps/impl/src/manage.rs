use optin_mfa_config::MfaConfig;
use optin_mfa_core_steps_contracts::manage::{
    ManageFactorForm, ManageFactorsError, ManageFactorsService, ManageFactorsView,
};
use optin_mfa_models::flow::FlowStep;
use optin_mfa_session_contracts::FlowSessionStore;

use crate::{load_session, name_or_acr, registerable_factors};

pub struct ManageFactorsServiceImpl<FlowSessions> {
    flow_sessions: FlowSessions,
    config: MfaConfig,
}

impl<FlowSessions> ManageFactorsServiceImpl<FlowSessions> {
    pub fn new(flow_sessions: FlowSessions, config: MfaConfig) -> Self {
        Self {
            flow_sessions,
            config,
        }
    }
}

impl<FlowSessions: FlowSessionStore> ManageFactorsService
    for ManageFactorsServiceImpl<FlowSessions>
{
    fn render(&self) -> Result<ManageFactorsView, ManageFactorsError> {
        let session = load_session(&self.flow_sessions, || ManageFactorsError::InvalidState)?;
        let FlowStep::NoSecondFactorChosen { available } = session.step else {
            return Err(ManageFactorsError::InvalidState);
        };

        Ok(ManageFactorsView {
            available: registerable_factors(&self.config, &available),
            current: available,
        })
    }

    fn submit(&self, form: ManageFactorForm) -> Result<(), ManageFactorsError> {
        let mut session = load_session(&self.flow_sessions, || ManageFactorsError::InvalidState)?;
        let FlowStep::NoSecondFactorChosen { .. } = session.step else {
            return Err(ManageFactorsError::InvalidState);
        };

        session.step = if form.delete {
            let name = form
                .second_factor_name
                .ok_or(ManageFactorsError::MissingParameter("secondFactorName"))?;
            FlowStep::SecondFactorChosenToDelete { name }
        } else {
            let factor = form
                .second_factor
                .ok_or(ManageFactorsError::MissingParameter("secondFactor"))?;
            let name = name_or_acr(form.second_factor_name, &factor)?;
            FlowStep::AnotherNewSecondFactorChosen { factor, name }
        };

        self.flow_sessions.store(&session)?;
        Ok(())
    }
}
