use optin_mfa_config::MfaConfig;
use optin_mfa_core_steps_contracts::choose::{
    ChooseFactorError, ChooseFactorForm, ChooseFactorService, ChooseOutcome, RememberChoiceCookie,
};
use optin_mfa_models::flow::FlowStep;
use optin_mfa_session_contracts::FlowSessionStore;

use crate::{load_session, name_or_acr};

pub struct ChooseFactorServiceImpl<FlowSessions> {
    flow_sessions: FlowSessions,
    config: MfaConfig,
}

impl<FlowSessions> ChooseFactorServiceImpl<FlowSessions> {
    pub fn new(flow_sessions: FlowSessions, config: MfaConfig) -> Self {
        Self {
            flow_sessions,
            config,
        }
    }
}

impl<FlowSessions: FlowSessionStore> ChooseFactorService
    for ChooseFactorServiceImpl<FlowSessions>
{
    fn choose(&self, form: ChooseFactorForm) -> Result<ChooseOutcome, ChooseFactorError> {
        let mut session = load_session(&self.flow_sessions, || ChooseFactorError::InvalidState)?;
        let factor = form
            .second_factor
            .ok_or(ChooseFactorError::MissingParameter("secondFactor"))?;

        let outcome = match session.step {
            FlowStep::FirstChoiceOfSecondFactor { .. } => {
                let name = name_or_acr(form.second_factor_name, &factor)?;
                session.step = FlowStep::FirstSecondFactorChosen {
                    factor,
                    name,
                    emergency_code: None,
                };
                ChooseOutcome::default()
            }
            FlowStep::NoSecondFactorChosen { .. } => {
                let remember_cookie = form.remember_choice.then(|| RememberChoiceCookie {
                    factor: factor.clone(),
                    max_age_days: self.config.remember_choice_days,
                });
                session.step = FlowStep::SecondFactorChosen { factor };
                ChooseOutcome { remember_cookie }
            }
            _ => return Err(ChooseFactorError::InvalidState),
        };

        self.flow_sessions.store(&session)?;
        Ok(outcome)
    }
}
