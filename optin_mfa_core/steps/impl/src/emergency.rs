use anyhow::Context;
use optin_mfa_config::MfaConfig;
use optin_mfa_core_steps_contracts::emergency::{
    EmergencyRegisterError, EmergencyRegisterForm, EmergencyRegisterService,
    EmergencyRegisterView, EmergencySubmitOutcome,
};
use optin_mfa_models::{account::Account, flow::FlowStep, user::UserName};
use optin_mfa_persistence_contracts::account::AccountRepository;
use optin_mfa_session_contracts::FlowSessionStore;
use optin_mfa_shared_contracts::hash::HashService;

use crate::{load_session, name_or_acr, registerable_factors};

pub struct EmergencyRegisterServiceImpl<FlowSessions, AccountRepo, Hash> {
    flow_sessions: FlowSessions,
    account_repo: AccountRepo,
    hash: Hash,
    config: MfaConfig,
}

impl<FlowSessions, AccountRepo, Hash> EmergencyRegisterServiceImpl<FlowSessions, AccountRepo, Hash> {
    pub fn new(
        flow_sessions: FlowSessions,
        account_repo: AccountRepo,
        hash: Hash,
        config: MfaConfig,
    ) -> Self {
        Self {
            flow_sessions,
            account_repo,
            hash,
            config,
        }
    }
}

impl<FlowSessions, AccountRepo, Hash> EmergencyRegisterService
    for EmergencyRegisterServiceImpl<FlowSessions, AccountRepo, Hash>
where
    FlowSessions: FlowSessionStore,
    AccountRepo: AccountRepository,
    Hash: HashService,
{
    fn render(&self) -> Result<EmergencyRegisterView, EmergencyRegisterError> {
        let session = load_session(&self.flow_sessions, || EmergencyRegisterError::InvalidState)?;
        let FlowStep::NoSecondFactorChosen { available } = session.step else {
            return Err(EmergencyRegisterError::InvalidState);
        };

        Ok(EmergencyRegisterView {
            available: registerable_factors(&self.config, &available),
            wrong_code: false,
        })
    }

    fn submit(
        &self,
        form: EmergencyRegisterForm,
    ) -> Result<EmergencySubmitOutcome, EmergencyRegisterError> {
        let mut session =
            load_session(&self.flow_sessions, || EmergencyRegisterError::InvalidState)?;
        let FlowStep::NoSecondFactorChosen { available } = &session.step else {
            return Err(EmergencyRegisterError::InvalidState);
        };
        let available = available.clone();

        let factor = form
            .second_factor
            .ok_or(EmergencyRegisterError::MissingParameter("secondFactor"))?;
        let code = form
            .scratch_code
            .ok_or(EmergencyRegisterError::MissingParameter("scratchCode"))?;

        let account = self.account(&session.subject)?;
        if account.scratch_code_hashes.is_empty() {
            return Err(EmergencyRegisterError::AccessDenied);
        }

        let hash = self.hash.sha256(code.as_bytes()).into();
        if !account.scratch_code_hashes.contains(&hash) {
            tracing::info!("A wrong scratch code was supplied for emergency registration");
            return Ok(EmergencySubmitOutcome::WrongCode(EmergencyRegisterView {
                available: registerable_factors(&self.config, &available),
                wrong_code: true,
            }));
        }

        let name = name_or_acr(form.second_factor_name, &factor)?;
        session.step = FlowStep::FirstSecondFactorChosen {
            factor,
            name,
            // The flow consumes the code when it registers the factor.
            emergency_code: Some(code),
        };
        self.flow_sessions.store(&session)?;
        Ok(EmergencySubmitOutcome::Complete)
    }
}

impl<FlowSessions, AccountRepo: AccountRepository, Hash>
    EmergencyRegisterServiceImpl<FlowSessions, AccountRepo, Hash>
{
    fn account(&self, subject: &UserName) -> Result<Account, EmergencyRegisterError> {
        let account = self.account_repo.get_by_subject(subject)?;
        Ok(account.with_context(|| format!("No account found for subject {subject}"))?)
    }
}
