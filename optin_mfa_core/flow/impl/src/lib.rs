use anyhow::{anyhow, Context};
use optin_mfa_config::MfaConfig;
use optin_mfa_core_flow_contracts::{FlowEvaluateError, FlowService};
use optin_mfa_extern_contracts::registry::{AuthenticatorRegistry, AuthenticatorResolveError};
use optin_mfa_models::{
    account::Account,
    auth::{AuthenticatedSessions, AuthenticationAttributes},
    factor::{FactorAcr, FactorName, ScratchCode},
    flow::{Decision, FlowSession, FlowStep, PendingAction, TransactionId},
    user::UserName,
};
use optin_mfa_persistence_contracts::account::AccountRepository;
use optin_mfa_session_contracts::{FlowSessionStore, SessionLoad};
use optin_mfa_shared_contracts::{hash::HashService, scratch::ScratchCodeService};

#[cfg(test)]
mod tests;

pub struct FlowServiceImpl<FlowSessions, AccountRepo, Registry, Hash, ScratchCodes> {
    flow_sessions: FlowSessions,
    account_repo: AccountRepo,
    authenticator_registry: Registry,
    hash: Hash,
    scratch_codes: ScratchCodes,
    config: MfaConfig,
}

impl<FlowSessions, AccountRepo, Registry, Hash, ScratchCodes>
    FlowServiceImpl<FlowSessions, AccountRepo, Registry, Hash, ScratchCodes>
{
    pub fn new(
        flow_sessions: FlowSessions,
        account_repo: AccountRepo,
        authenticator_registry: Registry,
        hash: Hash,
        scratch_codes: ScratchCodes,
        config: MfaConfig,
    ) -> Self {
        Self {
            flow_sessions,
            account_repo,
            authenticator_registry,
            hash,
            scratch_codes,
            config,
        }
    }
}

impl<FlowSessions, AccountRepo, Registry, Hash, ScratchCodes> FlowService
    for FlowServiceImpl<FlowSessions, AccountRepo, Registry, Hash, ScratchCodes>
where
    FlowSessions: FlowSessionStore,
    AccountRepo: AccountRepository,
    Registry: AuthenticatorRegistry,
    Hash: HashService,
    ScratchCodes: ScratchCodeService,
{
    #[tracing::instrument(skip_all, fields(subject = %attributes.subject))]
    fn evaluate(
        &self,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        transaction: &TransactionId,
    ) -> Result<Decision, FlowEvaluateError> {
        let mut session = self.load_or_reset(attributes, transaction)?;
        let step = std::mem::take(&mut session.step);

        let result = match step {
            FlowStep::NoSecondFactorChosen { .. }
            | FlowStep::FirstChoiceOfSecondFactor { .. }
            | FlowStep::ScratchCodesConfirmed => {
                self.handle_not_set(&mut session, attributes, authenticated)
            }
            FlowStep::ConfirmScratchCodes { codes } => {
                // Re-rendering the codes view must not lose the codes.
                session.step = FlowStep::ConfirmScratchCodes { codes };
                Ok(Decision::Prompt)
            }
            FlowStep::SecondFactorChosen { factor } => {
                self.handle_chosen(&mut session, attributes, authenticated, factor)
            }
            FlowStep::FirstSecondFactorChosen {
                factor,
                name,
                emergency_code,
            } => self.handle_first_choice(
                &mut session,
                attributes,
                authenticated,
                factor,
                name,
                emergency_code,
            ),
            FlowStep::FirstSecondFactorRegistered {
                factor,
                name,
                emergency,
            } => self.finish_first_registration(
                &mut session,
                attributes,
                authenticated,
                factor,
                name,
                emergency,
            ),
            FlowStep::AnotherNewSecondFactorChosen { factor, name } => {
                session.pending = Some(PendingAction::RegisterAnother { factor, name });
                self.handle_not_set(&mut session, attributes, authenticated)
            }
            FlowStep::AnotherNewSecondFactorRegistered { factor, name } => {
                self.finish_another_registration(attributes, authenticated, factor, name)
            }
            FlowStep::SecondFactorChosenToDelete { name } => {
                self.handle_check_delete(&mut session, attributes, authenticated, name)
            }
        };

        match result {
            Ok(decision) => {
                self.flow_sessions.store(&session)?;
                Ok(decision)
            }
            Err(err) => {
                // Recoverable errors restart the flow on the next pass;
                // infrastructure errors keep the state for a retry.
                if !matches!(err, FlowEvaluateError::Other(_)) {
                    self.flow_sessions.clear()?;
                }
                Err(err)
            }
        }
    }
}

impl<FlowSessions, AccountRepo, Registry, Hash, ScratchCodes>
    FlowServiceImpl<FlowSessions, AccountRepo, Registry, Hash, ScratchCodes>
where
    FlowSessions: FlowSessionStore,
    AccountRepo: AccountRepository,
    Registry: AuthenticatorRegistry,
    Hash: HashService,
    ScratchCodes: ScratchCodeService,
{
    fn load_or_reset(
        &self,
        attributes: &AuthenticationAttributes,
        transaction: &TransactionId,
    ) -> Result<FlowSession, FlowEvaluateError> {
        let fresh = || FlowSession::new(transaction.clone(), attributes.subject.clone());
        Ok(match self.flow_sessions.load()? {
            SessionLoad::Absent => fresh(),
            SessionLoad::Invalid => {
                tracing::warn!("Discarding an unreadable flow session record");
                fresh()
            }
            SessionLoad::Present(session) if session.transaction != *transaction => {
                tracing::info!(
                    "Another authentication transaction is in progress, restarting the flow"
                );
                fresh()
            }
            SessionLoad::Present(session) => session,
        })
    }

    /// No factor has been chosen in this transaction yet. Either prompt for
    /// one or, if the user is already authenticated with a registered factor,
    /// resume whatever they set out to do.
    fn handle_not_set(
        &self,
        session: &mut FlowSession,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
    ) -> Result<Decision, FlowEvaluateError> {
        let force_show_list = std::mem::take(&mut session.force_show_list);
        let account = self.account(&attributes.subject)?;

        if account.second_factors.is_empty() {
            session.step = FlowStep::FirstChoiceOfSecondFactor {
                available: self.config.catalog(),
            };
            return Ok(Decision::Prompt);
        }

        if !force_show_list && authenticated_with_registered_factor(&account, authenticated) {
            return self.continue_previous_action(session, attributes, authenticated);
        }

        session.step = FlowStep::NoSecondFactorChosen {
            available: account.second_factors,
        };
        Ok(Decision::Prompt)
    }

    /// The user picked one of their registered factors. Authenticate with it,
    /// or resume the previous action if that already happened.
    fn handle_chosen(
        &self,
        session: &mut FlowSession,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        factor: FactorAcr,
    ) -> Result<Decision, FlowEvaluateError> {
        if authenticated.contains(&factor) {
            return self.continue_previous_action(session, attributes, authenticated);
        }

        // A registered factor that no longer resolves is a deployment
        // problem, not something the user can fix.
        let authenticator = self
            .authenticator_registry
            .resolve(&factor)
            .map_err(|err| match err {
                AuthenticatorResolveError::NotConfigured => FlowEvaluateError::Other(anyhow!(
                    "No authenticator is configured for the registered second factor {factor}"
                )),
                AuthenticatorResolveError::Other(err) => err.into(),
            })?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("The registry returned no descriptors for {factor}"))?;
        Ok(Decision::Authenticate(authenticator))
    }

    /// The user picked their very first factor, possibly via a scratch code
    /// after losing access to a previously registered one.
    fn handle_first_choice(
        &self,
        session: &mut FlowSession,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        factor: FactorAcr,
        name: FactorName,
        emergency_code: Option<ScratchCode>,
    ) -> Result<Decision, FlowEvaluateError> {
        let emergency = emergency_code.is_some();
        if let Some(code) = emergency_code {
            self.consume_scratch_code(&attributes.subject, &code)?;
        }
        self.register_factor(
            session,
            attributes,
            authenticated,
            factor,
            Registration::First { name, emergency },
        )
    }

    /// Send the user to register with the chosen factor's authenticator, or
    /// skip registration entirely where none is needed.
    fn register_factor(
        &self,
        session: &mut FlowSession,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        factor: FactorAcr,
        registration: Registration,
    ) -> Result<Decision, FlowEvaluateError> {
        // Email authenticators need no interactive registration.
        if self.config.email_factor.as_ref() == Some(&factor) {
            return self.skip_registration(session, attributes, authenticated, factor, registration);
        }
        // SMS registration only collects a phone number, so it is skipped for
        // users who already have one on file.
        if self.config.sms_factor.as_ref() == Some(&factor) {
            let account = self.account(&attributes.subject)?;
            if account.phone_number.is_some() {
                return self.skip_registration(
                    session,
                    attributes,
                    authenticated,
                    factor,
                    registration,
                );
            }
        }

        match self.authenticator_registry.resolve(&factor) {
            Ok(descriptors) => {
                let authenticator = descriptors
                    .into_iter()
                    .next()
                    .ok_or_else(|| anyhow!("The registry returned no descriptors for {factor}"))?;
                session.step = match registration {
                    Registration::First { name, emergency } => FlowStep::FirstSecondFactorRegistered {
                        factor,
                        name,
                        emergency,
                    },
                    Registration::Another { name } => {
                        FlowStep::AnotherNewSecondFactorRegistered { factor, name }
                    }
                };
                Ok(Decision::Register {
                    authenticator,
                    return_to_action: true,
                })
            }
            Err(AuthenticatorResolveError::NotConfigured) => {
                tracing::info!(%factor, "An unconfigured ACR was chosen as second factor");
                Err(FlowEvaluateError::InvalidAcr)
            }
            Err(AuthenticatorResolveError::Other(err)) => Err(err.into()),
        }
    }

    fn skip_registration(
        &self,
        session: &mut FlowSession,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        factor: FactorAcr,
        registration: Registration,
    ) -> Result<Decision, FlowEvaluateError> {
        match registration {
            Registration::First { name, emergency } => self.finish_first_registration(
                session,
                attributes,
                authenticated,
                factor,
                name,
                emergency,
            ),
            Registration::Another { name } => {
                self.finish_another_registration(attributes, authenticated, factor, name)
            }
        }
    }

    /// Persist the first registered factor and issue scratch codes.
    ///
    /// A normal first registration replaces any factors left over from before
    /// an account reset; an emergency registration merges into the existing
    /// ones and keeps the remaining scratch codes unless none are left.
    fn finish_first_registration(
        &self,
        session: &mut FlowSession,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        factor: FactorAcr,
        name: FactorName,
        emergency: bool,
    ) -> Result<Decision, FlowEvaluateError> {
        let mut account = self.account(&attributes.subject)?;

        if emergency {
            account.second_factors.insert(name, factor);
        } else {
            account.second_factors = [(name, factor)].into_iter().collect();
        }

        let codes = (!emergency || account.scratch_code_hashes.is_empty())
            .then(|| self.scratch_codes.generate_batch());
        if let Some(codes) = &codes {
            account.scratch_code_hashes = codes
                .iter()
                .map(|code| self.hash.sha256(code.as_bytes()).into())
                .collect();
        }
        self.account_repo.update(&account)?;

        match codes {
            Some(codes) => {
                session.step = FlowStep::ConfirmScratchCodes { codes };
                Ok(Decision::Prompt)
            }
            None => self.handle_not_set(session, attributes, authenticated),
        }
    }

    /// Persist an additional factor. Requires an authenticated session with
    /// one of the factors registered before this one.
    fn finish_another_registration(
        &self,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        factor: FactorAcr,
        name: FactorName,
    ) -> Result<Decision, FlowEvaluateError> {
        let mut account = self.account(&attributes.subject)?;
        if !authenticated_with_registered_factor(&account, authenticated) {
            return Err(FlowEvaluateError::Unauthorized);
        }

        account.second_factors.insert(name, factor);
        self.account_repo.update(&account)?;
        Ok(Decision::Success)
    }

    /// The user asked to delete a factor. Record the intent and require
    /// authentication with a registered factor before acting on it.
    fn handle_check_delete(
        &self,
        session: &mut FlowSession,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        name: FactorName,
    ) -> Result<Decision, FlowEvaluateError> {
        let account = self.account(&attributes.subject)?;
        if !account.second_factors.contains_key(&name) {
            tracing::info!(factor = %name, "Chose to delete a second factor that is not registered");
            return Err(FlowEvaluateError::UnknownFactor);
        }

        session.pending = Some(PendingAction::Delete { name });
        self.handle_not_set(session, attributes, authenticated)
    }

    /// Resume the action the user set out to do before authenticating with a
    /// registered factor. Without one, satisfying MFA was the whole point.
    fn continue_previous_action(
        &self,
        session: &mut FlowSession,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
    ) -> Result<Decision, FlowEvaluateError> {
        match session.pending.take() {
            Some(PendingAction::RegisterAnother { factor, name }) => self.register_factor(
                session,
                attributes,
                authenticated,
                factor,
                Registration::Another { name },
            ),
            Some(PendingAction::Delete { name }) => {
                self.delete_second_factor(session, attributes, authenticated, name)
            }
            None => Ok(Decision::Success),
        }
    }

    fn delete_second_factor(
        &self,
        session: &mut FlowSession,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        name: FactorName,
    ) -> Result<Decision, FlowEvaluateError> {
        let mut account = self.account(&attributes.subject)?;
        account.second_factors.remove(&name);
        self.account_repo.update(&account)?;

        session.force_show_list = true;
        self.handle_not_set(session, attributes, authenticated)
    }

    fn consume_scratch_code(
        &self,
        subject: &UserName,
        code: &ScratchCode,
    ) -> Result<(), FlowEvaluateError> {
        let mut account = self.account(subject)?;
        let hash = self.hash.sha256(code.as_bytes()).into();
        if !account.scratch_code_hashes.contains(&hash) {
            return Err(FlowEvaluateError::InvalidScratchCode);
        }

        account.scratch_code_hashes.retain(|h| *h != hash);
        self.account_repo.update(&account)?;
        Ok(())
    }

    fn account(&self, subject: &UserName) -> Result<Account, FlowEvaluateError> {
        let account = self.account_repo.get_by_subject(subject)?;
        Ok(account.with_context(|| format!("No account found for subject {subject}"))?)
    }
}

fn authenticated_with_registered_factor(
    account: &Account,
    authenticated: &AuthenticatedSessions,
) -> bool {
    account
        .second_factors
        .values()
        .any(|acr| authenticated.contains(acr))
}

enum Registration {
    First { name: FactorName, emergency: bool },
    Another { name: FactorName },
}
