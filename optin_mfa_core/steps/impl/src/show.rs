use optin_mfa_config::MfaConfig;
use optin_mfa_core_steps_contracts::{
    show::{FactorListViewService, FactorsView, RenderFactorListError, ShowOutcome},
    AuthenticatorModel,
};
use optin_mfa_extern_contracts::registry::{AuthenticatorRegistry, AuthenticatorResolveError};
use optin_mfa_models::{
    factor::{FactorAcr, SecondFactorMap},
    flow::FlowStep,
};
use optin_mfa_session_contracts::FlowSessionStore;

use crate::load_session;

pub struct FactorListViewServiceImpl<FlowSessions, Registry> {
    flow_sessions: FlowSessions,
    authenticator_registry: Registry,
    config: MfaConfig,
}

impl<FlowSessions, Registry> FactorListViewServiceImpl<FlowSessions, Registry> {
    pub fn new(flow_sessions: FlowSessions, authenticator_registry: Registry, config: MfaConfig) -> Self {
        Self {
            flow_sessions,
            authenticator_registry,
            config,
        }
    }
}

impl<FlowSessions, Registry> FactorListViewService
    for FactorListViewServiceImpl<FlowSessions, Registry>
where
    FlowSessions: FlowSessionStore,
    Registry: AuthenticatorRegistry,
{
    fn render(&self, remembered: Option<FactorAcr>) -> Result<ShowOutcome, RenderFactorListError> {
        let mut session = load_session(&self.flow_sessions, || RenderFactorListError::InvalidState)?;

        let (available, first_choice) = match &session.step {
            FlowStep::ConfirmScratchCodes { codes } => {
                return Ok(ShowOutcome::ScratchCodes(codes.clone()));
            }
            FlowStep::NoSecondFactorChosen { available } => (available.clone(), false),
            FlowStep::FirstChoiceOfSecondFactor { available } => (available.clone(), true),
            _ => return Err(RenderFactorListError::InvalidState),
        };

        if !first_choice {
            if let Some(factor) = remembered.filter(|acr| available.values().any(|a| a == acr)) {
                session.step = FlowStep::SecondFactorChosen { factor };
                self.flow_sessions.store(&session)?;
                return Ok(ShowOutcome::Complete);
            }
        }

        Ok(ShowOutcome::Factors(FactorsView {
            authenticators: self.resolve_models(&available)?,
            remember_choice_days: self.config.remember_choice_days,
            first_choice,
        }))
    }
}

impl<FlowSessions, Registry> FactorListViewServiceImpl<FlowSessions, Registry>
where
    Registry: AuthenticatorRegistry,
{
    fn resolve_models(
        &self,
        available: &SecondFactorMap,
    ) -> Result<Vec<AuthenticatorModel>, RenderFactorListError> {
        let mut authenticators = Vec::with_capacity(available.len());
        for (label, acr) in available {
            match self.authenticator_registry.resolve(acr) {
                Ok(descriptors) => {
                    if let Some(descriptor) = descriptors.into_iter().next() {
                        authenticators.push(AuthenticatorModel {
                            acr: descriptor.acr,
                            kind: descriptor.kind,
                            label: label.clone(),
                        });
                    }
                }
                Err(AuthenticatorResolveError::NotConfigured) => {
                    tracing::info!(%acr, "Skipping a factor without a configured authenticator");
                }
                Err(AuthenticatorResolveError::Other(err)) => return Err(err.into()),
            }
        }
        Ok(authenticators)
    }
}
