use optin_mfa_config::MfaConfig;
use optin_mfa_models::{
    factor::{FactorAcr, FactorName, SecondFactorMap},
    flow::FlowSession,
};
use optin_mfa_session_contracts::{FlowSessionStore, SessionLoad};

pub mod choose;
pub mod confirm;
pub mod emergency;
pub mod manage;
pub mod show;

/// Step handlers always run between two flow passes, so a missing or
/// unreadable record means the request is out of order.
fn load_session<E: From<anyhow::Error>>(
    store: &impl FlowSessionStore,
    invalid: impl FnOnce() -> E,
) -> Result<FlowSession, E> {
    match store.load().map_err(E::from)? {
        SessionLoad::Present(session) => Ok(session),
        SessionLoad::Absent | SessionLoad::Invalid => Err(invalid()),
    }
}

fn name_or_acr(name: Option<FactorName>, acr: &FactorAcr) -> anyhow::Result<FactorName> {
    match name {
        Some(name) => Ok(name),
        None => FactorName::try_new(acr.as_ref()).map_err(Into::into),
    }
}

/// ACRs the user can register from the given state. The same authenticator
/// may back several registered factors, but the dedicated SMS and email
/// factors are offered at most once.
fn registerable_factors(config: &MfaConfig, current: &SecondFactorMap) -> Vec<FactorAcr> {
    let unregistered =
        |acr: &&FactorAcr| !current.values().any(|registered| registered == *acr);
    config
        .available_factors
        .iter()
        .chain(config.sms_factor.iter().filter(unregistered))
        .chain(config.email_factor.iter().filter(unregistered))
        .cloned()
        .collect()
}
