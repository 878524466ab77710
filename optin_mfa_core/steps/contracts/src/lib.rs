use optin_mfa_models::factor::{AuthenticatorKind, FactorAcr, FactorName};

pub mod choose;
pub mod confirm;
pub mod emergency;
pub mod manage;
pub mod show;

/// A selectable authenticator, as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorModel {
    pub acr: FactorAcr,
    pub kind: AuthenticatorKind,
    /// The user-chosen display name, or the ACR for factors that have not
    /// been registered yet.
    pub label: FactorName,
}
