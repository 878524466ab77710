use optin_mfa_models::factor::{AuthenticatorDescriptor, FactorAcr};
use thiserror::Error;

/// The host server's catalog of configured authenticators.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait AuthenticatorRegistry: Send + Sync + 'static {
    /// Resolve the authenticator descriptors configured for the given ACR.
    ///
    /// A successful result is never empty; callers use the first descriptor.
    fn resolve(
        &self,
        acr: &FactorAcr,
    ) -> Result<Vec<AuthenticatorDescriptor>, AuthenticatorResolveError>;
}

#[derive(Debug, Error)]
pub enum AuthenticatorResolveError {
    #[error("No authenticator is configured for this ACR.")]
    NotConfigured,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockAuthenticatorRegistry {
    pub fn with_resolve(
        mut self,
        acr: FactorAcr,
        result: Result<Vec<AuthenticatorDescriptor>, AuthenticatorResolveError>,
    ) -> Self {
        self.expect_resolve()
            .once()
            .with(mockall::predicate::eq(acr))
            .return_once(|_| result);
        self
    }
}
