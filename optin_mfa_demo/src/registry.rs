use optin_mfa_extern_contracts::registry::{AuthenticatorRegistry, AuthenticatorResolveError};
use optin_mfa_models::factor::{AuthenticatorDescriptor, FactorAcr};

use crate::factor::{DESCRIPTOR_EMAIL, DESCRIPTOR_SMS, DESCRIPTOR_TOTP};

/// [`AuthenticatorRegistry`] resolving exactly the demo authenticators.
#[derive(Debug, Default)]
pub struct DemoAuthenticatorRegistry;

impl AuthenticatorRegistry for DemoAuthenticatorRegistry {
    fn resolve(
        &self,
        acr: &FactorAcr,
    ) -> Result<Vec<AuthenticatorDescriptor>, AuthenticatorResolveError> {
        [&DESCRIPTOR_TOTP, &DESCRIPTOR_SMS, &DESCRIPTOR_EMAIL]
            .into_iter()
            .find(|descriptor| descriptor.acr == *acr)
            .map(|descriptor| vec![(*descriptor).clone()])
            .ok_or(AuthenticatorResolveError::NotConfigured)
    }
}
