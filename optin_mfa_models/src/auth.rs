use std::collections::BTreeSet;

use crate::{factor::FactorAcr, user::UserName};

/// Attributes of the current authentication transaction, supplied by the host
/// pipeline on every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationAttributes {
    pub subject: UserName,
}

/// The set of ACRs the user has already authenticated with in the current
/// browser session, independent of this flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticatedSessions(BTreeSet<FactorAcr>);

impl AuthenticatedSessions {
    pub fn contains(&self, acr: &FactorAcr) -> bool {
        self.0.contains(acr)
    }
}

impl FromIterator<FactorAcr> for AuthenticatedSessions {
    fn from_iter<T: IntoIterator<Item = FactorAcr>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
