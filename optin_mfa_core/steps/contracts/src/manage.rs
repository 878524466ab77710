use optin_mfa_models::factor::{FactorAcr, FactorName, SecondFactorMap};
use thiserror::Error;

/// The opt-in management view: register additional factors or delete
/// existing ones. Only reachable while the factor list is being shown.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ManageFactorsService: Send + Sync + 'static {
    fn render(&self) -> Result<ManageFactorsView, ManageFactorsError>;

    /// Record the requested change in the flow session. The caller re-runs
    /// the flow afterwards.
    fn submit(&self, form: ManageFactorForm) -> Result<(), ManageFactorsError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageFactorsView {
    /// The user's registered factors.
    pub current: SecondFactorMap,
    /// ACRs that can still be registered.
    pub available: Vec<FactorAcr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManageFactorForm {
    pub second_factor: Option<FactorAcr>,
    /// Display name for a registration; defaults to the ACR.
    pub second_factor_name: Option<FactorName>,
    /// Delete the factor named by `second_factor_name` instead of
    /// registering a new one.
    pub delete: bool,
}

#[derive(Debug, Error)]
pub enum ManageFactorsError {
    #[error("Missing required parameter {0}.")]
    MissingParameter(&'static str),
    #[error("Factors can only be managed while the factor list is shown.")]
    InvalidState,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockManageFactorsService {
    pub fn with_render(mut self, result: ManageFactorsView) -> Self {
        self.expect_render().once().with().return_once(|| Ok(result));
        self
    }

    pub fn with_submit(mut self, form: ManageFactorForm) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Ok(()));
        self
    }
}
