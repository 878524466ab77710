use optin_mfa_models::factor::{FactorAcr, FactorName};
use thiserror::Error;

/// Handles the POST of the factor choice view.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ChooseFactorService: Send + Sync + 'static {
    /// Record the chosen factor in the flow session. The caller re-runs the
    /// flow afterwards and sets the returned cookie, if any.
    fn choose(&self, form: ChooseFactorForm) -> Result<ChooseOutcome, ChooseFactorError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChooseFactorForm {
    pub second_factor: Option<FactorAcr>,
    /// Display name for a first registration; defaults to the ACR.
    pub second_factor_name: Option<FactorName>,
    pub remember_choice: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChooseOutcome {
    pub remember_cookie: Option<RememberChoiceCookie>,
}

/// Directive for the host to persist the user's factor choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberChoiceCookie {
    pub factor: FactorAcr,
    pub max_age_days: u32,
}

#[derive(Debug, Error)]
pub enum ChooseFactorError {
    #[error("Missing required parameter {0}.")]
    MissingParameter(&'static str),
    #[error("There is no flow state accepting a factor choice.")]
    InvalidState,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockChooseFactorService {
    pub fn with_choose(mut self, form: ChooseFactorForm, result: ChooseOutcome) -> Self {
        self.expect_choose()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Ok(result));
        self
    }
}
