use optin_mfa_models::factor::{FactorAcr, FactorName, ScratchCode};
use thiserror::Error;

/// Registration of a replacement factor via a scratch code, for users who
/// lost access to their second factor. Only reachable while the factor list
/// is being shown.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmergencyRegisterService: Send + Sync + 'static {
    fn render(&self) -> Result<EmergencyRegisterView, EmergencyRegisterError>;

    /// Check the scratch code and record the replacement factor choice. The
    /// code is only consumed once the flow actually registers the factor.
    fn submit(&self, form: EmergencyRegisterForm)
        -> Result<EmergencySubmitOutcome, EmergencyRegisterError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyRegisterView {
    /// ACRs that can be registered as the replacement factor.
    pub available: Vec<FactorAcr>,
    /// Whether the previous submission carried a wrong scratch code.
    pub wrong_code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmergencyRegisterForm {
    pub second_factor: Option<FactorAcr>,
    /// Display name for the replacement; defaults to the ACR.
    pub second_factor_name: Option<FactorName>,
    pub scratch_code: Option<ScratchCode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmergencySubmitOutcome {
    /// The code matched; the caller re-runs the flow.
    Complete,
    /// The code did not match; show the view again.
    WrongCode(EmergencyRegisterView),
}

#[derive(Debug, Error)]
pub enum EmergencyRegisterError {
    #[error("Missing required parameter {0}.")]
    MissingParameter(&'static str),
    #[error("Emergency registration is only available from the factor list.")]
    InvalidState,
    #[error("There are no scratch codes on this account.")]
    AccessDenied,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmergencyRegisterService {
    pub fn with_render(mut self, result: EmergencyRegisterView) -> Self {
        self.expect_render().once().with().return_once(|| Ok(result));
        self
    }

    pub fn with_submit(
        mut self,
        form: EmergencyRegisterForm,
        result: EmergencySubmitOutcome,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Ok(result));
        self
    }
}
