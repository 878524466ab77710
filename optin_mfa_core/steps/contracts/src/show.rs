use optin_mfa_models::factor::{FactorAcr, ScratchCode};
use thiserror::Error;

use crate::AuthenticatorModel;

/// Renders this action's own view between flow passes.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FactorListViewService: Send + Sync + 'static {
    /// Render the view for the current flow step.
    ///
    /// `remembered` is the ACR from the host's remember-choice cookie, if the
    /// request carried one.
    fn render(&self, remembered: Option<FactorAcr>) -> Result<ShowOutcome, RenderFactorListError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowOutcome {
    /// Show the factor choice view.
    Factors(FactorsView),
    /// Show the freshly issued scratch codes.
    ScratchCodes(Vec<ScratchCode>),
    /// A remembered choice was applied; re-run the flow instead of rendering.
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorsView {
    pub authenticators: Vec<AuthenticatorModel>,
    pub remember_choice_days: u32,
    /// Whether the user is choosing their very first second factor.
    pub first_choice: bool,
}

#[derive(Debug, Error)]
pub enum RenderFactorListError {
    #[error("There is no flow state to render a view for.")]
    InvalidState,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockFactorListViewService {
    pub fn with_render(mut self, remembered: Option<FactorAcr>, result: ShowOutcome) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(remembered))
            .return_once(|_| Ok(result));
        self
    }
}
