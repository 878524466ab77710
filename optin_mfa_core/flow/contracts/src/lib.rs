use optin_mfa_models::{
    auth::{AuthenticatedSessions, AuthenticationAttributes},
    flow::{Decision, TransactionId},
};
use thiserror::Error;

/// The opt-in MFA flow state machine.
///
/// The host pipeline invokes [`FlowService::evaluate`] once per pass through
/// this authentication action. The step handlers run between passes and
/// update the persisted flow session that the next pass reads.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FlowService: Send + Sync + 'static {
    /// Inspect the persisted flow session and the user's stored factors and
    /// decide what happens next.
    ///
    /// A flow session belonging to a different authentication transaction is
    /// discarded and the flow restarts; this is recovery, not an error.
    fn evaluate(
        &self,
        attributes: &AuthenticationAttributes,
        authenticated: &AuthenticatedSessions,
        transaction: &TransactionId,
    ) -> Result<Decision, FlowEvaluateError>;
}

#[derive(Debug, Error)]
pub enum FlowEvaluateError {
    /// The chosen factor cannot be registered because no authenticator is
    /// configured for its ACR.
    #[error("No authenticator is configured for the chosen second factor.")]
    InvalidAcr,
    /// The scratch code supplied for emergency registration does not match
    /// any unused code on the account.
    #[error("The supplied scratch code is not valid.")]
    InvalidScratchCode,
    /// The factor chosen for deletion is not registered on the account.
    #[error("The chosen second factor is not registered.")]
    UnknownFactor,
    /// Attempted to confirm a new factor without being authenticated with an
    /// existing one.
    #[error("Not authenticated with an existing second factor.")]
    Unauthorized,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
