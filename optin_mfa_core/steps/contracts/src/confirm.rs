use thiserror::Error;

/// Handles the user's confirmation of having saved their scratch codes.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ConfirmCodesService: Send + Sync + 'static {
    /// Drop the plaintext codes and advance the flow.
    fn confirm(&self) -> Result<(), ConfirmCodesError>;
}

#[derive(Debug, Error)]
pub enum ConfirmCodesError {
    #[error("There are no scratch codes awaiting confirmation.")]
    InvalidState,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockConfirmCodesService {
    pub fn with_confirm(mut self) -> Self {
        self.expect_confirm().once().with().return_once(|| Ok(()));
        self
    }
}
