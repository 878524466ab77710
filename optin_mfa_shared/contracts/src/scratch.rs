use optin_mfa_models::factor::ScratchCode;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ScratchCodeService: Send + Sync + 'static {
    /// Generate a batch of [`ScratchCode::BATCH_SIZE`] unique scratch codes.
    fn generate_batch(&self) -> Vec<ScratchCode>;
}

#[cfg(feature = "mock")]
impl MockScratchCodeService {
    pub fn with_generate_batch(mut self, result: Vec<ScratchCode>) -> Self {
        self.expect_generate_batch()
            .once()
            .with()
            .return_once(|| result);
        self
    }
}
