use optin_mfa_models::{account::Account, user::UserName};

/// The external account store. Updates replace the stored attributes with the
/// supplied snapshot and are atomic at the storage layer.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait AccountRepository: Send + Sync + 'static {
    /// Fetch the account of the given subject.
    fn get_by_subject(&self, subject: &UserName) -> anyhow::Result<Option<Account>>;

    /// Write the given account snapshot.
    fn update(&self, account: &Account) -> anyhow::Result<()>;
}

#[cfg(feature = "mock")]
impl MockAccountRepository {
    pub fn with_get_by_subject(mut self, subject: UserName, result: Option<Account>) -> Self {
        self.expect_get_by_subject()
            .once()
            .with(mockall::predicate::eq(subject))
            .return_once(|_| Ok(result));
        self
    }

    pub fn with_update(mut self, account: Account) -> Self {
        self.expect_update()
            .once()
            .with(mockall::predicate::eq(account))
            .return_once(|_| Ok(()));
        self
    }
}
