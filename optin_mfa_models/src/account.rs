use crate::{
    factor::{ScratchCodeHash, SecondFactorMap},
    user::{PhoneNumber, UserName},
};

/// Snapshot of the user record held by the external account store, reduced to
/// the attributes this action reads and writes. Mutations are performed on a
/// clone and written back wholesale through the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub subject: UserName,
    pub phone_number: Option<PhoneNumber>,
    pub second_factors: SecondFactorMap,
    /// SHA-256 hashes of the unused scratch codes. Plaintext is never stored
    /// on the account.
    pub scratch_code_hashes: Vec<ScratchCodeHash>,
}
