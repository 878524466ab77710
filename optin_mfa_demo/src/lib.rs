use std::sync::LazyLock;

use optin_mfa_config::MfaConfig;
use optin_mfa_models::{
    factor::{FactorAcr, ScratchCode, ScratchCodeHash},
    flow::TransactionId,
    Sha256Hash,
};
use sha2::{Digest, Sha256};

pub mod account;
pub mod factor;
pub mod registry;
pub mod user;

pub static TXN_1: LazyLock<TransactionId> =
    LazyLock::new(|| TransactionId::try_new("9f2c7a1e-txn-1").unwrap());
pub static TXN_2: LazyLock<TransactionId> =
    LazyLock::new(|| TransactionId::try_new("4b81d0c5-txn-2").unwrap());

/// The SHA-256 hash of a scratch code, as stored on the account.
pub fn scratch_code_hash(code: &ScratchCode) -> ScratchCodeHash {
    let hash: [u8; 32] = Sha256::new().chain_update(code.as_ref()).finalize().into();
    Sha256Hash(hash).into()
}

/// Action configuration used throughout the tests: a TOTP authenticator plus
/// dedicated SMS and email authenticators.
pub fn config() -> MfaConfig {
    MfaConfig {
        available_factors: vec![factor::ACR_TOTP.clone()],
        sms_factor: Some(factor::ACR_SMS.clone()),
        email_factor: Some(factor::ACR_EMAIL.clone()),
        remember_choice_days: 30,
    }
}

pub static UNKNOWN_ACR: LazyLock<FactorAcr> =
    LazyLock::new(|| FactorAcr::try_new("unconfigured").unwrap());
