use std::sync::LazyLock;

use optin_mfa_models::{
    account::Account,
    factor::SecondFactorMap,
    user::{PhoneNumber, UserName},
};

use crate::{
    factor::{ACR_SMS, ACR_TOTP, NAME_APP, NAME_PHONE, SCRATCH_CODE_1, SCRATCH_CODE_2},
    scratch_code_hash,
};

/// User with two registered second factors and two unused scratch codes.
pub static JANE: LazyLock<Account> = LazyLock::new(|| Account {
    subject: UserName::try_new("jane").unwrap(),
    phone_number: Some(PhoneNumber::try_new("+46 70 123 45 67").unwrap()),
    second_factors: [
        (NAME_PHONE.clone(), ACR_SMS.clone()),
        (NAME_APP.clone(), ACR_TOTP.clone()),
    ]
    .into_iter()
    .collect(),
    scratch_code_hashes: vec![
        scratch_code_hash(&SCRATCH_CODE_1),
        scratch_code_hash(&SCRATCH_CODE_2),
    ],
});

/// User without any registered second factor.
pub static BOB: LazyLock<Account> = LazyLock::new(|| Account {
    subject: UserName::try_new("bob").unwrap(),
    phone_number: None,
    second_factors: SecondFactorMap::new(),
    scratch_code_hashes: Vec::new(),
});

/// User without factors but with a phone number on file, so SMS registration
/// can be skipped.
pub static CARLA: LazyLock<Account> = LazyLock::new(|| Account {
    subject: UserName::try_new("carla").unwrap(),
    phone_number: Some(PhoneNumber::try_new("+46 70 765 43 21").unwrap()),
    second_factors: SecondFactorMap::new(),
    scratch_code_hashes: Vec::new(),
});
