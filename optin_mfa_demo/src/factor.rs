use std::sync::LazyLock;

use optin_mfa_models::factor::{
    AuthenticatorDescriptor, AuthenticatorKind, FactorAcr, FactorName, ScratchCode,
};

pub static ACR_TOTP: LazyLock<FactorAcr> = LazyLock::new(|| FactorAcr::try_new("totp").unwrap());
pub static ACR_SMS: LazyLock<FactorAcr> = LazyLock::new(|| FactorAcr::try_new("sms").unwrap());
pub static ACR_EMAIL: LazyLock<FactorAcr> = LazyLock::new(|| FactorAcr::try_new("email").unwrap());

pub static DESCRIPTOR_TOTP: LazyLock<AuthenticatorDescriptor> =
    LazyLock::new(|| descriptor(&ACR_TOTP, "totp"));
pub static DESCRIPTOR_SMS: LazyLock<AuthenticatorDescriptor> =
    LazyLock::new(|| descriptor(&ACR_SMS, "sms"));
pub static DESCRIPTOR_EMAIL: LazyLock<AuthenticatorDescriptor> =
    LazyLock::new(|| descriptor(&ACR_EMAIL, "email"));

pub static NAME_PHONE: LazyLock<FactorName> =
    LazyLock::new(|| FactorName::try_new("My Phone").unwrap());
pub static NAME_APP: LazyLock<FactorName> =
    LazyLock::new(|| FactorName::try_new("Authenticator App").unwrap());
pub static NAME_MAIL: LazyLock<FactorName> =
    LazyLock::new(|| FactorName::try_new("Work Mail").unwrap());

pub static SCRATCH_CODE_1: LazyLock<ScratchCode> =
    LazyLock::new(|| ScratchCode::try_new("kqzwvmxbtrlcjhd-402173-pgyfn").unwrap());
pub static SCRATCH_CODE_2: LazyLock<ScratchCode> =
    LazyLock::new(|| ScratchCode::try_new("XsWqPbLmZkVtRcN-985201-DgHjy").unwrap());

/// A full batch as the scratch code service would produce it.
pub static SCRATCH_CODE_BATCH: LazyLock<Vec<ScratchCode>> = LazyLock::new(|| {
    (0..ScratchCode::BATCH_SIZE)
        .map(|i| {
            let letter = (b'a' + i as u8) as char;
            ScratchCode::try_new(format!(
                "{}-{:06}-{}",
                letter.to_string().repeat(ScratchCode::LETTERS_PREFIX),
                i,
                letter.to_string().repeat(ScratchCode::LETTERS_SUFFIX),
            ))
            .unwrap()
        })
        .collect()
});

fn descriptor(acr: &FactorAcr, kind: &str) -> AuthenticatorDescriptor {
    AuthenticatorDescriptor {
        acr: acr.clone(),
        kind: AuthenticatorKind::try_new(kind).unwrap(),
    }
}
