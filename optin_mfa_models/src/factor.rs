use std::{collections::BTreeMap, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{macros::nutype_string, Sha256Hash};

nutype_string!(FactorAcr(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 64),
));

nutype_string!(FactorName(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 64),
));

nutype_string!(AuthenticatorKind(validate(len_char_min = 1, len_char_max = 64)));

/// Registered second factors of an account: user-chosen display name to the
/// ACR of the authenticator backing it. A user may register the same
/// authenticator under several names (e.g. two phones).
pub type SecondFactorMap = BTreeMap<FactorName, FactorAcr>;

/// Handle to a configured authenticator, as resolved through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatorDescriptor {
    pub acr: FactorAcr,
    pub kind: AuthenticatorKind,
}

nutype_string!(ScratchCode(validate(regex = SCRATCH_CODE_REGEX)));

pub static SCRATCH_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "^[a-zA-Z]{{{}}}-[0-9]{{{}}}-[a-zA-Z]{{{}}}$",
        ScratchCode::LETTERS_PREFIX,
        ScratchCode::DIGITS,
        ScratchCode::LETTERS_SUFFIX,
    ))
    .unwrap()
});

impl ScratchCode {
    pub const LETTERS_PREFIX: usize = 15;
    pub const DIGITS: usize = 6;
    pub const LETTERS_SUFFIX: usize = 5;

    /// Number of codes issued per batch.
    pub const BATCH_SIZE: usize = 10;
}

#[nutype(derive(Debug, Clone, Copy, PartialEq, Eq, Deref, From, Serialize, Deserialize))]
pub struct ScratchCodeHash(Sha256Hash);
