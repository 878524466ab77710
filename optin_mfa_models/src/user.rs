use std::sync::LazyLock;

use regex::Regex;

use crate::macros::nutype_string;

nutype_string!(UserName(validate(regex = USER_NAME_REGEX)));
pub static USER_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9@._-]{1,64}$").unwrap());

nutype_string!(PhoneNumber(
    sanitize(trim),
    validate(regex = PHONE_NUMBER_REGEX),
));
pub static PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-()]{3,31}$").unwrap());
