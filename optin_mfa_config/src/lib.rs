use std::path::Path;

use anyhow::Context;
use config::{File, FileFormat};
use optin_mfa_models::factor::{FactorAcr, FactorName, SecondFactorMap};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mfa: MfaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MfaConfig {
    /// ACRs the user may configure as their second factor.
    pub available_factors: Vec<FactorAcr>,
    /// ACR of the SMS authenticator, if one is configured. Registration is
    /// skipped for users who already have a phone number on file.
    pub sms_factor: Option<FactorAcr>,
    /// ACR of the email authenticator, if one is configured. Email requires
    /// no interactive registration.
    pub email_factor: Option<FactorAcr>,
    /// Validity of the `rememberSecondFactorChoice` cookie, in days.
    #[serde(default = "default_remember_choice_days")]
    pub remember_choice_days: u32,
}

fn default_remember_choice_days() -> u32 {
    30
}

impl MfaConfig {
    /// The full catalog of configurable second factors, keyed by their ACR as
    /// the initial display name.
    pub fn catalog(&self) -> SecondFactorMap {
        self.available_factors
            .iter()
            .chain(&self.sms_factor)
            .chain(&self.email_factor)
            .filter_map(|acr| {
                let name = FactorName::try_new(acr.as_ref()).ok()?;
                Some((name, acr.clone()))
            })
            .collect()
    }
}
