use serde::{Deserialize, Serialize};

use crate::{
    factor::{AuthenticatorDescriptor, FactorAcr, FactorName, ScratchCode, SecondFactorMap},
    macros::nutype_string,
    user::UserName,
};

nutype_string!(TransactionId(validate(len_char_min = 1, len_char_max = 128)));

/// The per-transaction state of the opt-in MFA flow, stored as one opaque
/// record in the session store and discarded when the authentication
/// transaction changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSession {
    pub transaction: TransactionId,
    pub subject: UserName,
    #[serde(default)]
    pub step: FlowStep,
    /// Sub-flow to resume once the user has authenticated with a registered
    /// factor; consumed exactly once.
    #[serde(default)]
    pub pending: Option<PendingAction>,
    /// Show the factor list even if a registered factor is already
    /// authenticated; consumed by the next pass.
    #[serde(default)]
    pub force_show_list: bool,
}

impl FlowSession {
    pub fn new(transaction: TransactionId, subject: UserName) -> Self {
        Self {
            transaction,
            subject,
            step: FlowStep::default(),
            pending: None,
            force_show_list: false,
        }
    }
}

/// Position in the flow. Each step carries only the data that step needs, so
/// no stale attribute can leak into a later step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowStep {
    NoSecondFactorChosen {
        #[serde(default)]
        available: SecondFactorMap,
    },
    FirstChoiceOfSecondFactor {
        available: SecondFactorMap,
    },
    FirstSecondFactorChosen {
        factor: FactorAcr,
        name: FactorName,
        /// Present iff this is an emergency registration; the scratch code is
        /// consumed by the state machine on the next pass.
        emergency_code: Option<ScratchCode>,
    },
    FirstSecondFactorRegistered {
        factor: FactorAcr,
        name: FactorName,
        emergency: bool,
    },
    ConfirmScratchCodes {
        /// Plaintext codes, held only until the user has confirmed them.
        codes: Vec<ScratchCode>,
    },
    ScratchCodesConfirmed,
    SecondFactorChosen {
        factor: FactorAcr,
    },
    AnotherNewSecondFactorChosen {
        factor: FactorAcr,
        name: FactorName,
    },
    AnotherNewSecondFactorRegistered {
        factor: FactorAcr,
        name: FactorName,
    },
    SecondFactorChosenToDelete {
        name: FactorName,
    },
}

impl Default for FlowStep {
    fn default() -> Self {
        Self::NoSecondFactorChosen {
            available: SecondFactorMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PendingAction {
    RegisterAnother { factor: FactorAcr, name: FactorName },
    Delete { name: FactorName },
}

/// Outcome of one pass of the flow state machine, translated by the host into
/// a pipeline result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The MFA step is satisfied; the pipeline proceeds.
    Success,
    /// Render this action's view (factor choice or scratch codes).
    Prompt,
    /// Redirect to authenticate with the given authenticator.
    Authenticate(AuthenticatorDescriptor),
    /// Redirect to register with the given authenticator.
    Register {
        authenticator: AuthenticatorDescriptor,
        /// Return to this action once registration completes.
        return_to_action: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> FlowSession {
        FlowSession::new(
            TransactionId::try_new("txn-1").unwrap(),
            UserName::try_new("jane").unwrap(),
        )
    }

    #[test]
    fn serialize_roundtrip() {
        let mut session = session();
        session.step = FlowStep::FirstSecondFactorChosen {
            factor: FactorAcr::try_new("urn:acr:sms").unwrap(),
            name: FactorName::try_new("My Phone").unwrap(),
            emergency_code: None,
        };
        session.pending = Some(PendingAction::Delete {
            name: FactorName::try_new("Old Phone").unwrap(),
        });

        let value = serde_json::to_value(&session).unwrap();
        let back = serde_json::from_value::<FlowSession>(value).unwrap();

        assert_eq!(back, session);
    }

    #[test]
    fn missing_step_defaults_to_initial() {
        let value = serde_json::json!({"transaction": "txn-1", "subject": "jane"});
        let session = serde_json::from_value::<FlowSession>(value).unwrap();
        assert_eq!(session, self::session());
    }

    #[test]
    fn unknown_state_is_rejected() {
        let value = serde_json::json!({
            "transaction": "txn-1",
            "subject": "jane",
            "step": {"state": "nonsense"},
        });
        assert!(serde_json::from_value::<FlowSession>(value).is_err());
    }
}
