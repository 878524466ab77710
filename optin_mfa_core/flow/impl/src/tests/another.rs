use optin_mfa_core_flow_contracts::{FlowEvaluateError, FlowService};
use optin_mfa_demo::{
    factor::{ACR_EMAIL, ACR_SMS, ACR_TOTP, DESCRIPTOR_TOTP, NAME_MAIL},
    user::JANE,
    TXN_1,
};
use optin_mfa_extern_contracts::registry::MockAuthenticatorRegistry;
use optin_mfa_models::{
    auth::AuthenticatedSessions,
    flow::{Decision, FlowStep, PendingAction},
};
use optin_mfa_persistence_contracts::account::MockAccountRepository;
use optin_mfa_session_contracts::{MockFlowSessionStore, SessionLoad};
use optin_mfa_utils::{assert_matches, Apply};
use pretty_assertions::assert_eq;

use super::{attributes, authenticated, session, sut};

#[test]
fn registering_another_factor_requires_authentication_first() {
    // Arrange
    let loaded = session(&JANE).with(|s| {
        s.step = FlowStep::AnotherNewSecondFactorChosen {
            factor: ACR_EMAIL.clone(),
            name: NAME_MAIL.clone(),
        }
    });
    let expected = session(&JANE).with(|s| {
        s.step = FlowStep::NoSecondFactorChosen {
            available: JANE.second_factors.clone(),
        };
        s.pending = Some(PendingAction::RegisterAnother {
            factor: ACR_EMAIL.clone(),
            name: NAME_MAIL.clone(),
        });
    });
    let sut = sut().with(|sut| {
        sut.flow_sessions = MockFlowSessionStore::new()
            .with_load(SessionLoad::Present(loaded))
            .with_store(expected);
        sut.account_repo = MockAccountRepository::new()
            .with_get_by_subject(JANE.subject.clone(), Some(JANE.clone()));
    });

    // Act
    let result = sut.evaluate(&attributes(&JANE), &AuthenticatedSessions::default(), &TXN_1);

    // Assert
    assert_eq!(result.unwrap(), Decision::Prompt);
}

#[test]
fn pending_email_registration_resumes_after_authentication() {
    // Arrange
    let loaded = session(&JANE).with(|s| {
        s.pending = Some(PendingAction::RegisterAnother {
            factor: ACR_EMAIL.clone(),
            name: NAME_MAIL.clone(),
        })
    });
    let updated = JANE.clone().with(|account| {
        account
            .second_factors
            .insert(NAME_MAIL.clone(), ACR_EMAIL.clone());
    });
    let sut = sut().with(|sut| {
        sut.flow_sessions = MockFlowSessionStore::new()
            .with_load(SessionLoad::Present(loaded))
            .with_store(session(&JANE));
        sut.account_repo = MockAccountRepository::new()
            .with_get_by_subject(JANE.subject.clone(), Some(JANE.clone()))
            .with_get_by_subject(JANE.subject.clone(), Some(JANE.clone()))
            .with_update(updated);
    });

    // Act
    let result = sut.evaluate(&attributes(&JANE), &authenticated(&[&ACR_SMS]), &TXN_1);

    // Assert
    assert_eq!(result.unwrap(), Decision::Success);
}

#[test]
fn pending_registration_redirects_to_the_authenticator() {
    // Arrange
    let loaded = session(&JANE).with(|s| {
        s.pending = Some(PendingAction::RegisterAnother {
            factor: ACR_TOTP.clone(),
            name: NAME_MAIL.clone(),
        })
    });
    let expected = session(&JANE).with(|s| {
        s.step = FlowStep::AnotherNewSecondFactorRegistered {
            factor: ACR_TOTP.clone(),
            name: NAME_MAIL.clone(),
        }
    });
    let sut = sut().with(|sut| {
        sut.flow_sessions = MockFlowSessionStore::new()
            .with_load(SessionLoad::Present(loaded))
            .with_store(expected);
        sut.account_repo = MockAccountRepository::new()
            .with_get_by_subject(JANE.subject.clone(), Some(JANE.clone()));
        sut.authenticator_registry = MockAuthenticatorRegistry::new()
            .with_resolve(ACR_TOTP.clone(), Ok(vec![DESCRIPTOR_TOTP.clone()]));
    });

    // Act
    let result = sut.evaluate(&attributes(&JANE), &authenticated(&[&ACR_SMS]), &TXN_1);

    // Assert
    assert_eq!(
        result.unwrap(),
        Decision::Register {
            authenticator: DESCRIPTOR_TOTP.clone(),
            return_to_action: true,
        }
    );
}

#[test]
fn confirming_another_factor_without_authentication_is_rejected() {
    // Arrange
    let loaded = session(&JANE).with(|s| {
        s.step = FlowStep::AnotherNewSecondFactorRegistered {
            factor: ACR_EMAIL.clone(),
            name: NAME_MAIL.clone(),
        }
    });
    let sut = sut().with(|sut| {
        sut.flow_sessions = MockFlowSessionStore::new()
            .with_load(SessionLoad::Present(loaded))
            .with_clear();
        sut.account_repo = MockAccountRepository::new()
            .with_get_by_subject(JANE.subject.clone(), Some(JANE.clone()));
    });

    // Act
    let result = sut.evaluate(&attributes(&JANE), &AuthenticatedSessions::default(), &TXN_1);

    // Assert
    assert_matches!(result, Err(FlowEvaluateError::Unauthorized));
}

#[test]
fn confirmed_registration_stores_the_additional_factor() {
    // Arrange
    let loaded = session(&JANE).with(|s| {
        s.step = FlowStep::AnotherNewSecondFactorRegistered {
            factor: ACR_EMAIL.clone(),
            name: NAME_MAIL.clone(),
        }
    });
    let updated = JANE.clone().with(|account| {
        account
            .second_factors
            .insert(NAME_MAIL.clone(), ACR_EMAIL.clone());
    });
    let sut = sut().with(|sut| {
        sut.flow_sessions = MockFlowSessionStore::new()
            .with_load(SessionLoad::Present(loaded))
            .with_store(session(&JANE));
        sut.account_repo = MockAccountRepository::new()
            .with_get_by_subject(JANE.subject.clone(), Some(JANE.clone()))
            .with_update(updated);
    });

    // Act
    let result = sut.evaluate(&attributes(&JANE), &authenticated(&[&ACR_TOTP]), &TXN_1);

    // Assert
    assert_eq!(result.unwrap(), Decision::Success);
}
