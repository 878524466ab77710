use optin_mfa_core_flow_contracts::{FlowEvaluateError, FlowService};
use optin_mfa_demo::{
    factor::{ACR_SMS, DESCRIPTOR_SMS},
    user::JANE,
    TXN_1,
};
use optin_mfa_extern_contracts::registry::{AuthenticatorResolveError, MockAuthenticatorRegistry};
use optin_mfa_models::{
    auth::AuthenticatedSessions,
    flow::{Decision, FlowStep},
};
use optin_mfa_session_contracts::{MockFlowSessionStore, SessionLoad};
use optin_mfa_utils::{assert_matches, Apply};
use pretty_assertions::assert_eq;

use super::{attributes, authenticated, session, sut};

#[test]
fn chosen_factor_triggers_authentication() {
    // Arrange
    let loaded = session(&JANE).with(|s| {
        s.step = FlowStep::SecondFactorChosen {
            factor: ACR_SMS.clone(),
        }
    });
    let sut = sut().with(|sut| {
        sut.flow_sessions = MockFlowSessionStore::new()
            .with_load(SessionLoad::Present(loaded))
            .with_store(session(&JANE));
        sut.authenticator_registry = MockAuthenticatorRegistry::new()
            .with_resolve(ACR_SMS.clone(), Ok(vec![DESCRIPTOR_SMS.clone()]));
    });

    // Act
    let result = sut.evaluate(&attributes(&JANE), &AuthenticatedSessions::default(), &TXN_1);

    // Assert
    assert_eq!(
        result.unwrap(),
        Decision::Authenticate(DESCRIPTOR_SMS.clone())
    );
}

#[test]
fn authenticated_chosen_factor_succeeds() {
    // Arrange
    let loaded = session(&JANE).with(|s| {
        s.step = FlowStep::SecondFactorChosen {
            factor: ACR_SMS.clone(),
        }
    });
    let sut = sut().with(|sut| {
        sut.flow_sessions = MockFlowSessionStore::new()
            .with_load(SessionLoad::Present(loaded))
            .with_store(session(&JANE));
    });

    // Act
    let result = sut.evaluate(&attributes(&JANE), &authenticated(&[&ACR_SMS]), &TXN_1);

    // Assert
    assert_eq!(result.unwrap(), Decision::Success);
}

#[test]
fn unresolvable_registered_factor_is_an_internal_error() {
    // Arrange
    let loaded = session(&JANE).with(|s| {
        s.step = FlowStep::SecondFactorChosen {
            factor: ACR_SMS.clone(),
        }
    });
    let sut = sut().with(|sut| {
        sut.flow_sessions = MockFlowSessionStore::new().with_load(SessionLoad::Present(loaded));
        sut.authenticator_registry = MockAuthenticatorRegistry::new()
            .with_resolve(ACR_SMS.clone(), Err(AuthenticatorResolveError::NotConfigured));
    });

    // Act
    let result = sut.evaluate(&attributes(&JANE), &AuthenticatedSessions::default(), &TXN_1);

    // Assert
    assert_matches!(result, Err(FlowEvaluateError::Other(_)));
}
