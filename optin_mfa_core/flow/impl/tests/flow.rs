use optin_mfa_core_flow_contracts::FlowService;
use optin_mfa_core_flow_impl::FlowServiceImpl;
use optin_mfa_demo::{
    account::MemoryAccountRepository,
    factor::{ACR_TOTP, DESCRIPTOR_TOTP, NAME_APP},
    registry::DemoAuthenticatorRegistry,
    scratch_code_hash,
    user::BOB,
    TXN_1, TXN_2,
};
use optin_mfa_models::{
    auth::{AuthenticatedSessions, AuthenticationAttributes},
    factor::ScratchCode,
    flow::{Decision, FlowSession, FlowStep},
};
use optin_mfa_persistence_contracts::account::AccountRepository;
use optin_mfa_session_contracts::{FlowSessionStore, SessionLoad};
use optin_mfa_session_impl::{memory::MemorySessionManager, FlowSessionStoreImpl};
use optin_mfa_shared_impl::{hash::HashServiceImpl, scratch::ScratchCodeServiceImpl};
use optin_mfa_utils::Apply;
use pretty_assertions::assert_eq;

/// Walks the full first-registration flow with real session, account and
/// scratch code plumbing, playing the part of the step handlers in between.
#[test]
fn first_registration_end_to_end() {
    let sessions = MemorySessionManager::new();
    let accounts = MemoryAccountRepository::new([BOB.clone()]);
    let store = FlowSessionStoreImpl::new(sessions.clone());
    let sut = FlowServiceImpl::new(
        FlowSessionStoreImpl::new(sessions),
        accounts.clone(),
        DemoAuthenticatorRegistry,
        HashServiceImpl,
        ScratchCodeServiceImpl,
        optin_mfa_demo::config(),
    );
    let attributes = AuthenticationAttributes {
        subject: BOB.subject.clone(),
    };
    let unauthenticated = AuthenticatedSessions::default();

    // No factor registered yet: prompt with the configurable catalog.
    let decision = sut.evaluate(&attributes, &unauthenticated, &TXN_1).unwrap();
    assert_eq!(decision, Decision::Prompt);
    let session = load(&store);
    assert_eq!(
        session.step,
        FlowStep::FirstChoiceOfSecondFactor {
            available: optin_mfa_demo::config().catalog(),
        }
    );

    // The user picks TOTP; the flow redirects to registration.
    store
        .store(&session.with(|s| {
            s.step = FlowStep::FirstSecondFactorChosen {
                factor: ACR_TOTP.clone(),
                name: NAME_APP.clone(),
                emergency_code: None,
            }
        }))
        .unwrap();
    let decision = sut.evaluate(&attributes, &unauthenticated, &TXN_1).unwrap();
    assert_eq!(
        decision,
        Decision::Register {
            authenticator: DESCRIPTOR_TOTP.clone(),
            return_to_action: true,
        }
    );

    // Back from registration, authenticated with the new factor: the factor
    // is stored and a batch of scratch codes is issued.
    let authenticated = [ACR_TOTP.clone()]
        .into_iter()
        .collect::<AuthenticatedSessions>();
    let decision = sut.evaluate(&attributes, &authenticated, &TXN_1).unwrap();
    assert_eq!(decision, Decision::Prompt);
    let FlowStep::ConfirmScratchCodes { codes } = load(&store).step else {
        panic!("expected the scratch code confirmation step");
    };
    assert_eq!(codes.len(), ScratchCode::BATCH_SIZE);

    let account = accounts.get_by_subject(&BOB.subject).unwrap().unwrap();
    assert_eq!(
        account.second_factors,
        [(NAME_APP.clone(), ACR_TOTP.clone())].into_iter().collect(),
    );
    assert_eq!(
        account.scratch_code_hashes,
        codes.iter().map(scratch_code_hash).collect::<Vec<_>>(),
    );

    // The user confirms having saved the codes: the action is satisfied.
    store
        .store(&load(&store).with(|s| s.step = FlowStep::ScratchCodesConfirmed))
        .unwrap();
    let decision = sut.evaluate(&attributes, &authenticated, &TXN_1).unwrap();
    assert_eq!(decision, Decision::Success);

    // A new transaction with the factor still authenticated passes straight
    // through.
    let decision = sut.evaluate(&attributes, &authenticated, &TXN_2).unwrap();
    assert_eq!(decision, Decision::Success);
}

fn load(store: &impl FlowSessionStore) -> FlowSession {
    match store.load().unwrap() {
        SessionLoad::Present(session) => session,
        other => panic!("expected a flow session record, got {other:?}"),
    }
}
