use optin_mfa_demo::{factor::SCRATCH_CODE_BATCH, scratch_code_hash, TXN_1};
use optin_mfa_extern_contracts::registry::MockAuthenticatorRegistry;
use optin_mfa_models::{
    account::Account,
    auth::{AuthenticatedSessions, AuthenticationAttributes},
    factor::{FactorAcr, ScratchCodeHash},
    flow::FlowSession,
};
use optin_mfa_persistence_contracts::account::MockAccountRepository;
use optin_mfa_session_contracts::MockFlowSessionStore;
use optin_mfa_shared_contracts::{hash::MockHashService, scratch::MockScratchCodeService};

use crate::FlowServiceImpl;

mod another;
mod choose;

type Sut = FlowServiceImpl<
    MockFlowSessionStore,
    MockAccountRepository,
    MockAuthenticatorRegistry,
    MockHashService,
    MockScratchCodeService,
>;

fn sut() -> Sut {
    FlowServiceImpl {
        flow_sessions: MockFlowSessionStore::new(),
        account_repo: MockAccountRepository::new(),
        authenticator_registry: MockAuthenticatorRegistry::new(),
        hash: MockHashService::new(),
        scratch_codes: MockScratchCodeService::new(),
        config: optin_mfa_demo::config(),
    }
}

fn attributes(account: &Account) -> AuthenticationAttributes {
    AuthenticationAttributes {
        subject: account.subject.clone(),
    }
}

fn authenticated(acrs: &[&FactorAcr]) -> AuthenticatedSessions {
    acrs.iter().map(|&acr| acr.clone()).collect()
}

/// Flow session for the current transaction, at the initial step.
fn session(account: &Account) -> FlowSession {
    FlowSession::new(TXN_1.clone(), account.subject.clone())
}

/// Hash mock expecting exactly the demo scratch code batch.
fn hash_for_batch() -> MockHashService {
    SCRATCH_CODE_BATCH
        .iter()
        .fold(MockHashService::new(), |hash, code| {
            hash.with_sha256(
                code.clone().into_inner().into_bytes(),
                *scratch_code_hash(code),
            )
        })
}

fn batch_hashes() -> Vec<ScratchCodeHash> {
    SCRATCH_CODE_BATCH.iter().map(scratch_code_hash).collect()
}
