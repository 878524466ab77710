use optin_mfa_models::flow::FlowSession;
use serde_json::Value;

/// Key/value storage scoped to one browser/authentication session, provided
/// by the host server.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SessionManager: Send + Sync + 'static {
    /// Read a session attribute.
    fn get(&self, key: &str) -> anyhow::Result<Option<Value>>;

    /// Create or replace a session attribute.
    fn put(&self, key: &str, value: Value) -> anyhow::Result<()>;

    /// Remove a session attribute and return its previous value.
    fn remove(&self, key: &str) -> anyhow::Result<Option<Value>>;
}

/// Result of reading the flow session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLoad {
    /// No record exists; this is a fresh transaction.
    Absent,
    /// A record exists but could not be interpreted; callers must reset.
    Invalid,
    Present(FlowSession),
}

/// Typed access to the flow session record. All (de)serialization of flow
/// state happens behind this trait.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FlowSessionStore: Send + Sync + 'static {
    fn load(&self) -> anyhow::Result<SessionLoad>;

    fn store(&self, session: &FlowSession) -> anyhow::Result<()>;

    /// Remove the record, if any.
    fn clear(&self) -> anyhow::Result<()>;
}

#[cfg(feature = "mock")]
impl MockSessionManager {
    pub fn with_get(mut self, key: String, result: Option<Value>) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Ok(result));
        self
    }

    pub fn with_put(mut self, key: String, value: Value) -> Self {
        self.expect_put()
            .once()
            .with(mockall::predicate::eq(key), mockall::predicate::eq(value))
            .return_once(|_, _| Ok(()));
        self
    }

    pub fn with_remove(mut self, key: String, result: Option<Value>) -> Self {
        self.expect_remove()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Ok(result));
        self
    }
}

#[cfg(feature = "mock")]
impl MockFlowSessionStore {
    pub fn with_load(mut self, result: SessionLoad) -> Self {
        self.expect_load().once().with().return_once(|| Ok(result));
        self
    }

    pub fn with_store(mut self, session: FlowSession) -> Self {
        self.expect_store()
            .once()
            .with(mockall::predicate::eq(session))
            .return_once(|_| Ok(()));
        self
    }

    pub fn with_clear(mut self) -> Self {
        self.expect_clear().once().with().return_once(|| Ok(()));
        self
    }
}
