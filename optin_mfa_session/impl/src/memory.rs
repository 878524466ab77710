use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use optin_mfa_session_contracts::SessionManager;
use serde_json::Value;

/// In-process [`SessionManager`] keeping all attributes in a map. Intended
/// for tests and single-node demo setups; real deployments use the host
/// server's session storage. Clones share the same attributes.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionManager {
    attributes: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemorySessionManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionManager for MemorySessionManager {
    fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let attributes = self
            .attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(attributes.get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut attributes = self
            .attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        attributes.insert(key.into(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let mut attributes = self
            .attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(attributes.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_remove() {
        // Arrange
        let sut = MemorySessionManager::new();
        let value = serde_json::json!({"a": 1});

        // Act + Assert
        assert_eq!(sut.get("k").unwrap(), None);

        sut.put("k", value.clone()).unwrap();
        assert_eq!(sut.get("k").unwrap(), Some(value.clone()));

        assert_eq!(sut.remove("k").unwrap(), Some(value));
        assert_eq!(sut.get("k").unwrap(), None);
        assert_eq!(sut.remove("k").unwrap(), None);
    }
}
