//! Who the progress record belongs to.

use uuid::Uuid;

use super::storage::KeyValueStore;

/// Storage key under which the device id itself is kept.
pub const DEVICE_ID_KEY: &str = "shift_tour_device_id";

/// The identity inputs, most specific first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Option<String>,
    pub device_id: Option<String>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            device_id: None,
        }
    }

    pub fn device(device_id: impl Into<String>) -> Self {
        Self {
            user_id: None,
            device_id: Some(device_id.into()),
        }
    }

    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// `prefix__u_<user>`, else `prefix__d_<device>`, else `prefix__anon`.
    /// Blank ids count as absent.
    pub fn storage_key(&self, prefix: &str) -> String {
        let present = |id: &Option<String>| {
            id.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if let Some(user) = present(&self.user_id) {
            format!("{prefix}__u_{user}")
        } else if let Some(device) = present(&self.device_id) {
            format!("{prefix}__d_{device}")
        } else {
            format!("{prefix}__anon")
        }
    }
}

/// A stable per-device identifier, generated once and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceId(pub String);

impl DeviceId {
    /// Read the persisted id, or mint and persist a new one.
    ///
    /// Storage failures still yield an id; it just won't survive the session.
    pub fn load_or_create(store: &mut dyn KeyValueStore) -> Self {
        match store.get(DEVICE_ID_KEY) {
            Ok(Some(id)) if !id.trim().is_empty() => return DeviceId(id.trim().to_string()),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "device id unreadable; minting a new one"),
        }

        let id = Uuid::new_v4().to_string();
        if let Err(e) = store.set(DEVICE_ID_KEY, &id) {
            tracing::warn!(error = %e, "device id not persisted");
        }
        DeviceId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::storage::MemoryStore;

    #[test]
    fn key_prefers_user_then_device_then_anon() {
        let both = Identity::user("alice").with_device("dev-1");
        assert_eq!(both.storage_key("p"), "p__u_alice");
        assert_eq!(Identity::device("dev-1").storage_key("p"), "p__d_dev-1");
        assert_eq!(Identity::anonymous().storage_key("p"), "p__anon");
    }

    #[test]
    fn blank_ids_count_as_absent() {
        let id = Identity {
            user_id: Some("  ".into()),
            device_id: Some(String::new()),
        };
        assert_eq!(id.storage_key("p"), "p__anon");
    }

    #[test]
    fn device_id_is_stable_once_created() {
        let mut store = MemoryStore::new();
        let first = DeviceId::load_or_create(&mut store);
        let second = DeviceId::load_or_create(&mut store);
        assert_eq!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }
}
