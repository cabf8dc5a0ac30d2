//! The shared default `Authorization` header.
//!
//! Exactly one [`AuthHeaderWriter`] exists per header and it is owned by the
//! auth workflow runtime. Readers are handed to the gateway, which attaches
//! the current value to every outbound request. Writes are synchronous, so a
//! write made while applying an effect is visible to any request built
//! afterwards.

use std::sync::{Arc, PoisonError, RwLock};

/// Creates a linked writer/reader pair with no header set.
pub fn auth_header() -> (AuthHeaderWriter, AuthHeaderReader) {
    let slot = Arc::new(RwLock::new(None));
    (
        AuthHeaderWriter {
            slot: Arc::clone(&slot),
        },
        AuthHeaderReader { slot },
    )
}

/// Sole writer of the default `Authorization` header. Not `Clone`.
#[derive(Debug)]
pub struct AuthHeaderWriter {
    slot: Arc<RwLock<Option<String>>>,
}

impl AuthHeaderWriter {
    /// Sets the header to `Bearer {token}`.
    pub fn set_bearer(&mut self, token: &str) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(format!("Bearer {token}"));
    }

    pub fn clear(&mut self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Read-only view of the default `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthHeaderReader {
    slot: Arc<RwLock<Option<String>>>,
}

impl AuthHeaderReader {
    /// Current header value, e.g. `Bearer abc`.
    pub fn get(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_set(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_updates_all_readers() {
        let (mut writer, reader) = auth_header();
        let other = reader.clone();
        assert_eq!(reader.get(), None);

        writer.set_bearer("T");
        assert_eq!(reader.get().as_deref(), Some("Bearer T"));
        assert_eq!(other.get().as_deref(), Some("Bearer T"));

        writer.clear();
        assert!(!reader.is_set());
    }
}
