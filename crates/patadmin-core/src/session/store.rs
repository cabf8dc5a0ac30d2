use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use patadmin_types::Session;

/// Rejected `set`: token and user must be present together or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid session: token present = {token_present}, user present = {user_present}")]
pub struct InvalidSessionError {
    pub token_present: bool,
    pub user_present: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

#[derive(Default)]
struct Inner {
    session: Session,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

/// Process-wide holder of the current [`Session`].
///
/// Cloning yields another handle to the same state. The store does no
/// validation beyond the empty-or-complete invariant and never touches the
/// network.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("session", &inner.session)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Session {
        self.lock().session.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.lock().session.is_signed_in()
    }

    /// Replaces the session.
    ///
    /// # Errors
    /// Returns [`InvalidSessionError`] for a partial session; the stored
    /// session is left untouched and no listener runs.
    pub fn set(&self, session: Session) -> Result<(), InvalidSessionError> {
        if !session.is_complete() {
            return Err(InvalidSessionError {
                token_present: session.token.is_some(),
                user_present: session.user.is_some(),
            });
        }
        self.replace(session);
        Ok(())
    }

    pub fn clear(&self) {
        self.replace(Session::empty());
    }

    /// Registers a listener called with the new session after every change.
    pub fn on_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(existing, _)| *existing != id);
        inner.listeners.len() != before
    }

    fn replace(&self, session: Session) {
        // Listeners run outside the lock so they may read the store.
        let listeners: Vec<Listener> = {
            let mut inner = self.lock();
            if inner.session == session {
                return;
            }
            inner.session = session.clone();
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(&session);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use patadmin_types::UserRecord;

    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            id: 1,
            name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: "ana@example.com".to_string(),
            cpf: "000".to_string(),
            birth_date: "1990-01-01".to_string(),
            municipality: "Crato".to_string(),
            is_admin: true,
            active: true,
        }
    }

    #[test]
    fn test_set_and_clear() {
        let store = SessionStore::new();
        assert!(!store.is_signed_in());

        store.set(Session::authenticated("T", user())).unwrap();
        assert!(store.is_signed_in());
        assert_eq!(store.get().token.as_deref(), Some("T"));

        store.clear();
        assert_eq!(store.get(), Session::empty());
    }

    #[test]
    fn test_partial_session_rejected_and_state_kept() {
        let store = SessionStore::new();
        let full = Session::authenticated("T", user());
        store.set(full.clone()).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        store.on_change(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let token_only = Session {
            token: Some("X".to_string()),
            user: None,
        };
        let err = store.set(token_only).unwrap_err();
        assert!(err.token_present);
        assert!(!err.user_present);

        let user_only = Session {
            token: None,
            user: Some(user()),
        };
        assert!(store.set(user_only).is_err());

        assert_eq!(store.get(), full);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listeners_see_changes_only() {
        let store = SessionStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let id = store.on_change(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.set(Session::authenticated("T", user())).unwrap();
        store.set(Session::authenticated("T", user())).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(store.remove_listener(id));
        store.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = SessionStore::new();
        let handle = store.clone();
        let observed = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&observed);
        store.on_change(move |_| {
            *sink.lock().unwrap() = Some(handle.is_signed_in());
        });

        store.set(Session::authenticated("T", user())).unwrap();
        assert_eq!(*observed.lock().unwrap(), Some(true));
    }
}
