//! Session store: the signed-in user, their role, and UI preferences.

use std::sync::Arc;

use boxoffice_core::{CurrentUser, Role, SessionState};
use tokio::sync::watch;

use super::{SESSION_KEY, persist, rehydrate};
use crate::storage::Storage;

/// Persisted session state.
///
/// ```
/// use std::sync::Arc;
/// use boxoffice_client::storage::MemoryStorage;
/// use boxoffice_client::stores::SessionStore;
///
/// let store = SessionStore::load(Arc::new(MemoryStorage::new()));
/// assert!(!store.is_authenticated());
/// store.toggle_sidebar(true);
/// assert!(store.sidebar_collapsed());
/// ```
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Rehydrate the session from `storage`, or start signed out.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let mut state: SessionState = rehydrate(storage.as_ref(), SESSION_KEY).unwrap_or_default();
        // The role tag is derived; never trust a persisted one.
        state.role = state.user.as_ref().map(|user| user.role);
        tracing::debug!(
            authenticated = state.is_authenticated(),
            "Session store loaded"
        );
        Self {
            storage,
            state: watch::Sender::new(state),
        }
    }

    /// Copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.state.borrow().user.clone()
    }

    /// Role of the signed-in user.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role
    }

    /// Returns `true` iff a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Whether the sidebar is collapsed.
    #[must_use]
    pub fn sidebar_collapsed(&self) -> bool {
        self.state.borrow().sidebar_collapsed
    }

    /// Replace the signed-in user (login or profile refresh).
    pub fn set_user(&self, user: CurrentUser) {
        tracing::info!(user_id = %user.id, role = %user.role, "Session user set");
        self.update(|state| state.set_user(user));
    }

    /// Sign out.
    pub fn logout(&self) {
        tracing::info!("Session cleared");
        self.update(SessionState::logout);
    }

    /// Set the sidebar preference.
    pub fn toggle_sidebar(&self, collapsed: bool) {
        self.update(|state| state.toggle_sidebar(collapsed));
    }

    /// Receive every future state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn update(&self, mutate: impl FnOnce(&mut SessionState)) {
        self.state.send_modify(mutate);
        persist(self.storage.as_ref(), SESSION_KEY, Some(&*self.state.borrow()));
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boxoffice_core::{Email, UserId};

    use super::*;
    use crate::storage::{MemoryStorage, StorageError, UnavailableStorage, read_json};

    fn organizer() -> CurrentUser {
        CurrentUser {
            id: UserId::new(12),
            email: Email::parse("host@lowlight.events").unwrap(),
            display_name: "Lowlight".to_string(),
            role: Role::Organizer,
            email_verified: true,
            onboarded: false,
            access_token: "tok_abc".to_string(),
        }
    }

    #[test]
    fn test_authenticated_iff_user_set() {
        let store = SessionStore::load(Arc::new(MemoryStorage::new()));
        assert!(!store.is_authenticated());
        store.set_user(organizer());
        assert!(store.is_authenticated());
        assert_eq!(store.role(), Some(Role::Organizer));
        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert!(store.role().is_none());
    }

    #[test]
    fn test_mutations_are_persisted_and_rehydrated() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let store = SessionStore::load(Arc::clone(&storage));
        store.set_user(organizer());
        store.toggle_sidebar(true);

        let persisted: SessionState = read_json(&storage, SESSION_KEY).unwrap().unwrap();
        assert_eq!(persisted, store.snapshot());

        let reloaded = SessionStore::load(storage);
        assert_eq!(reloaded.current_user(), Some(organizer()));
        assert!(reloaded.sidebar_collapsed());
    }

    #[test]
    fn test_subscribers_see_changes_immediately() {
        let store = SessionStore::load(Arc::new(MemoryStorage::new()));
        let mut rx = store.subscribe();
        store.set_user(organizer());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_authenticated());
        store.logout();
        assert!(!rx.borrow_and_update().is_authenticated());
    }

    #[test]
    fn test_unavailable_storage_keeps_memory_state() {
        let store = SessionStore::load(Arc::new(UnavailableStorage));
        store.set_user(organizer());
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_role_follows_persisted_user() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(SESSION_KEY, r#"{"user":null,"role":"organizer","sidebar_collapsed":true}"#)
            .unwrap();
        let store = SessionStore::load(storage.clone());
        assert!(!store.is_authenticated());
        assert_eq!(store.role(), None);
        assert!(store.sidebar_collapsed());

        let mut with_user = SessionState::default();
        with_user.set_user(organizer());
        with_user.role = Some(Role::Attendee);
        storage
            .set(SESSION_KEY, &serde_json::to_string(&with_user).unwrap())
            .unwrap();
        assert_eq!(SessionStore::load(storage).role(), Some(Role::Organizer));
    }

    #[test]
    fn test_corrupt_blob_starts_signed_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(SESSION_KEY, "[1,2").unwrap();
        let store = SessionStore::load(storage.clone());
        assert_eq!(store.snapshot(), SessionState::default());
        let direct: Result<Option<SessionState>, _> = read_json(&storage, SESSION_KEY);
        assert!(matches!(direct, Err(StorageError::Decode { .. })));
    }
}
