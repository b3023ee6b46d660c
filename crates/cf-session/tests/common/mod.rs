#![allow(dead_code)]

pub mod fakes;

use fakes::{FakeAuthApi, FakeProfileApi, FakeServer, RecordingChannel};

use cf_core::{AccountRole, Credential, UserId};
use cf_session::{Session, SessionManager};
use cf_store::{KeyValueStore, MemoryStore};

use std::sync::Arc;

/// Full wiring of a session manager against fakes, with handles to
/// every collaborator for inspection and failure injection.
pub struct TestHarness {
    pub server: Arc<FakeServer>,
    pub store: Arc<dyn KeyValueStore>,
    pub channel: Arc<RecordingChannel>,
    pub manager: Arc<SessionManager>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let server = FakeServer::new();
        Self::wire(server, store)
    }

    /// Simulate a process restart: a fresh manager and channel over
    /// the same durable store and server state.
    pub fn restart(&self) -> Self {
        Self::wire(Arc::clone(&self.server), Arc::clone(&self.store))
    }

    fn wire(server: Arc<FakeServer>, store: Arc<dyn KeyValueStore>) -> Self {
        let channel = RecordingChannel::new();
        let manager = SessionManager::new(
            FakeAuthApi::new(Arc::clone(&server)),
            FakeProfileApi::new(Arc::clone(&server)),
            Arc::clone(&store),
            channel.clone(),
        );

        Self {
            server,
            store,
            channel,
            manager,
        }
    }

    /// Register an account and return its server-assigned id.
    pub async fn register(&self, email: &str, role: AccountRole) -> UserId {
        self.manager
            .register(email, "pw123456", role)
            .await
            .unwrap();
        self.linked_id(email)
    }

    pub fn snapshot(&self) -> Session {
        self.manager.snapshot()
    }

    pub fn linked_id(&self, email: &str) -> UserId {
        self.find_linked(email).0
    }

    pub fn linked_credential(&self, email: &str) -> Credential {
        self.find_linked(email).1
    }

    fn find_linked(&self, email: &str) -> (UserId, Credential) {
        let session = self.snapshot();
        let account = session
            .linked_accounts
            .iter()
            .find(|a| a.email == email)
            .unwrap_or_else(|| panic!("no linked account for {email}"));
        (account.id.clone(), account.credential.clone())
    }
}

/// Whenever authenticated, the registry entry matching the active user
/// must carry the active credential.
pub fn assert_sync_invariant(session: &Session) {
    if !session.is_authenticated() {
        return;
    }

    let user = session.active_user.as_ref().unwrap();
    let credential = session.active_credential.as_ref().unwrap();
    let entry = session
        .linked_account(&user.id)
        .expect("active user must have a registry entry");
    assert_eq!(&entry.credential, credential);

    let matching = session
        .linked_accounts
        .iter()
        .filter(|a| a.id == user.id)
        .count();
    assert_eq!(matching, 1);
}
