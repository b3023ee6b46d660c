//! Programmable in-memory fakes for the session manager's
//! collaborators.

use cf_api::{
    ApiError, ApiResult, AuthApi, AuthResponse, ProfileApi, ProfileUpdate, RegisterRequest,
    RoleSwitchResponse,
};
use cf_channel::{ChannelError, ChannelResult, NotificationChannel};
use cf_core::{AccountRole, Credential, ProfileData, UserId, UserRecord};
use cf_store::{KeyValueStore, MemoryStore, StoreError, StoreResult};

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

// =========================================================================
// FakeAuthApi / FakeProfileApi
// =========================================================================

struct FakeAccount {
    user: UserRecord,
    password: String,
}

struct FakeServerState {
    accounts: Vec<FakeAccount>,
    // token -> account id
    credentials: HashMap<String, UserId>,
    revoked: HashSet<String>,
    next_token: u64,
    network_down: bool,
    logout_calls: u32,
}

/// In-memory stand-in for the platform's authentication and profile
/// endpoints. Shared by [`FakeAuthApi`] and [`FakeProfileApi`] so a
/// profile update is visible to a later `whoami`.
pub struct FakeServer {
    state: Mutex<FakeServerState>,
}

impl FakeServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeServerState {
                accounts: Vec::new(),
                credentials: HashMap::new(),
                revoked: HashSet::new(),
                next_token: 0,
                network_down: false,
                logout_calls: 0,
            }),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeServerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Simulate the network being unreachable for every endpoint.
    pub fn set_network_down(&self, down: bool) {
        self.lock().network_down = down;
    }

    /// Revoke a previously issued credential; the next use fails
    /// unauthorized.
    pub fn revoke(&self, credential: &Credential) {
        self.lock().revoked.insert(credential.as_str().to_string());
    }

    pub fn logout_calls(&self) -> u32 {
        self.lock().logout_calls
    }

    /// Overwrite the stored profile of an account, as if edited from
    /// another device.
    pub fn set_profile(&self, id: &UserId, profile: ProfileData) {
        let mut state = self.lock();
        if let Some(account) = state.accounts.iter_mut().find(|a| &a.user.id == id) {
            account.user.profile = profile;
        }
    }

    fn issue_credential(state: &mut FakeServerState, id: &UserId) -> Credential {
        state.next_token += 1;
        let token = format!("tok-{}", state.next_token);
        state.credentials.insert(token.clone(), id.clone());
        Credential::new(token)
    }

    fn authenticate(state: &FakeServerState, credential: &Credential) -> ApiResult<UserId> {
        let token = credential.as_str();
        if state.revoked.contains(token) {
            return Err(ApiError::unauthorized("Credential is no longer valid"));
        }
        match state.credentials.get(token) {
            Some(id) => Ok(id.clone()),
            None => Err(ApiError::unauthorized("Unknown credential")),
        }
    }

    fn user_by_id(state: &FakeServerState, id: &UserId) -> ApiResult<UserRecord> {
        state
            .accounts
            .iter()
            .find(|a| &a.user.id == id)
            .map(|a| a.user.clone())
            .ok_or_else(|| ApiError::not_found("No such user"))
    }

    // Transport errors cannot be fabricated from reqwest; a 503 is the
    // same transient class as far as the session manager is concerned.
    fn network_error() -> ApiError {
        ApiError::server(503, "network unreachable")
    }
}

pub struct FakeAuthApi {
    server: Arc<FakeServer>,
}

impl FakeAuthApi {
    pub fn new(server: Arc<FakeServer>) -> Arc<Self> {
        Arc::new(Self { server })
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        let mut state = self.server.lock();
        if state.network_down {
            return Err(FakeServer::network_error());
        }

        if state.accounts.iter().any(|a| a.user.email == request.email) {
            return Err(ApiError::bad_request(
                "EMAIL_TAKEN",
                "An account with this email already exists",
            ));
        }

        let user = UserRecord {
            id: UserId::new(uuid::Uuid::new_v4().to_string()),
            email: request.email.clone(),
            role: request.role,
            profile: ProfileData::default(),
            onboarding_complete: false,
            created_at: Utc::now(),
        };
        state.accounts.push(FakeAccount {
            user: user.clone(),
            password: request.password.clone(),
        });

        let credential = FakeServer::issue_credential(&mut state, &user.id);
        Ok(AuthResponse {
            credential,
            user,
            verification_required: request.role.requires_verification(),
        })
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let mut state = self.server.lock();
        if state.network_down {
            return Err(FakeServer::network_error());
        }

        let user = state
            .accounts
            .iter()
            .find(|a| a.user.email == email && a.password == password)
            .map(|a| a.user.clone())
            .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

        let credential = FakeServer::issue_credential(&mut state, &user.id);
        Ok(AuthResponse {
            credential,
            user,
            verification_required: false,
        })
    }

    async fn whoami(&self, credential: &Credential) -> ApiResult<UserRecord> {
        let state = self.server.lock();
        if state.network_down {
            return Err(FakeServer::network_error());
        }

        let id = FakeServer::authenticate(&state, credential)?;
        FakeServer::user_by_id(&state, &id)
    }

    async fn logout(&self, credential: &Credential) -> ApiResult<()> {
        let mut state = self.server.lock();
        state.logout_calls += 1;
        if state.network_down {
            return Err(FakeServer::network_error());
        }

        let token = credential.as_str().to_string();
        state.credentials.remove(&token);
        state.revoked.insert(token);
        Ok(())
    }
}

pub struct FakeProfileApi {
    server: Arc<FakeServer>,
}

impl FakeProfileApi {
    pub fn new(server: Arc<FakeServer>) -> Arc<Self> {
        Arc::new(Self { server })
    }
}

#[async_trait]
impl ProfileApi for FakeProfileApi {
    async fn update_profile(
        &self,
        credential: &Credential,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> ApiResult<UserRecord> {
        let mut state = self.server.lock();
        if state.network_down {
            return Err(FakeServer::network_error());
        }

        let caller = FakeServer::authenticate(&state, credential)?;
        if &caller != user_id {
            return Err(ApiError::bad_request("FORBIDDEN", "Not your profile"));
        }

        let account = state
            .accounts
            .iter_mut()
            .find(|a| &a.user.id == user_id)
            .ok_or_else(|| ApiError::not_found("No such user"))?;

        // Server-side merge of the patch into the stored record; the
        // client installs the returned record wholesale.
        if let Some(ref v) = update.display_name {
            account.user.profile.display_name = Some(v.clone());
        }
        if let Some(ref v) = update.bio {
            account.user.profile.bio = Some(v.clone());
        }
        if let Some(ref v) = update.location {
            account.user.profile.location = Some(v.clone());
        }
        if let Some(ref v) = update.company_name {
            account.user.profile.company_name = Some(v.clone());
        }
        if let Some(ref v) = update.firm_name {
            account.user.profile.firm_name = Some(v.clone());
        }
        if let Some(ref v) = update.website {
            account.user.profile.website = Some(v.clone());
        }
        if let Some(ref v) = update.skills {
            account.user.profile.skills = v.clone();
        }
        if let Some(v) = update.onboarding_complete {
            account.user.onboarding_complete = v;
        }

        Ok(account.user.clone())
    }

    async fn switch_role(
        &self,
        credential: &Credential,
        new_role: AccountRole,
    ) -> ApiResult<RoleSwitchResponse> {
        let mut state = self.server.lock();
        if state.network_down {
            return Err(FakeServer::network_error());
        }

        let caller = FakeServer::authenticate(&state, credential)?;
        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.user.id == caller)
            .ok_or_else(|| ApiError::not_found("No such user"))?;
        account.user.role = new_role;

        Ok(RoleSwitchResponse {
            requires_verification: new_role.requires_verification(),
        })
    }
}

// =========================================================================
// RecordingChannel
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Connected(Credential),
    Disconnected,
}

/// Notification channel fake that records every transition, for
/// asserting the disconnect/connect bracket around credential changes.
#[derive(Default)]
pub struct RecordingChannel {
    connected: Mutex<Option<Credential>>,
    events: Mutex<Vec<ChannelEvent>>,
    fail_connect: AtomicBool,
}

impl RecordingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn connected_credential(&self) -> Option<Credential> {
        self.connected
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn events(&self) -> Vec<ChannelEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_fail_connect(&self, fail: bool) {
        self.fail_connect.store(fail, Ordering::SeqCst);
    }

    fn record(&self, event: ChannelEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn connect(&self, credential: &Credential) -> ChannelResult<()> {
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(ChannelError::connect_failed("injected failure"));
        }

        let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
        if connected.as_ref() == Some(credential) {
            return Ok(());
        }

        *connected = Some(credential.clone());
        drop(connected);
        self.record(ChannelEvent::Connected(credential.clone()));
        Ok(())
    }

    async fn disconnect(&self) {
        let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
        if connected.take().is_some() {
            drop(connected);
            self.record(ChannelEvent::Disconnected);
        }
    }
}

// =========================================================================
// FailingStore
// =========================================================================

/// Store wrapper that can be switched to reject writes, for exercising
/// the blocking commit-path persistence rule.
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::new(),
            fail_writes: AtomicBool::new(false),
        })
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::file_write(
                std::path::PathBuf::from(key),
                std::io::Error::other("injected write failure"),
            ));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}
