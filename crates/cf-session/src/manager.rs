use crate::persistence::SessionStorage;
use crate::{validation, AuthOutcome, RoleSwitchOutcome, Session, SessionError, SessionResult};

use cf_api::{AuthApi, ProfileApi, ProfileUpdate, RegisterRequest};
use cf_channel::NotificationChannel;
use cf_core::{AccountRole, Credential, UserId, UserRecord};
use cf_store::KeyValueStore;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use log::{info, warn};

/// Owns the linked-account registry, the active account and its
/// credential, their persistence, and the notification channel's
/// authentication state.
///
/// Constructed once at process start and handed to the UI layer; all
/// collaborators are injected so tests run against fakes. State reads
/// are snapshots; mutations happen only inside the operations below.
///
/// Operations are expected to be serialized by the caller (a user
/// cannot trigger two switches at once). Concurrent calls are safe -
/// the state lock is never held across an await, so the worst case is
/// last-write-wins on the session fields, never a torn registry.
pub struct SessionManager {
    auth_api: Arc<dyn AuthApi>,
    profile_api: Arc<dyn ProfileApi>,
    channel: Arc<dyn NotificationChannel>,
    storage: SessionStorage,
    state: RwLock<Session>,
    // Handle to self for spawning the background refresh task
    weak_self: Weak<SessionManager>,
}

impl SessionManager {
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        profile_api: Arc<dyn ProfileApi>,
        store: Arc<dyn KeyValueStore>,
        channel: Arc<dyn NotificationChannel>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            auth_api,
            profile_api,
            channel,
            storage: SessionStorage::new(store),
            state: RwLock::new(Session::new()),
            weak_self: weak_self.clone(),
        })
    }

    /// Current session state as an owned snapshot.
    pub fn snapshot(&self) -> Session {
        self.read_state().clone()
    }

    /// Restore persisted session state from the durable store.
    ///
    /// With a stored credential and user the session is optimistically
    /// authenticated immediately, the notification channel is opened,
    /// and a background `whoami` refreshes the cached user: a rejected
    /// credential signs the account out locally, a transient failure
    /// keeps the optimistic state. Without a stored credential only
    /// the linked-account registry is restored, so the account picker
    /// still shows previously used accounts.
    ///
    /// This is the only operation that runs automatically; everything
    /// else is user-triggered.
    pub async fn initialize(&self) {
        let credential = self.storage.load_credential();
        let user = self.storage.load_user();
        let linked_accounts = self.storage.load_linked_accounts();

        let restored = match (credential, user) {
            (Some(credential), Some(user)) => Some((credential, user)),
            _ => None,
        };

        {
            let mut state = self.write_state();
            state.linked_accounts = linked_accounts;
            if let Some((credential, user)) = &restored {
                state.active_credential = Some(credential.clone());
                state.active_user = Some(user.clone());
            }
            state.is_loading = false;
        }

        match restored {
            Some((credential, user)) => {
                info!("Restored session for user {}", user.id);
                self.connect_channel(&credential).await;

                if let Some(manager) = self.weak_self.upgrade() {
                    tokio::spawn(async move {
                        manager.refresh_active_user().await;
                    });
                }
            }
            None => {
                info!("No persisted session, starting logged out");
            }
        }
    }

    /// Tear down live resources without touching persisted state.
    pub async fn dispose(&self) {
        self.channel.disconnect().await;
    }

    /// Register a new account and make it the active session.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: AccountRole,
    ) -> SessionResult<AuthOutcome> {
        validation::validate_email(email)?;
        validation::validate_password(password)?;

        self.begin_operation();

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            role,
        };

        let result = match self.auth_api.register(&request).await {
            Ok(response) => self
                .install_authenticated(response.credential, response.user)
                .await
                .map(|()| AuthOutcome {
                    verification_required: response.verification_required,
                }),
            Err(e) => Err(SessionError::from_api(e)),
        };

        self.finish_operation(result.as_ref().err());
        result
    }

    /// Authenticate an existing account and make it the active session.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<AuthOutcome> {
        validation::validate_email(email)?;
        validation::validate_password(password)?;

        self.begin_operation();

        let result = match self.auth_api.login(email, password).await {
            Ok(response) => self
                .install_authenticated(response.credential, response.user)
                .await
                .map(|()| AuthOutcome {
                    verification_required: response.verification_required,
                }),
            Err(e) => Err(SessionError::from_api(e)),
        };

        self.finish_operation(result.as_ref().err());
        result
    }

    /// Sign the active account out.
    ///
    /// The server-side logout is best-effort; local state is always
    /// cleared, which is why this never reports failure. The account
    /// stays in the linked registry for a later `switch_to`.
    pub async fn sign_out(&self) {
        let credential = self.read_state().active_credential.clone();

        if let Some(credential) = credential {
            if let Err(e) = self.auth_api.logout(&credential).await {
                warn!("Server-side logout failed, clearing local state anyway: {e}");
            }
        }

        self.clear_active_session().await;
        info!("Signed out");
    }

    /// Sign out and forget every linked account on this device.
    ///
    /// Irreversible client-side: each credential must be re-obtained
    /// via a fresh login.
    pub async fn sign_out_everywhere(&self) {
        self.sign_out().await;

        self.storage.clear_linked_accounts();
        self.write_state().linked_accounts.clear();
        info!("Cleared all linked accounts");
    }

    /// Switch the active session to a previously linked account.
    ///
    /// The swap commits atomically: on any failure the prior
    /// credential, user and channel state are still in place. A target
    /// whose stored credential the server rejects is pruned from the
    /// registry and reported as `SessionExpired` - the caller must
    /// prompt a fresh login; there is no auto-fallback to another
    /// account.
    pub async fn switch_to(&self, account_id: &UserId) -> SessionResult<()> {
        self.begin_operation();
        let result = self.perform_switch(account_id).await;
        self.finish_operation(result.as_ref().err());
        result
    }

    async fn perform_switch(&self, account_id: &UserId) -> SessionResult<()> {
        let (target, previous_credential) = {
            let state = self.read_state();
            let target = state
                .linked_account(account_id)
                .cloned()
                .ok_or_else(|| SessionError::account_not_found(account_id))?;
            (target, state.active_credential.clone())
        };

        // The channel follows the candidate credential for the
        // duration of the attempt and is re-pointed at the prior
        // identity on failure.
        self.channel.disconnect().await;
        self.connect_channel(&target.credential).await;

        match self.auth_api.whoami(&target.credential).await {
            Ok(user) => {
                if let Err(e) = self.storage.persist_active(&target.credential, &user) {
                    self.restore_channel(previous_credential.as_ref()).await;
                    return Err(e);
                }

                let accounts = {
                    let mut state = self.write_state();
                    state.active_credential = Some(target.credential.clone());
                    state.active_user = Some(user.clone());
                    state.upsert_linked_account(&user, target.credential.clone());
                    state.linked_accounts.clone()
                };
                self.storage.persist_linked_accounts(&accounts);

                info!("Switched active session to user {}", user.id);
                Ok(())
            }
            Err(e) if e.is_unauthorized() => {
                // The stored credential is dead: prune the entry, keep
                // the prior session active.
                let accounts = {
                    let mut state = self.write_state();
                    state.remove_linked_account(account_id);
                    state.linked_accounts.clone()
                };
                self.storage.persist_linked_accounts(&accounts);
                self.restore_channel(previous_credential.as_ref()).await;

                warn!("Switch target {account_id} had a revoked credential, pruned");
                Err(SessionError::session_expired())
            }
            Err(e) => {
                self.restore_channel(previous_credential.as_ref()).await;
                Err(SessionError::from_api(e))
            }
        }
    }

    /// Upsert the linked-account registry entry for `user` and persist
    /// the registry.
    pub fn record_linked_account(&self, user: &UserRecord, credential: Credential) {
        let accounts = {
            let mut state = self.write_state();
            state.upsert_linked_account(user, credential);
            state.linked_accounts.clone()
        };
        self.storage.persist_linked_accounts(&accounts);
    }

    /// Remove an account from the linked registry.
    ///
    /// Removing the active account clears the active session (locally
    /// only) first, so the device never keeps a linked entry whose
    /// session was just torn down. Blocking removal of the *last*
    /// linked account is the caller's policy, not enforced here.
    pub async fn remove_linked_account(&self, account_id: &UserId) -> SessionResult<()> {
        let (exists, is_active) = {
            let state = self.read_state();
            let exists = state.linked_account(account_id).is_some();
            let is_active = state
                .active_user
                .as_ref()
                .is_some_and(|user| &user.id == account_id);
            (exists, is_active)
        };

        if !exists {
            return Err(SessionError::account_not_found(account_id));
        }

        if is_active {
            self.clear_active_session().await;
        }

        let accounts = {
            let mut state = self.write_state();
            state.remove_linked_account(account_id);
            state.linked_accounts.clone()
        };
        self.storage.persist_linked_accounts(&accounts);

        info!("Unlinked account {account_id}");
        Ok(())
    }

    /// Send a partial profile update and install the server's full
    /// returned record.
    ///
    /// The returned record replaces the cached user wholesale - no
    /// client-side field merge, so a stale nested object can never
    /// survive a partial update.
    pub async fn update_active_user(&self, update: &ProfileUpdate) -> SessionResult<UserRecord> {
        let (credential, user_id) = self.require_authenticated()?;

        self.begin_operation();

        let result = match self
            .profile_api
            .update_profile(&credential, &user_id, update)
            .await
        {
            Ok(user) => self
                .install_refreshed_user(&credential, user.clone())
                .map(|()| user),
            Err(e) if e.is_unauthorized() => {
                self.clear_active_session().await;
                Err(SessionError::session_expired())
            }
            Err(e) => Err(SessionError::from_api(e)),
        };

        self.finish_operation(result.as_ref().err());
        result
    }

    /// Switch the active account's role, then re-fetch and install the
    /// full user record.
    ///
    /// Forwards whether the new role requires verification; the caller
    /// branches navigation on it.
    pub async fn switch_role(&self, new_role: AccountRole) -> SessionResult<RoleSwitchOutcome> {
        let (credential, _) = self.require_authenticated()?;

        self.begin_operation();
        let result = self.perform_role_switch(&credential, new_role).await;
        self.finish_operation(result.as_ref().err());
        result
    }

    async fn perform_role_switch(
        &self,
        credential: &Credential,
        new_role: AccountRole,
    ) -> SessionResult<RoleSwitchOutcome> {
        let response = match self.profile_api.switch_role(credential, new_role).await {
            Ok(response) => response,
            Err(e) if e.is_unauthorized() => {
                self.clear_active_session().await;
                return Err(SessionError::session_expired());
            }
            Err(e) => return Err(SessionError::from_api(e)),
        };

        // The switch endpoint confirms the change; the full record
        // comes from whoami.
        let user = match self.auth_api.whoami(credential).await {
            Ok(user) => user,
            Err(e) if e.is_unauthorized() => {
                self.clear_active_session().await;
                return Err(SessionError::session_expired());
            }
            Err(e) => return Err(SessionError::from_api(e)),
        };

        self.install_refreshed_user(credential, user)?;

        Ok(RoleSwitchOutcome {
            verification_required: response.requires_verification,
        })
    }

    /// Re-fetch the active user with the active credential and install
    /// the result.
    ///
    /// Runs in the background after [`Self::initialize`]. A rejected
    /// credential clears the active session locally; transient
    /// failures keep the optimistic state.
    pub async fn refresh_active_user(&self) {
        let Some(credential) = self.read_state().active_credential.clone() else {
            return;
        };

        match self.auth_api.whoami(&credential).await {
            Ok(user) => {
                if let Err(e) = self.install_refreshed_user(&credential, user) {
                    warn!("Failed to persist refreshed user: {e}");
                }
            }
            Err(e) if e.is_unauthorized() => {
                info!("Persisted credential rejected by the server, signing out locally");
                self.clear_active_session().await;
            }
            Err(e) => {
                warn!("Background user refresh failed, keeping cached session: {e}");
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Commit a freshly authenticated identity: write-through to the
    /// store, re-point the channel, then update memory and the linked
    /// registry.
    async fn install_authenticated(
        &self,
        credential: Credential,
        user: UserRecord,
    ) -> SessionResult<()> {
        self.storage.persist_active(&credential, &user)?;

        self.channel.disconnect().await;
        self.connect_channel(&credential).await;

        let accounts = {
            let mut state = self.write_state();
            state.active_credential = Some(credential.clone());
            state.active_user = Some(user.clone());
            state.upsert_linked_account(&user, credential);
            state.linked_accounts.clone()
        };
        self.storage.persist_linked_accounts(&accounts);

        info!("Authenticated as user {}", user.id);
        Ok(())
    }

    /// Install a server-returned user record for the already-active
    /// credential: persist, replace the cached user wholesale, refresh
    /// the linked registry projection.
    fn install_refreshed_user(
        &self,
        credential: &Credential,
        user: UserRecord,
    ) -> SessionResult<()> {
        self.storage.persist_user(&user)?;

        let accounts = {
            let mut state = self.write_state();
            state.active_user = Some(user.clone());
            state.upsert_linked_account(&user, credential.clone());
            state.linked_accounts.clone()
        };
        self.storage.persist_linked_accounts(&accounts);

        Ok(())
    }

    /// Local-only teardown of the active session: channel, store,
    /// memory. Leaves the linked registry alone.
    async fn clear_active_session(&self) {
        self.channel.disconnect().await;
        self.storage.clear_active();

        let mut state = self.write_state();
        state.active_credential = None;
        state.active_user = None;
        state.is_loading = false;
    }

    async fn connect_channel(&self, credential: &Credential) {
        // Connect failures are non-fatal: the session stays valid
        // without live notifications.
        if let Err(e) = self.channel.connect(credential).await {
            warn!("Notification channel connect failed: {e}");
        }
    }

    /// Re-point the channel at the prior identity after a failed
    /// switch attempt.
    async fn restore_channel(&self, previous: Option<&Credential>) {
        self.channel.disconnect().await;
        if let Some(credential) = previous {
            self.connect_channel(credential).await;
        }
    }

    fn require_authenticated(&self) -> SessionResult<(Credential, UserId)> {
        let state = self.read_state();
        match (&state.active_credential, &state.active_user) {
            (Some(credential), Some(user)) => Ok((credential.clone(), user.id.clone())),
            _ => Err(SessionError::not_authenticated()),
        }
    }

    fn begin_operation(&self) {
        let mut state = self.write_state();
        state.is_loading = true;
        state.last_error = None;
    }

    fn finish_operation(&self, error: Option<&SessionError>) {
        let mut state = self.write_state();
        state.is_loading = false;
        state.last_error = error.map(SessionError::user_message);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
