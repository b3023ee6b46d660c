use crate::ChannelResult;

use cf_core::Credential;

use async_trait::async_trait;

/// Long-lived push channel that must always reflect the active
/// credential.
///
/// Contract:
/// - `connect` while already connected with the same credential is a
///   no-op; with a different credential it re-authenticates the
///   channel.
/// - `disconnect` is always safe, including when never connected.
///
/// Transport is out of scope here; the session manager only depends on
/// this contract.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn connect(&self, credential: &Credential) -> ChannelResult<()>;

    async fn disconnect(&self);
}
