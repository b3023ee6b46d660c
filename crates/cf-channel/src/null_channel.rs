use crate::channel::NotificationChannel;
use crate::ChannelResult;

use cf_core::Credential;

use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;

/// Channel implementation used when push delivery is disabled.
///
/// Tracks the connected credential so the idempotence contract is
/// observable, but moves no bytes.
#[derive(Default)]
pub struct NullChannel {
    connected: Mutex<Option<Credential>>,
}

impl NullChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The credential the channel is currently connected with, if any.
    pub fn connected_credential(&self) -> Option<Credential> {
        self.connected
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl NotificationChannel for NullChannel {
    async fn connect(&self, credential: &Credential) -> ChannelResult<()> {
        let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());

        if connected.as_ref() == Some(credential) {
            debug!("Notification channel already connected with this credential");
            return Ok(());
        }

        *connected = Some(credential.clone());
        debug!("Notification channel connected");
        Ok(())
    }

    async fn disconnect(&self) {
        let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());

        if connected.take().is_some() {
            debug!("Notification channel disconnected");
        }
    }
}
