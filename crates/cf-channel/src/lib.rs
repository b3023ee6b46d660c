pub mod channel;
pub mod error;
pub mod null_channel;

pub use channel::NotificationChannel;
pub use error::{ChannelError, Result as ChannelResult};
pub use null_channel::NullChannel;
