mod channel;
mod dispatcher;
mod message;
mod queue;
mod recipient;

pub use channel::{ActiveChannel, ChannelError, LogChannel, NotificationChannel, TelegramChannel};
pub use dispatcher::{DeliveryErrorKind, DeliveryResult, NotificationDispatcher};
pub use message::render_alert_message;
pub use queue::{DispatchHandle, DispatchQueue, DispatchStats, QueueError};
pub use recipient::{RecipientError, validate_recipient};
