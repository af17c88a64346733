use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
};

use teloxide::{prelude::*, types::ParseMode};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ChannelError {
    #[error("send failed: {0}")]
    Send(String),
    #[error("channel unavailable: {0}")]
    Unavailable(String),
}

/// Outbound messaging service. A successful send returns the service's delivery id.
pub trait NotificationChannel: Send + Sync {
    fn name(&self) -> &str;

    fn send(
        &self,
        recipient: &str,
        message: &str,
    ) -> impl Future<Output = Result<String, ChannelError>> + Send;
}

/// Posts alerts into a Telegram chat monitored by the operators.
pub struct TelegramChannel {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramChannel {
    pub fn new(bot_token: &str, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(bot_token),
            chat_id: ChatId(chat_id),
        }
    }
}

impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<String, ChannelError> {
        let html = format!(
            "<b>Scale alert for {}</b>\n{}",
            html_escape::encode_text(recipient),
            html_escape::encode_text(message)
        );

        let sent = self
            .bot
            .send_message(self.chat_id, html)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|error| ChannelError::Send(error.to_string()))?;

        Ok(format!("telegram-{}-{}", self.chat_id.0, sent.id.0))
    }
}

/// Writes alerts to the log. Used when no messaging service is configured.
#[derive(Debug, Default)]
pub struct LogChannel {
    sequence: AtomicU64,
}

impl LogChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationChannel for LogChannel {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<String, ChannelError> {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        log::warn!(
            "alert_notification delivery_id=log-{} recipient={} message={:?}",
            seq,
            recipient,
            message
        );
        Ok(format!("log-{}", seq))
    }
}

pub enum ActiveChannel {
    Telegram(Box<TelegramChannel>),
    Log(LogChannel),
}

impl ActiveChannel {
    pub fn new(telegram: Option<(&str, i64)>) -> Self {
        match telegram {
            Some((bot_token, chat_id)) => {
                Self::Telegram(Box::new(TelegramChannel::new(bot_token, chat_id)))
            }
            None => Self::Log(LogChannel::new()),
        }
    }
}

impl NotificationChannel for ActiveChannel {
    fn name(&self) -> &str {
        match self {
            ActiveChannel::Telegram(channel) => channel.name(),
            ActiveChannel::Log(channel) => channel.name(),
        }
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<String, ChannelError> {
        match self {
            ActiveChannel::Telegram(channel) => channel.send(recipient, message).await,
            ActiveChannel::Log(channel) => channel.send(recipient, message).await,
        }
    }
}
