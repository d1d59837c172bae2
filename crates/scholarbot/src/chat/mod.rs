//! Assistant chat transcript, attachment limits, and plain-text export.

mod responder;

pub use responder::{ClockPicker, ReplyPicker, SimulatedResponder, CANNED_REPLIES};

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ValidationError;

/// 5 MiB.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

pub type SharedTranscript = Arc<Mutex<ChatTranscript>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub const fn export_label(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Bot => "BOT",
        }
    }
}

/// File metadata carried with a message; the bytes themselves are never handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
        limit_bytes: u64,
    ) -> Result<Self, ValidationError> {
        if size_bytes > limit_bytes {
            return Err(ValidationError::AttachmentTooLarge {
                size_bytes,
                limit_bytes,
            });
        }

        Ok(Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        })
    }

    /// Size rendered the way the message list shows it, e.g. `12.5 KB`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

/// Ordered conversation with the assistant. The first message is the greeting kept by `clear`.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending_replies: usize,
}

impl ChatTranscript {
    pub fn new(history: Vec<ChatMessage>) -> Self {
        let next_id = history.len() as u64 + 1;
        Self {
            messages: history,
            next_id,
            pending_replies: 0,
        }
    }

    pub fn shared(self) -> SharedTranscript {
        Arc::new(Mutex::new(self))
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    /// Record a user message. Blank text is allowed only alongside an attachment.
    pub fn send(
        &mut self,
        content: &str,
        attachment: Option<Attachment>,
        at: DateTime<Utc>,
    ) -> Result<&ChatMessage, ValidationError> {
        let content = content.trim();
        if content.is_empty() && attachment.is_none() {
            return Err(ValidationError::EmptyMessage);
        }

        Ok(self.append(Sender::User, content.to_string(), attachment, at))
    }

    pub fn push_bot(&mut self, content: impl Into<String>, at: DateTime<Utc>) -> &ChatMessage {
        self.append(Sender::Bot, content.into(), None, at)
    }

    pub(crate) fn begin_reply(&mut self) {
        self.pending_replies += 1;
    }

    pub(crate) fn finish_reply(
        &mut self,
        content: impl Into<String>,
        at: DateTime<Utc>,
    ) -> &ChatMessage {
        self.pending_replies = self.pending_replies.saturating_sub(1);
        self.push_bot(content, at)
    }

    /// Drop everything but the opening greeting.
    pub fn clear(&mut self) {
        self.messages.truncate(1);
    }

    pub fn export(&self) -> String {
        self.export_in(&Local)
    }

    /// `[<time>] <SENDER>: <content>` per message, newline separated.
    pub fn export_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.messages
            .iter()
            .map(|message| {
                format!(
                    "[{}] {}: {}",
                    message.timestamp.with_timezone(tz).format("%-I:%M:%S %p"),
                    message.sender.export_label(),
                    message.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the export into `dir` and return the file path.
    pub fn export_to(&self, dir: &Path, date: NaiveDate) -> std::io::Result<PathBuf> {
        let path = dir.join(export_file_name(date));
        std::fs::write(&path, self.export())?;
        info!(path = %path.display(), messages = self.messages.len(), "chat exported");
        Ok(path)
    }

    fn append(
        &mut self,
        sender: Sender,
        content: String,
        attachment: Option<Attachment>,
        at: DateTime<Utc>,
    ) -> &ChatMessage {
        let id = format!("msg-{}", self.next_id);
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            sender,
            content,
            timestamp: at,
            attachment,
        });
        &self.messages[self.messages.len() - 1]
    }
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("vidyavikas-chat-{}.txt", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 15, hour, minute, 0)
            .single()
            .expect("valid timestamp")
    }

    fn transcript() -> ChatTranscript {
        let mut transcript = ChatTranscript::default();
        transcript.push_bot("Hello! How can I help?", at(10, 0));
        transcript
    }

    #[test]
    fn send_rejects_blank_message_without_attachment() {
        let mut transcript = transcript();
        let err = transcript
            .send("   ", None, at(10, 1))
            .expect_err("blank message");
        assert_eq!(err, ValidationError::EmptyMessage);
        assert_eq!(transcript.messages().len(), 1);
    }

    #[test]
    fn send_accepts_attachment_only_message() {
        let mut transcript = transcript();
        let attachment = Attachment::new("transcript.pdf", 2048, "application/pdf", 4096)
            .expect("under limit");
        let message = transcript
            .send("", Some(attachment), at(10, 1))
            .expect("attachment alone is enough");
        assert_eq!(message.content, "");
        assert_eq!(
            message.attachment.as_ref().map(Attachment::size_label),
            Some("2.0 KB".to_string())
        );
    }

    #[test]
    fn attachment_over_limit_is_rejected() {
        let err = Attachment::new(
            "video.mov",
            DEFAULT_MAX_ATTACHMENT_BYTES + 1,
            "video/quicktime",
            DEFAULT_MAX_ATTACHMENT_BYTES,
        )
        .expect_err("too large");
        assert!(matches!(err, ValidationError::AttachmentTooLarge { .. }));

        Attachment::new(
            "exact.bin",
            DEFAULT_MAX_ATTACHMENT_BYTES,
            "application/octet-stream",
            DEFAULT_MAX_ATTACHMENT_BYTES,
        )
        .expect("limit itself is allowed");
    }

    #[test]
    fn clear_keeps_only_the_greeting() {
        let mut transcript = transcript();
        transcript.send("hi", None, at(10, 1)).expect("sent");
        transcript.push_bot("hello", at(10, 2));
        transcript.clear();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].content, "Hello! How can I help?");
    }

    #[test]
    fn export_renders_one_line_per_message() {
        let mut transcript = transcript();
        transcript
            .send("  Any STEM grants?  ", None, at(14, 5))
            .expect("sent");
        let export = transcript.export_in(&Utc);
        assert_eq!(
            export,
            "[10:00:00 AM] BOT: Hello! How can I help?\n[2:05:00 PM] USER: Any STEM grants?"
        );
    }

    #[test]
    fn export_file_name_uses_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 15).expect("valid date");
        assert_eq!(export_file_name(date), "vidyavikas-chat-2024-09-15.txt");
    }

    #[test]
    fn export_to_writes_file() {
        let dir = std::env::temp_dir().join(format!("scholarbot-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let date = NaiveDate::from_ymd_opt(2024, 9, 15).expect("valid date");

        let path = transcript().export_to(&dir, date).expect("export written");
        let written = std::fs::read_to_string(&path).expect("readable");
        assert!(written.ends_with("BOT: Hello! How can I help?"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
