//! Bot reply types
//!
//! A reply is either plain text or an image with caption; the delivery
//! collaborator picks the transport from [`BotResponse::image`].

use crate::chart::RenderedChart;
use serde::{Deserialize, Serialize};

/// Platform identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotPlatform {
    /// Command-line interface
    Cli,

    /// Telegram bot
    #[default]
    Telegram,
}

/// Bot response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotResponse {
    /// Response text, or the caption when an image is attached
    pub content: String,

    /// Response type
    pub response_type: ResponseType,

    /// Attachments (images, charts)
    pub attachments: Vec<Attachment>,

    /// Inline buttons, one inner vector per row
    pub action_rows: Vec<Vec<SuggestedAction>>,
}

/// Type of bot response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    /// Plain text
    Text,

    /// Formatted text (HTML)
    Formatted,

    /// Card with picture and buttons
    Interactive,
}

/// Attachment in a bot response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment type
    pub attachment_type: AttachmentType,

    /// Inline bytes or a URL for the platform to fetch
    pub content: AttachmentContent,

    /// File name
    pub filename: Option<String>,

    /// MIME type
    pub mime_type: String,
}

/// Attachment payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentContent {
    Bytes(Vec<u8>),
    Url(String),
}

/// Type of attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentType {
    /// Image file
    Image,

    /// Chart/graph
    Chart,
}

/// Suggested action for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAction {
    /// Action label
    pub label: String,

    /// Action command or link target
    pub action: String,

    /// Action type
    pub action_type: ActionType,
}

/// Type of action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// External link
    Link,
}

impl BotResponse {
    pub fn new(content: impl Into<String>, response_type: ResponseType) -> Self {
        Self {
            content: content.into(),
            response_type,
            attachments: Vec::new(),
            action_rows: Vec::new(),
        }
    }

    /// Card reply with picture and buttons
    pub fn interactive(content: impl Into<String>) -> Self {
        Self::new(content, ResponseType::Interactive)
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_action_row(mut self, row: Vec<SuggestedAction>) -> Self {
        self.action_rows.push(row);
        self
    }

    /// First image-like attachment, if any
    pub fn image(&self) -> Option<&Attachment> {
        self.attachments.iter().find(|a| {
            matches!(
                a.attachment_type,
                AttachmentType::Image | AttachmentType::Chart
            )
        })
    }

    /// Whether this reply goes out as image-with-caption
    pub fn is_photo(&self) -> bool {
        self.image().is_some()
    }
}

impl Attachment {
    /// Inline PNG chart
    pub fn chart(chart: RenderedChart) -> Self {
        Self {
            attachment_type: AttachmentType::Chart,
            content: AttachmentContent::Bytes(chart.into_bytes()),
            filename: Some(RenderedChart::FILE_NAME.to_string()),
            mime_type: RenderedChart::MIME_TYPE.to_string(),
        }
    }

    /// Remote image referenced by URL
    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            attachment_type: AttachmentType::Image,
            content: AttachmentContent::Url(url.into()),
            filename: None,
            mime_type: "image/*".to_string(),
        }
    }

    /// Inline bytes, when present
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.content {
            AttachmentContent::Bytes(bytes) => Some(bytes),
            AttachmentContent::Url(_) => None,
        }
    }
}

impl SuggestedAction {
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: url.into(),
            action_type: ActionType::Link,
        }
    }
}
