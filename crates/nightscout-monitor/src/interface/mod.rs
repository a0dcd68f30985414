//! Bot platform interfaces
//!
//! Platform-agnostic reply types handed to the host chat framework.

pub mod formatter;
pub mod response;

pub use formatter::{Formatter, FormatterFactory, HtmlFormatter, PlainFormatter, escape_html};
pub use response::{
    ActionType, Attachment, AttachmentContent, AttachmentType, BotPlatform, BotResponse,
    ResponseType, SuggestedAction,
};
