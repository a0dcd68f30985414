//! Response formatting utilities

use crate::interface::{BotPlatform, ResponseType};

pub trait Formatter: Send + Sync {
    fn platform(&self) -> BotPlatform;
    /// Response type of messages built with this formatter
    fn response_type(&self) -> ResponseType;
    fn bold(&self, text: &str) -> String;
    /// Inline monospace value; the text is escaped as needed
    fn code(&self, text: &str) -> String;
    fn escape(&self, text: &str) -> String;
    /// Help text listing `(command, description)` pairs
    fn format_help(&self, commands: &[(&str, &str)]) -> String;

    fn format_error(&self, label: &str, error: &str) -> String {
        format!("⚠️ {label}: {}", self.escape(error))
    }
}

/// Escape the characters Telegram's HTML parse mode treats as markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Cli
    }

    fn response_type(&self) -> ResponseType {
        ResponseType::Text
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn code(&self, text: &str) -> String {
        text.to_string()
    }

    fn escape(&self, text: &str) -> String {
        text.to_string()
    }

    fn format_help(&self, commands: &[(&str, &str)]) -> String {
        let mut help = String::from("Glucose Monitor Commands:");
        for (name, description) in commands {
            help.push_str(&format!("\n{name} - {description}"));
        }
        help
    }
}

pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Telegram
    }

    fn response_type(&self) -> ResponseType {
        ResponseType::Formatted
    }

    fn bold(&self, text: &str) -> String {
        format!("<b>{}</b>", escape_html(text))
    }

    fn code(&self, text: &str) -> String {
        format!("<code>{}</code>", escape_html(text))
    }

    fn escape(&self, text: &str) -> String {
        escape_html(text)
    }

    fn format_help(&self, commands: &[(&str, &str)]) -> String {
        let mut help = String::from("<b>Glucose Monitor</b>");
        for (name, description) in commands {
            help.push_str(&format!("\n{name} - {}", escape_html(description)));
        }
        help
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(platform: BotPlatform) -> Box<dyn Formatter> {
        match platform {
            BotPlatform::Cli => Box::new(PlainFormatter),
            BotPlatform::Telegram => Box::new(HtmlFormatter),
        }
    }
}
