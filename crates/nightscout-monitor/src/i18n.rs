//! Reply languages and their label sets

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::status::Status;

/// Supported reply languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Language {
    #[default]
    English,
    Russian,
}

impl Language {
    /// Get ISO 639-1 language code
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
        }
    }

    /// Parse from ISO 639-1 code or common name, defaulting to English
    pub fn from_code(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ru" | "russian" | "русский" => Language::Russian,
            _ => Language::English,
        }
    }

    /// Label set for this language
    pub fn labels(self) -> &'static Labels {
        match self {
            Language::English => &ENGLISH,
            Language::Russian => &RUSSIAN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Language::from_code(&s))
    }
}

/// Fixed strings used when composing replies
#[derive(Debug)]
pub struct Labels {
    pub glucose: &'static str,
    pub normal: &'static str,
    pub hypo: &'static str,
    pub hyper: &'static str,
    pub time: &'static str,
    pub minutes_ago: &'static str,
    pub device: &'static str,
    pub unknown_device: &'static str,
    pub raw: &'static str,
    pub noise: &'static str,
    pub delta: &'static str,
    pub no_data: &'static str,
    pub error: &'static str,
    pub chart_failed: &'static str,
}

impl Labels {
    pub fn status(&self, status: Status) -> &'static str {
        match status {
            Status::Normal => self.normal,
            Status::Hypo => self.hypo,
            Status::Hyper => self.hyper,
        }
    }
}

static ENGLISH: Labels = Labels {
    glucose: "Glucose",
    normal: "Normal",
    hypo: "Hypo",
    hyper: "Hyper",
    time: "Time",
    minutes_ago: "min ago",
    device: "Device",
    unknown_device: "unknown",
    raw: "Raw",
    noise: "Noise",
    delta: "Delta",
    no_data: "No data from server.",
    error: "Error",
    chart_failed: "Chart unavailable",
};

static RUSSIAN: Labels = Labels {
    glucose: "Глюкоза",
    normal: "Норма",
    hypo: "Гипо",
    hyper: "Гипер",
    time: "Время",
    minutes_ago: "мин назад",
    device: "Устройство",
    unknown_device: "неизвестно",
    raw: "Raw",
    noise: "Шум",
    delta: "Delta",
    no_data: "Нет данных от сервера.",
    error: "Ошибка",
    chart_failed: "График недоступен",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("ru"), Language::Russian);
        assert_eq!(Language::from_code("Russian"), Language::Russian);
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("ja"), Language::English);
    }

    #[test]
    fn test_status_labels() {
        let labels = Language::English.labels();
        assert_eq!(labels.status(Status::Hyper), "Hyper");
        assert_eq!(Language::Russian.labels().status(Status::Hypo), "Гипо");
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let lang: Language = serde_json::from_str("\"RU\"").unwrap();
        assert_eq!(lang, Language::Russian);
        let lang: Language = serde_json::from_str("\"klingon\"").unwrap();
        assert_eq!(lang, Language::English);
    }
}
