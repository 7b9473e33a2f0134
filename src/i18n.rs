//! Interface languages and the small string table for fixed labels.
//!
//! Sentences that embed values (distances, key names) are built in
//! `engine::status`; this module only holds the static pieces.

use std::borrow::Cow;

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Russian,
    English,
}

impl Language {
    /// Code stored in the config file.
    pub fn code(self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
        }
    }

    /// Parse a config code, accepting full locale tags like `en-US`.
    pub fn from_code(code: &str) -> Option<Self> {
        let lower = code.trim().to_ascii_lowercase();
        match lower.split(|c| c == '-' || c == '_').next() {
            Some("ru") => Some(Language::Russian),
            Some("en") => Some(Language::English),
            _ => None,
        }
    }

    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Language::Russian => Language::English,
            Language::English => Language::Russian,
        }
    }

    /// Suffix appended to distances on the overlay.
    pub fn meter_suffix(self) -> &'static str {
        match self {
            Language::Russian => "м",
            Language::English => "m",
        }
    }
}

/// Translate a fixed UI label.
pub fn tr_key(key: &str, lang: Language) -> Cow<'static, str> {
    use Language::*;
    match (key, lang) {
        ("Clear markers", Russian) => Cow::Borrowed("Очистить метки"),
        ("Clear markers", English) => Cow::Borrowed("Clear markers"),

        ("Language", Russian) => Cow::Borrowed("Язык: Русский"),
        ("Language", English) => Cow::Borrowed("Language: English"),

        ("Quit", Russian) => Cow::Borrowed("Выход"),
        ("Quit", English) => Cow::Borrowed("Quit"),

        ("Distance", Russian) => Cow::Borrowed("Расстояние: —"),
        ("Distance", English) => Cow::Borrowed("Distance: —"),

        ("Not calibrated", Russian) => Cow::Borrowed("Калибровка не выполнена"),
        ("Not calibrated", English) => Cow::Borrowed("Not calibrated"),

        ("Calibrate first", Russian) => Cow::Borrowed("Сначала выполните калибровку!"),
        ("Calibrate first", English) => Cow::Borrowed("Calibrate first!"),

        ("Points must differ", Russian) => {
            Cow::Borrowed("Точки калибровки должны различаться")
        }
        ("Points must differ", English) => Cow::Borrowed("Calibration points must differ"),

        ("Invalid calibration", Russian) => {
            Cow::Borrowed("Введите корректное положительное число!")
        }
        ("Invalid calibration", English) => Cow::Borrowed("Enter a valid positive number!"),

        ("Hotkey unavailable", Russian) => Cow::Borrowed("Клавиша занята другой программой"),
        ("Hotkey unavailable", English) => Cow::Borrowed("Key is taken by another program"),

        ("Duplicate hotkey", Russian) => Cow::Borrowed("Одна клавиша для двух действий"),
        ("Duplicate hotkey", English) => Cow::Borrowed("One key bound to two actions"),

        _ => Cow::Owned(key.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in [Language::Russian, Language::English] {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn locale_tags_are_accepted() {
        assert_eq!(Language::from_code("en-US"), Some(Language::English));
        assert_eq!(Language::from_code("ru_RU"), Some(Language::Russian));
        assert_eq!(Language::from_code("de"), None);
    }

    #[test]
    fn toggle_flips_between_both_languages() {
        assert_eq!(Language::Russian.toggled(), Language::English);
        assert_eq!(Language::English.toggled().toggled(), Language::English);
    }

    #[test]
    fn tr_key_localisation_en_ru() {
        assert_eq!(tr_key("Quit", Language::English).as_ref(), "Quit");
        assert_eq!(tr_key("Quit", Language::Russian).as_ref(), "Выход");
        assert_eq!(tr_key("UnknownKey", Language::Russian).as_ref(), "UnknownKey");
    }
}
