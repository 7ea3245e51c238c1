//! Translation tables.
//!
//! Keys are symbolic and prefixed with `~` (`~LATITUDE`, `~JAN`). A key
//! missing from the table translates to itself.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::state::Locale;

/// Month label keys, January first.
pub const MONTH_KEYS: [&str; 12] = [
    "~JAN", "~FEB", "~MAR", "~APR", "~MAY", "~JUN", "~JUL", "~AUG", "~SEP", "~OCT", "~NOV", "~DEC",
];

type Table = HashMap<String, String>;

fn source(locale: Locale) -> &'static str {
    match locale {
        Locale::EnUs => include_str!("lang/en-us.json"),
        Locale::Es => include_str!("lang/es.json"),
    }
}

fn parse(locale: Locale) -> Table {
    match serde_json::from_str(source(locale)) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Translation table {} is malformed: {}", locale.code(), e);
            Table::new()
        }
    }
}

fn table(locale: Locale) -> &'static Table {
    static EN_US: OnceLock<Table> = OnceLock::new();
    static ES: OnceLock<Table> = OnceLock::new();
    match locale {
        Locale::EnUs => EN_US.get_or_init(|| parse(Locale::EnUs)),
        Locale::Es => ES.get_or_init(|| parse(Locale::Es)),
    }
}

/// Localized string for `key`, or `key` itself when untranslated.
pub fn translate<'a>(key: &'a str, locale: Locale) -> &'a str {
    match table(locale).get(key) {
        Some(text) => text.as_str(),
        None => key,
    }
}

/// Twelve month labels in `locale`.
pub fn month_labels(locale: Locale) -> [&'static str; 12] {
    MONTH_KEYS.map(|key| translate(key, locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert_eq!(translate("~LATITUDE", Locale::EnUs), "Latitude");
        assert_eq!(translate("~LATITUDE", Locale::Es), "Latitud");
        assert_eq!(translate("~POLAR_NIGHT", Locale::Es), "Noche polar");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        assert_eq!(translate("~NOT_A_KEY", Locale::EnUs), "~NOT_A_KEY");
        assert_eq!(translate("plain", Locale::Es), "plain");
    }

    #[test]
    fn test_tables_cover_same_keys() {
        let en = table(Locale::EnUs);
        let es = table(Locale::Es);
        assert!(!en.is_empty());
        for key in en.keys() {
            assert!(es.contains_key(key), "{key} missing from es");
        }
    }

    #[test]
    fn test_month_labels() {
        let en = month_labels(Locale::EnUs);
        let es = month_labels(Locale::Es);
        assert_eq!(en[0], "Jan");
        assert_eq!(es[0], "Ene");
        assert_eq!(es[11], "Dic");
    }
}
