//! Free-text normalization.
//!
//! The accounting system rejects accented characters in note, group, and
//! reference fields, so those values go through [`strip_accents`].

use ledger_model::Month;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

/// Removes combining marks after canonical decomposition.
///
/// Non-letter characters pass through unchanged.
pub fn strip_accents(text: &str) -> String {
    text.nfd()
        .filter(|ch| canonical_combining_class(*ch) == 0)
        .collect()
}

/// [`strip_accents`] over an optional value; `None` yields an empty string.
pub fn strip_accents_opt(text: Option<&str>) -> String {
    text.map(strip_accents).unwrap_or_default()
}

/// Key for case- and accent-insensitive comparison of headers and names.
pub fn match_key(text: &str) -> String {
    strip_accents(text).trim().to_lowercase()
}

/// Looks up a Spanish month name, ignoring case and accents.
///
/// Accepts `setiembre` as a spelling of September.
pub fn month_from_name_es(name: &str) -> Option<Month> {
    let number = match match_key(name).as_str() {
        "enero" => 1,
        "febrero" => 2,
        "marzo" => 3,
        "abril" => 4,
        "mayo" => 5,
        "junio" => 6,
        "julio" => 7,
        "agosto" => 8,
        "septiembre" | "setiembre" => 9,
        "octubre" => 10,
        "noviembre" => 11,
        "diciembre" => 12,
        _ => return None,
    };
    Month::new(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_spanish_diacritics() {
        assert_eq!(
            strip_accents("Provisión producción Marzo 2024"),
            "Provision produccion Marzo 2024"
        );
        assert_eq!(strip_accents("Señor Ñandú"), "Senor Nandu");
    }

    #[test]
    fn strips_decomposed_input() {
        // "e" followed by a combining acute accent
        assert_eq!(strip_accents("cafe\u{301}"), "cafe");
    }

    #[test]
    fn passes_non_letters_through() {
        assert_eq!(strip_accents("80001\t-/ 1.234,56"), "80001\t-/ 1.234,56");
        assert_eq!(strip_accents(""), "");
    }

    #[test]
    fn absent_text_is_empty() {
        assert_eq!(strip_accents_opt(None), "");
        assert_eq!(strip_accents_opt(Some("Año")), "Ano");
    }

    #[test]
    fn month_names_match_loosely() {
        assert_eq!(month_from_name_es("marzo").map(Month::number), Some(3));
        assert_eq!(month_from_name_es(" MARZO ").map(Month::number), Some(3));
        assert_eq!(month_from_name_es("Setiembre").map(Month::number), Some(9));
        assert_eq!(month_from_name_es("Septiembre").map(Month::number), Some(9));
        assert!(month_from_name_es("march").is_none());
    }

    #[test]
    fn match_key_folds_case_and_accents() {
        assert_eq!(match_key("  Código "), "codigo");
    }
}
