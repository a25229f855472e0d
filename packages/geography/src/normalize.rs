//! Place-name normalization for the administrative index.
//!
//! [`canonicalize`] is applied symmetrically at index time and query time,
//! so "Samborondón", "SAMBORONDON" and " samborondon " all land on the same
//! key. Only combining marks are removed; base letters are never folded
//! into one another.

use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

/// Produces the lookup key for a place name.
///
/// The pipeline:
/// 1. Uppercase
/// 2. Canonical decomposition (NFD)
/// 3. Drop combining marks (accents, tildes, diaeresis)
/// 4. Collapse whitespace and trim
///
/// Uppercasing runs first because some case mappings introduce combining
/// marks; stripping afterwards keeps the function idempotent.
#[must_use]
pub fn canonicalize(input: &str) -> String {
    let upper = input.to_uppercase();
    let stripped: String = upper.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title-cases a raw place name for display.
///
/// Letters are lowercased except the first letter of each word. A word
/// starts after any character that is not a letter or digit, so
/// "ELOY ALFARO (DURÁN)" becomes "Eloy Alfaro (Durán)". Accents are kept.
/// Whitespace is collapsed the same way [`canonicalize`] does.
#[must_use]
pub fn title_case(input: &str) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    let mut word_start = true;
    for c in collapsed.chars() {
        if word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        word_start = !c.is_alphanumeric();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_uppercases() {
        assert_eq!(canonicalize("Samborondón"), "SAMBORONDON");
        assert_eq!(canonicalize("Samborondón"), canonicalize("SAMBORONDON"));
    }

    #[test]
    fn folds_tilde_on_enye() {
        assert_eq!(canonicalize("Rumiñahui"), "RUMINAHUI");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(canonicalize("  pedro   moncayo "), "PEDRO MONCAYO");
        assert_eq!(
            canonicalize("santo\tdomingo\nde los tsáchilas"),
            "SANTO DOMINGO DE LOS TSACHILAS"
        );
    }

    #[test]
    fn handles_decomposed_input() {
        // "e" followed by a combining acute accent
        assert_eq!(canonicalize("Mejie\u{301}"), canonicalize("Mejié"));
    }

    #[test]
    fn is_idempotent() {
        for input in [
            "Samborondón",
            "  Rumiñahui ",
            "straße",
            "ǰ",
            "Zamora Chinchipe",
            "",
            "   ",
            "GALÁPAGOS",
            "Ünïcödé  mïx",
        ] {
            let once = canonicalize(input);
            assert_eq!(canonicalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn keeps_distinct_base_letters_distinct() {
        assert_ne!(canonicalize("Loja"), canonicalize("Lola"));
        assert_ne!(canonicalize("ø"), canonicalize("o"));
    }

    #[test]
    fn empty_input_is_empty_key() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize(" \t "), "");
    }

    #[test]
    fn title_cases_upper_input() {
        assert_eq!(title_case("GUAYAQUIL"), "Guayaquil");
        assert_eq!(title_case("PEDRO  CARBO"), "Pedro Carbo");
    }

    #[test]
    fn title_case_keeps_accents() {
        assert_eq!(title_case("SAMBORONDÓN"), "Samborondón");
        assert_eq!(title_case("ÁNGEL PEDRO GILER"), "Ángel Pedro Giler");
    }

    #[test]
    fn title_case_capitalizes_after_punctuation() {
        assert_eq!(title_case("ELOY ALFARO (DURÁN)"), "Eloy Alfaro (Durán)");
        assert_eq!(title_case("OLMEDO (SAN ALEJO)"), "Olmedo (San Alejo)");
        assert_eq!(title_case("BOLÍVAR (SAGRARIO)"), "Bolívar (Sagrario)");
        assert_eq!(title_case("SAN JOSÉ DE AYORA-CHACO"), "San José De Ayora-Chaco");
    }

    #[test]
    fn title_case_does_not_split_on_digits() {
        assert_eq!(title_case("12 DE MARZO"), "12 De Marzo");
        assert_eq!(title_case("2DO PISO"), "2do Piso");
    }

    #[test]
    fn title_case_of_empty_is_empty() {
        assert_eq!(title_case(""), "");
    }
}
