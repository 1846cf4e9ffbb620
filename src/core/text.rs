//! Character normalization and fixed-width packing.
//!
//! CNAB files are read by mainframe parsers that count bytes, not
//! characters, so every value is reduced to a one-byte-per-character
//! alphabet before it is padded into its slot.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Reduce text to upper-case ASCII letters, digits, space, `@`, `.` and `-`.
///
/// Diacritics are removed through canonical decomposition, so `"São João"`
/// becomes `"SAO JOAO"`. Every other character is replaced by a space.
pub fn normalize_text(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '@' | '.' | '-') {
                c.to_ascii_uppercase()
            } else {
                ' '
            }
        })
        .collect()
}

/// Normalize and left-pad with `0` to exactly `width` characters.
///
/// Longer values keep their leading `width` characters.
pub fn pack_numeric(value: &str, width: usize) -> String {
    pack(value, width, '0', Align::Right)
}

/// Normalize and right-pad with spaces to exactly `width` characters.
pub fn pack_text(value: &str, width: usize) -> String {
    pack(value, width, ' ', Align::Left)
}

/// Keep only ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

enum Align {
    Left,
    Right,
}

fn pack(value: &str, width: usize, fill: char, align: Align) -> String {
    let normalized = normalize_text(value);
    let len = normalized.len();
    let mut out = String::with_capacity(width.max(len));
    if len < width {
        let padding = std::iter::repeat_n(fill, width - len);
        match align {
            Align::Left => {
                out.push_str(&normalized);
                out.extend(padding);
            }
            Align::Right => {
                out.extend(padding);
                out.push_str(&normalized);
            }
        }
    } else {
        // normalized text is pure ASCII, byte slicing is safe
        out.push_str(&normalized[..width]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_uppercases() {
        assert_eq!(normalize_text("Ação Ltda"), "ACAO LTDA");
        assert_eq!(normalize_text("Pão de Açúcar"), "PAO DE ACUCAR");
    }

    #[test]
    fn replaces_unsupported_characters() {
        assert_eq!(normalize_text("a/b_c&d"), "A B C D");
        assert_eq!(normalize_text("joao@acme.com.br"), "JOAO@ACME.COM.BR");
        assert_eq!(normalize_text("ß"), " ");
    }

    #[test]
    fn numeric_pads_left_with_zeros() {
        assert_eq!(pack_numeric("42", 5), "00042");
        assert_eq!(pack_numeric("", 3), "000");
    }

    #[test]
    fn text_pads_right_with_spaces() {
        assert_eq!(pack_text("abc", 5), "ABC  ");
        assert_eq!(pack_text("", 2), "  ");
    }

    #[test]
    fn oversized_values_keep_the_leading_part() {
        assert_eq!(pack_text("FORNECEDOR", 4), "FORN");
        assert_eq!(pack_numeric("123456", 4), "1234");
    }

    #[test]
    fn width_counts_normalized_characters() {
        // "É" is two bytes in UTF-8 but one CNAB position
        assert_eq!(pack_text("É", 3), "E  ");
    }

    #[test]
    fn digits_only_drops_punctuation() {
        assert_eq!(digits_only("12.345.678/0001-99"), "12345678000199");
    }
}
