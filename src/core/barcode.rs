//! Boleto and tribute barcode helpers.
//!
//! A boleto is identified by a 44-digit barcode. Payers usually type the
//! 47-digit "linha digitável" instead, which carries the same digits in a
//! different order plus three field check digits.

use super::text::digits_only;

/// Barcode length for both boletos and tributes.
pub const BARCODE_LEN: usize = 44;
/// Linha digitável length of a boleto.
pub const BOLETO_LINE_LEN: usize = 47;
/// Linha digitável length of a tribute / utility bill.
pub const TRIBUTE_LINE_LEN: usize = 48;

/// Normalize a boleto code to its 44-digit barcode.
///
/// Accepts either form with arbitrary punctuation. Returns `None` when the
/// digit count matches neither.
pub fn boleto_barcode(input: &str) -> Option<String> {
    let digits = digits_only(input);
    match digits.len() {
        BARCODE_LEN => Some(digits),
        BOLETO_LINE_LEN => Some(line_to_barcode(&digits)),
        _ => None,
    }
}

/// Reorder a 47-digit linha digitável into barcode order.
///
/// Layout of the line: `AAAMC CCCCX CCCCC CCCCCY CCCCC CCCCCZ K UUUUVVVVVVVVVV`
/// where `K` is the barcode check digit, `UUUU` the due date factor and
/// `V` the amount. `X`, `Y`, `Z` are field check digits and are dropped.
fn line_to_barcode(line: &str) -> String {
    let mut out = String::with_capacity(BARCODE_LEN);
    out.push_str(&line[0..4]);
    out.push_str(&line[32..33]);
    out.push_str(&line[33..47]);
    out.push_str(&line[4..9]);
    out.push_str(&line[10..20]);
    out.push_str(&line[21..31]);
    out
}

/// Modulo-11 general check digit of a boleto barcode.
///
/// `payload` is the 43 digits of the barcode without position 5.
pub fn boleto_check_digit(payload: &str) -> u8 {
    let sum: u32 = payload
        .bytes()
        .rev()
        .zip((2..=9).cycle())
        .map(|(b, weight)| u32::from(b - b'0') * weight)
        .sum();
    match 11 - (sum % 11) {
        0 | 10 | 11 => 1,
        dv => dv as u8,
    }
}

/// Whether a 44-digit boleto barcode carries a correct check digit.
pub fn is_valid_boleto_barcode(barcode: &str) -> bool {
    if barcode.len() != BARCODE_LEN || !barcode.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let payload = format!("{}{}", &barcode[..4], &barcode[5..]);
    barcode.as_bytes()[4] - b'0' == boleto_check_digit(&payload)
}

/// Digits of a tribute barcode if it has a valid shape.
///
/// Tribute (arrecadação) codes start with `8` and come either as the raw
/// 44-digit barcode or as the 48-digit line.
pub fn tribute_barcode(input: &str) -> Option<String> {
    let digits = digits_only(input);
    let shaped = matches!(digits.len(), BARCODE_LEN | TRIBUTE_LINE_LEN);
    (shaped && digits.starts_with('8')).then_some(digits)
}

/// Issuing bank of a boleto: the first three barcode digits.
pub fn issuing_bank(barcode: &str) -> Option<&str> {
    barcode.get(..3).filter(|b| b.bytes().all(|c| c.is_ascii_digit()))
}
