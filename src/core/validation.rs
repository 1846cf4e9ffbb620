use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::barcode;
use super::error::{ValidationError, ValidationWarning, WarningKind};
use super::text::{digits_only, normalize_text};
use super::types::*;

/// Largest amount that fits the 15-digit cents fields of the detail segments.
pub const MAX_AMOUNT: Decimal = dec!(9999999999999.99);

/// Detail sequence numbers are 5 digits and a payment may use two segments.
pub const MAX_PAYMENTS: usize = 49_999;

/// Longest PIX key accepted by the DICT directory (email keys).
pub const MAX_PIX_KEY_LEN: usize = 77;

/// Validate the payer profile.
/// Returns all validation errors found (not just the first).
pub fn validate_payer(payer: &PayerProfile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if normalize_text(&payer.name).trim().is_empty() {
        errors.push(ValidationError::payer("name", "payer name must not be empty"));
    }

    let tax_digits = digits_only(&payer.tax_id).len();
    if tax_digits != 11 && tax_digits != 14 {
        errors.push(ValidationError::payer(
            "tax_id",
            format!("tax id must have 11 (CPF) or 14 (CNPJ) digits, got {tax_digits}"),
        ));
    }

    let at_payer = |field: &str, message: &str| ValidationError::payer(field, message);
    check_digits(&payer.branch, 5, "branch", &mut errors, at_payer);
    check_digits(&payer.account, 12, "account", &mut errors, at_payer);
    check_account_digit(&payer.check_digit, "check_digit", &mut errors, at_payer);

    errors
}

/// Validate every payment of a remittance, reporting errors with their row.
pub fn validate_payments(payments: &[PaymentRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if payments.len() > MAX_PAYMENTS {
        errors.push(ValidationError {
            row: None,
            field: "payments".into(),
            message: format!(
                "{} payments exceed the {MAX_PAYMENTS} a single remittance can carry",
                payments.len()
            ),
        });
    }
    for (row, payment) in payments.iter().enumerate() {
        errors.extend(validate_payment(payment, row));
    }
    errors
}

/// Validate a single payment against the fields its method requires.
pub fn validate_payment(payment: &PaymentRecord, row: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let err = |field: &str, message: String| ValidationError::row(row, field, message);

    if payment.id.trim().is_empty() {
        errors.push(err("id", "payment id must not be empty".into()));
    }
    if normalize_text(&payment.payee_name).trim().is_empty() {
        errors.push(err("payee_name", "payee name must not be empty".into()));
    }

    if payment.amount <= Decimal::ZERO {
        errors.push(err(
            "amount",
            format!("amount must be positive, got {}", payment.amount),
        ));
    } else if payment.amount.round_dp(2) != payment.amount {
        errors.push(err(
            "amount",
            format!("amount {} has more than two fractional digits", payment.amount),
        ));
    } else if payment.amount > MAX_AMOUNT {
        errors.push(err(
            "amount",
            format!("amount {} exceeds the field maximum {MAX_AMOUNT}", payment.amount),
        ));
    }

    // Tributes are identified by the barcode alone.
    if payment.method != PaymentMethod::Tribute {
        let tax_digits = digits_only(&payment.payee_tax_id).len();
        if tax_digits != 11 && tax_digits != 14 {
            errors.push(err(
                "payee_tax_id",
                format!("payee tax id must have 11 or 14 digits, got {tax_digits}"),
            ));
        }
    }

    let row_err = |field: &str, message: &str| ValidationError::row(row, field, message);
    match payment.method {
        PaymentMethod::Boleto => match payment.barcode.as_deref() {
            None => errors.push(row_err("barcode", "boleto payment requires a barcode")),
            Some(code) => match barcode::boleto_barcode(code) {
                None => errors.push(row_err(
                    "barcode",
                    "boleto barcode must have 44 digits or a 47-digit linha digitável",
                )),
                Some(bc) if !barcode::is_valid_boleto_barcode(&bc) => {
                    errors.push(row_err("barcode", "boleto barcode check digit is invalid"))
                }
                Some(_) => {}
            },
        },
        PaymentMethod::Tribute => match payment.barcode.as_deref() {
            None => errors.push(row_err("barcode", "tribute payment requires a barcode")),
            Some(code) if barcode::tribute_barcode(code).is_none() => errors.push(row_err(
                "barcode",
                "tribute barcode must start with 8 and have 44 or 48 digits",
            )),
            Some(_) => {}
        },
        PaymentMethod::Transfer | PaymentMethod::AccountDebit => match &payment.destination {
            None => errors.push(row_err(
                "destination",
                "transfer requires destination bank, branch and account",
            )),
            Some(dest) => validate_destination(dest, row, &mut errors),
        },
        PaymentMethod::InstantPayment => {
            if let Some(key) = payment.pix_key() {
                if key.chars().count() > MAX_PIX_KEY_LEN {
                    errors.push(err(
                        "pix_key",
                        format!("PIX key longer than {MAX_PIX_KEY_LEN} characters"),
                    ));
                }
            }
            match (&payment.destination, payment.pix_key()) {
                (Some(dest), _) => validate_destination(dest, row, &mut errors),
                (None, Some(_)) => {}
                (None, None) => errors.push(row_err(
                    "pix_key",
                    "PIX payment requires a key or a destination account",
                )),
            }
        }
    }

    errors
}

/// Warn about payments already sent in an earlier remittance.
pub fn processed_warnings(payments: &[PaymentRecord]) -> Vec<ValidationWarning> {
    payments
        .iter()
        .enumerate()
        .filter(|(_, p)| p.status == PaymentStatus::Processed)
        .map(|(row, _)| ValidationWarning {
            row: Some(row),
            field: "status".into(),
            kind: WarningKind::AlreadyProcessed,
        })
        .collect()
}

/// Mark payments as included in a generated remittance.
pub fn mark_processed(payments: &mut [PaymentRecord]) {
    for payment in payments {
        payment.status = PaymentStatus::Processed;
    }
}

fn validate_destination(dest: &BankAccount, row: usize, errors: &mut Vec<ValidationError>) {
    let at_row = |field: &str, message: &str| ValidationError::row(row, field, message);
    check_digits(&dest.bank, 3, "destination.bank", errors, at_row);
    check_digits(&dest.branch, 5, "destination.branch", errors, at_row);
    check_digits(&dest.account, 12, "destination.account", errors, at_row);
    check_account_digit(&dest.check_digit, "destination.check_digit", errors, at_row);
}

fn check_digits<F>(value: &str, max: usize, field: &str, errors: &mut Vec<ValidationError>, make: F)
where
    F: Fn(&str, &str) -> ValidationError,
{
    let value = value.trim();
    if value.is_empty() {
        errors.push(make(field, "must not be empty"));
    } else if !value.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(make(field, "must contain digits only"));
    } else if value.len() > max {
        errors.push(make(field, &format!("must have at most {max} digits")));
    }
}

fn check_account_digit<F>(value: &str, field: &str, errors: &mut Vec<ValidationError>, make: F)
where
    F: Fn(&str, &str) -> ValidationError,
{
    let value = value.trim();
    if value.len() != 1 || !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        errors.push(make(field, "check digit must be a single character"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payer() -> PayerProfile {
        PayerProfile {
            name: "ACME LTDA".into(),
            tax_id: "12345678000199".into(),
            branch: "1234".into(),
            account: "567890".into(),
            check_digit: "1".into(),
        }
    }

    fn transfer() -> PaymentRecord {
        PaymentRecord {
            id: "PAY-1".into(),
            payee_name: "Fornecedor".into(),
            payee_tax_id: "123.456.789-01".into(),
            method: PaymentMethod::Transfer,
            amount: dec!(10.50),
            due_date: date(2024, 6, 10),
            payment_date: date(2024, 6, 10),
            barcode: None,
            destination: Some(BankAccount {
                bank: "001".into(),
                branch: "4321".into(),
                account: "998877".into(),
                check_digit: "X".into(),
            }),
            pix_key: None,
            memo: String::new(),
            status: PaymentStatus::Pending,
        }
    }

    #[test]
    fn valid_payer_passes() {
        assert!(validate_payer(&payer()).is_empty());
    }

    #[test]
    fn payer_tax_id_length() {
        let mut p = payer();
        p.tax_id = "1234".into();
        let errors = validate_payer(&p);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "tax_id");
    }

    #[test]
    fn payer_account_must_be_numeric() {
        let mut p = payer();
        p.account = "5678-9".into();
        p.check_digit = String::new();
        let fields: Vec<_> = validate_payer(&p).into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["account", "check_digit"]);
    }

    #[test]
    fn valid_transfer_passes() {
        assert!(validate_payment(&transfer(), 0).is_empty());
    }

    #[test]
    fn transfer_without_destination() {
        let mut p = transfer();
        p.destination = None;
        let errors = validate_payment(&p, 3);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row, Some(3));
        assert_eq!(errors[0].field, "destination");
    }

    #[test]
    fn amount_rules() {
        let mut p = transfer();
        p.amount = dec!(0);
        assert_eq!(validate_payment(&p, 0)[0].field, "amount");
        p.amount = dec!(1.005);
        assert!(validate_payment(&p, 0)[0].message.contains("fractional"));
        p.amount = dec!(10000000000000);
        assert!(validate_payment(&p, 0)[0].message.contains("maximum"));
        p.amount = dec!(1.50);
        assert!(validate_payment(&p, 0).is_empty());
    }

    #[test]
    fn boleto_requires_valid_barcode() {
        let mut p = transfer();
        p.method = PaymentMethod::Boleto;
        p.destination = None;
        assert_eq!(validate_payment(&p, 0)[0].field, "barcode");

        p.barcode = Some("34195100000001500011234567890123456789012345".into());
        assert!(validate_payment(&p, 0)[0].message.contains("check digit"));

        p.barcode = Some("34195100000001500001234567890123456789012345".into());
        assert!(validate_payment(&p, 0).is_empty());
    }

    #[test]
    fn tribute_skips_payee_tax_id() {
        let mut p = transfer();
        p.method = PaymentMethod::Tribute;
        p.destination = None;
        p.payee_tax_id = String::new();
        p.barcode = Some(format!("8{}", "1".repeat(43)));
        assert!(validate_payment(&p, 0).is_empty());
    }

    #[test]
    fn pix_needs_key_or_account() {
        let mut p = transfer();
        p.method = PaymentMethod::InstantPayment;
        p.destination = None;
        p.pix_key = Some("   ".into());
        assert_eq!(validate_payment(&p, 0)[0].field, "pix_key");

        p.pix_key = Some("financeiro@fornecedor.com.br".into());
        assert!(validate_payment(&p, 0).is_empty());
    }

    #[test]
    fn processed_records_warn() {
        let mut processed = transfer();
        processed.status = PaymentStatus::Processed;
        let warnings = processed_warnings(&[transfer(), processed]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].row, Some(1));
        assert_eq!(warnings[0].kind, WarningKind::AlreadyProcessed);
    }

    #[test]
    fn marking_processed_flags_every_row() {
        let mut batch = vec![transfer(), transfer()];
        assert!(processed_warnings(&batch).is_empty());
        mark_processed(&mut batch);
        let rows: Vec<_> = processed_warnings(&batch).into_iter().map(|w| w.row).collect();
        assert_eq!(rows, vec![Some(0), Some(1)]);
    }
}
