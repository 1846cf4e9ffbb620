//! File assembly and the public generation entry points.

use chrono::NaiveDateTime;
use log::{debug, warn};

use crate::core::{
    PayerProfile, PaymentRecord, RemessaError, ValidationError, ValidationWarning,
    check_file_sequence, digits_only, normalize_text, processed_warnings, validate_payer,
    validate_payments,
};

use super::batch::{
    AssembledBatch, BatchSummary, FileContext, MAX_BATCH_TOTAL_CENTS, Member, assemble_batch,
};
use super::classify::{BatchKey, classify};
use super::config::Cnab240Config;
use super::layout::{FILE_HEADER, FILE_TRAILER};
use super::record::{Encoded, Record};

/// Line terminator required by the bank.
pub const LINE_ENDING: &str = "\r\n";

/// Running counters of the whole file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileTotals {
    pub batches: u32,
    /// Lines emitted so far, file header included.
    pub lines: u32,
}

/// Result of a dry or real assembly, before the lines are joined.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub lines: Vec<String>,
    pub batches: Vec<BatchSummary>,
    pub warnings: Vec<ValidationWarning>,
    pub totals: FileTotals,
}

impl Assembly {
    /// Join the lines with CRLF, including a trailing CRLF.
    pub fn into_content(self) -> String {
        let mut out = String::with_capacity(self.lines.len() * 242);
        for line in self.lines {
            out.push_str(&line);
            out.push_str(LINE_ENDING);
        }
        out
    }
}

/// Everything the operator should review before generating.
#[derive(Debug, Clone, Default)]
pub struct Preflight {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl Preflight {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Generate a CNAB 240 remittance file.
///
/// Payer and payments are validated first; any error aborts generation and
/// nothing is produced. Truncation warnings are logged; use [`preflight`]
/// to obtain them before calling this.
///
/// `now` stamps the file header, so identical inputs give identical files.
pub fn generate(
    payer: &PayerProfile,
    payments: &[PaymentRecord],
    file_sequence: u32,
    now: NaiveDateTime,
    config: &Cnab240Config,
) -> Result<String, RemessaError> {
    if payments.is_empty() {
        return Err(RemessaError::Builder("no payments to export".into()));
    }
    check_file_sequence(file_sequence)?;

    let mut errors = validate_payer(payer);
    errors.extend(validate_payments(payments));
    if !errors.is_empty() {
        return Err(RemessaError::Validation(errors));
    }

    let assembly = assemble(payer, payments, file_sequence, now, config);
    let errors = batch_total_errors(&assembly.batches);
    if !errors.is_empty() {
        return Err(RemessaError::Validation(errors));
    }
    for warning in processed_warnings(payments).iter().chain(&assembly.warnings) {
        warn!("{warning}");
    }
    debug!(
        "generated remittance {file_sequence}: {} batches, {} lines",
        assembly.totals.batches, assembly.totals.lines
    );
    Ok(assembly.into_content())
}

/// [`generate`] stamped with the local wall clock.
pub fn generate_now(
    payer: &PayerProfile,
    payments: &[PaymentRecord],
    file_sequence: u32,
    config: &Cnab240Config,
) -> Result<String, RemessaError> {
    generate(
        payer,
        payments,
        file_sequence,
        chrono::Local::now().naive_local(),
        config,
    )
}

/// Validate inputs and collect every warning generation would raise.
pub fn preflight(
    payer: &PayerProfile,
    payments: &[PaymentRecord],
    config: &Cnab240Config,
) -> Preflight {
    let mut errors = validate_payer(payer);
    errors.extend(validate_payments(payments));

    let mut warnings = processed_warnings(payments);
    // Truncation does not depend on the clock or the sequence number.
    let dry_run = assemble(payer, payments, 1, NaiveDateTime::default(), config);
    errors.extend(batch_total_errors(&dry_run.batches));
    warnings.extend(dry_run.warnings);

    Preflight { errors, warnings }
}

/// Reject batches whose sum does not fit the 18-digit trailer total.
fn batch_total_errors(batches: &[BatchSummary]) -> Vec<ValidationError> {
    batches
        .iter()
        .filter(|b| !b.totals.fits_trailer())
        .map(|b| ValidationError {
            row: None,
            field: "batch_total".into(),
            message: format!(
                "batch {} ({} payments) exceeds the trailer maximum of {MAX_BATCH_TOTAL_CENTS} cents",
                b.batch_number, b.payment_count
            ),
        })
        .collect()
}

/// Assemble every line of the file without validating the inputs.
///
/// This is a total function: missing optional fields and unconvertible
/// amounts encode as zeros or spaces, and a batch sum that overflows is
/// flagged in its [`BatchTotals`](super::BatchTotals) instead of wrapping.
/// Callers outside tests should go through [`generate`].
pub fn assemble(
    payer: &PayerProfile,
    payments: &[PaymentRecord],
    file_sequence: u32,
    now: NaiveDateTime,
    config: &Cnab240Config,
) -> Assembly {
    let ctx = FileContext { payer, config };
    let mut assembly = Assembly {
        lines: Vec::new(),
        batches: Vec::new(),
        warnings: Vec::new(),
        totals: FileTotals::default(),
    };

    let header = file_header(ctx, file_sequence, now);
    assembly
        .warnings
        .extend(header.truncations.into_iter().map(|t| t.into_warning(None)));
    assembly.lines.push(header.line);
    let mut totals = FileTotals {
        batches: 0,
        lines: 1,
    };

    for (key, members) in group(payments, &config.bank_code) {
        let batch_number = totals.batches + 1;
        let batch = assemble_batch(ctx, batch_number, key, &members);
        debug!(
            "batch {batch_number} {}/{}/{}: {} payments, {} cents",
            key.service_type,
            key.payment_form,
            key.layout_version,
            batch.summary.payment_count,
            batch.summary.totals.amount_cents
        );
        totals = append_batch(&mut assembly, totals, batch);
    }

    totals.lines += 1;
    assembly.lines.push(file_trailer(ctx, totals).line);
    assembly.totals = totals;
    assembly
}

fn append_batch(assembly: &mut Assembly, totals: FileTotals, batch: AssembledBatch) -> FileTotals {
    let next = FileTotals {
        batches: totals.batches + 1,
        lines: totals.lines + batch.lines.len() as u32,
    };
    assembly.lines.extend(batch.lines);
    assembly.warnings.extend(batch.warnings);
    assembly.batches.push(batch.summary);
    next
}

/// Group payments by batch key, keeping first-seen order of keys and input
/// order within each group.
fn group<'a>(payments: &'a [PaymentRecord], bank_code: &str) -> Vec<(BatchKey, Vec<Member<'a>>)> {
    let mut groups: Vec<(BatchKey, Vec<Member<'a>>)> = Vec::new();
    for (row, payment) in payments.iter().enumerate() {
        let class = classify(payment, bank_code);
        let key = class.batch_key();
        let member = Member {
            row,
            payment,
            class,
        };
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(member),
            None => groups.push((key, vec![member])),
        }
    }
    groups
}

fn file_header(ctx: FileContext<'_>, file_sequence: u32, now: NaiveDateTime) -> Encoded {
    let payer = ctx.payer;
    Record::new(&FILE_HEADER)
        .set("bank_code", ctx.config.bank_code.as_str())
        .set("inscription_type", payer.inscription_type().code())
        .set("tax_id", digits_only(&payer.tax_id))
        .set("branch", payer.branch.as_str())
        .set("account", payer.account.as_str())
        .set("check_digit", payer.check_digit.as_str())
        .set("company_name", payer.name.as_str())
        .set("bank_name", ctx.config.bank_name.as_str())
        .set("generation_date", now.format("%d%m%Y").to_string())
        .set("generation_time", now.format("%H%M%S").to_string())
        .set("file_sequence", file_sequence.to_string())
        .set("layout_version", ctx.config.file_layout_version.as_str())
        .encode()
}

fn file_trailer(ctx: FileContext<'_>, totals: FileTotals) -> Encoded {
    Record::new(&FILE_TRAILER)
        .set("bank_code", ctx.config.bank_code.as_str())
        .set("batch_count", totals.batches.to_string())
        .set("record_count", totals.lines.to_string())
        .encode()
}

/// Download name used by the payables screen: `CNAB240_<NAME>_<millis>.rem`.
pub fn remittance_file_name(payer: &PayerProfile, now: NaiveDateTime) -> String {
    let name = normalize_text(&payer.name)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("CNAB240_{}_{}.rem", name, now.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PayerProfileBuilder, PaymentMethod, PaymentRecordBuilder};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn payer() -> PayerProfile {
        PayerProfileBuilder::new("ACME LTDA", "12345678000199")
            .account("1234", "567890", "1")
            .build()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    fn ted(id: &str, bank: &str) -> PaymentRecord {
        let day = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
        PaymentRecordBuilder::new(id, PaymentMethod::Transfer, dec!(10), day)
            .payee("Fornecedor", "12345678901")
            .destination(bank, "1", "2", "3")
            .build()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let payments = [ted("1", "001"), ted("2", "341"), ted("3", "001")];
        let groups = group(&payments, "341");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0.payment_form, "41");
        let rows: Vec<_> = groups[0].1.iter().map(|m| m.row).collect();
        assert_eq!(rows, vec![0, 2]);
        assert_eq!(groups[1].0.payment_form, "01");
    }

    #[test]
    fn batches_are_numbered_and_lines_counted() {
        let payments = [ted("1", "001"), ted("2", "341")];
        let assembly = assemble(&payer(), &payments, 7, now(), &Cnab240Config::default());
        assert_eq!(assembly.totals, FileTotals { batches: 2, lines: 8 });
        assert_eq!(&assembly.lines[1][3..7], "0001");
        assert_eq!(&assembly.lines[4][3..7], "0002");
        let trailer = assembly.lines.last().unwrap();
        assert_eq!(&trailer[17..29], "000002000008");
    }

    #[test]
    fn header_carries_clock_and_sequence() {
        let assembly = assemble(&payer(), &[ted("1", "001")], 7, now(), &Cnab240Config::default());
        let header = &assembly.lines[0];
        assert_eq!(&header[143..151], "15062024");
        assert_eq!(&header[151..157], "093005");
        assert_eq!(&header[157..163], "000007");
        assert_eq!(&header[163..166], "085");
    }

    #[test]
    fn empty_payment_list_is_rejected() {
        let err = generate(&payer(), &[], 1, now(), &Cnab240Config::default()).unwrap_err();
        assert!(matches!(err, RemessaError::Builder(_)));
    }

    #[test]
    fn file_sequence_range_is_checked() {
        let err = generate(&payer(), &[ted("1", "001")], 0, now(), &Cnab240Config::default())
            .unwrap_err();
        assert!(matches!(err, RemessaError::Numbering(_)));
    }

    #[test]
    fn batch_sum_over_trailer_width_is_rejected() {
        let mut big = ted("1", "001");
        big.amount = crate::core::MAX_AMOUNT;
        let payments = vec![big; 1001];
        let err = generate(&payer(), &payments, 1, now(), &Cnab240Config::default()).unwrap_err();
        let RemessaError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row, None);
        assert_eq!(errors[0].field, "batch_total");
    }

    #[test]
    fn preflight_survives_unrepresentable_amounts() {
        let mut huge = ted("1", "001");
        huge.amount = rust_decimal::Decimal::MAX;
        let report = preflight(&payer(), &[huge], &Cnab240Config::default());
        assert!(!report.is_ok());
        assert!(report.errors.iter().any(|e| e.row == Some(0) && e.field == "amount"));
        assert!(report.errors.iter().any(|e| e.field == "batch_total"));
    }

    #[test]
    fn file_name_is_normalized() {
        let mut p = payer();
        p.name = "Açaí & Cia Ltda".into();
        assert_eq!(
            remittance_file_name(&p, now()),
            "CNAB240_ACAI_CIA_LTDA_1718443805000.rem"
        );
    }
}
