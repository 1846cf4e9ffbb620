//! Batch (lote) assembly: header, detail segments, trailer.

use chrono::NaiveDate;

use crate::core::{
    InscriptionType, PayerProfile, PaymentMethod, PaymentRecord, ValidationWarning, digits_only,
};

use super::classify::{BatchKey, Classification};
use super::config::Cnab240Config;
use super::layout::{
    BATCH_HEADER, BATCH_TRAILER, RecordLayout, SEGMENT_A, SEGMENT_B, SEGMENT_J, SEGMENT_J52,
    SEGMENT_O,
};
use super::record::{Encoded, Record};

/// Channel code of Segment A for PIX transfers.
const CHANNEL_PIX: &str = "009";
/// Channel code of Segment A for TED and internal credits.
const CHANNEL_TED: &str = "018";

/// Inputs shared by every batch of one file.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FileContext<'a> {
    pub payer: &'a PayerProfile,
    pub config: &'a Cnab240Config,
}

/// A classified payment together with its row in the caller's input.
#[derive(Debug)]
pub(crate) struct Member<'a> {
    pub row: usize,
    pub payment: &'a PaymentRecord,
    pub class: Classification<'a>,
}

/// Largest value of the 18-digit batch trailer total.
pub const MAX_BATCH_TOTAL_CENTS: i64 = 999_999_999_999_999_999;

/// Running counters of one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTotals {
    /// Detail segments emitted so far; also the last sequence number used.
    pub segments: u32,
    /// Sum of the payment amounts in cents, saturating at `i64::MAX`.
    pub amount_cents: i64,
    /// Set once an amount could not be converted or the sum overflowed.
    pub overflowed: bool,
}

impl BatchTotals {
    fn next_sequence(self) -> (u32, Self) {
        let seq = self.segments + 1;
        (seq, Self { segments: seq, ..self })
    }

    fn add_amount(self, cents: Option<i64>) -> Self {
        match cents.and_then(|c| self.amount_cents.checked_add(c)) {
            Some(amount_cents) => Self {
                amount_cents,
                ..self
            },
            None => Self {
                amount_cents: i64::MAX,
                overflowed: true,
                ..self
            },
        }
    }

    /// Records the trailer counts: header, details and trailer itself.
    pub fn record_count(&self) -> u32 {
        self.segments + 2
    }

    /// Whether the total is exact and fits the trailer field.
    pub fn fits_trailer(&self) -> bool {
        !self.overflowed && (0..=MAX_BATCH_TOTAL_CENTS).contains(&self.amount_cents)
    }
}

/// Summary of a generated batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub batch_number: u32,
    pub key: BatchKey,
    pub payment_count: usize,
    pub totals: BatchTotals,
}

/// Lines of one assembled batch.
#[derive(Debug)]
pub(crate) struct AssembledBatch {
    pub lines: Vec<String>,
    pub warnings: Vec<ValidationWarning>,
    pub summary: BatchSummary,
}

impl AssembledBatch {
    fn push(&mut self, encoded: Encoded, row: Option<usize>) {
        self.warnings
            .extend(encoded.truncations.into_iter().map(|t| t.into_warning(row)));
        self.lines.push(encoded.line);
    }
}

/// Assemble one batch from payments sharing `key`, in input order.
pub(crate) fn assemble_batch(
    ctx: FileContext<'_>,
    batch_number: u32,
    key: BatchKey,
    members: &[Member<'_>],
) -> AssembledBatch {
    let mut batch = AssembledBatch {
        lines: Vec::with_capacity(members.len() * 2 + 2),
        warnings: Vec::new(),
        summary: BatchSummary {
            batch_number,
            key,
            payment_count: members.len(),
            totals: BatchTotals::default(),
        },
    };

    batch.push(batch_header(ctx, batch_number, key), None);

    let totals = members.iter().fold(BatchTotals::default(), |totals, member| {
        emit_payment(ctx, batch_number, member, totals, &mut batch)
    });

    batch.push(batch_trailer(ctx, batch_number, totals), None);
    batch.summary.totals = totals;
    batch
}

fn emit_payment(
    ctx: FileContext<'_>,
    batch_number: u32,
    member: &Member<'_>,
    totals: BatchTotals,
    batch: &mut AssembledBatch,
) -> BatchTotals {
    let p = member.payment;
    let row = Some(member.row);
    let totals = totals.add_amount(p.amount_cents());

    match &member.class {
        Classification::OwnBankBoleto { barcode } | Classification::OtherBankBoleto { barcode } => {
            let (seq, totals) = totals.next_sequence();
            batch.push(segment_j(ctx, batch_number, seq, p, barcode), row);
            let (seq, totals) = totals.next_sequence();
            batch.push(segment_j52(ctx, batch_number, seq, p), row);
            totals
        }
        Classification::Tribute { barcode } => {
            let (seq, totals) = totals.next_sequence();
            batch.push(segment_o(ctx, batch_number, seq, p, barcode), row);
            totals
        }
        Classification::InstantPayment { key } => {
            let (seq, totals) = totals.next_sequence();
            batch.push(segment_a(ctx, batch_number, seq, p, *key), row);
            match key {
                Some(key) => {
                    let (seq, totals) = totals.next_sequence();
                    batch.push(segment_b(ctx, batch_number, seq, p, key), row);
                    totals
                }
                None => totals,
            }
        }
        Classification::OwnBankTransfer | Classification::OtherBankTransfer => {
            let (seq, totals) = totals.next_sequence();
            batch.push(segment_a(ctx, batch_number, seq, p, None), row);
            totals
        }
    }
}

// Unconvertible amounts only reach here unvalidated; they encode as zeros.
fn cents_field(p: &PaymentRecord) -> String {
    p.amount_cents().map(|c| c.to_string()).unwrap_or_default()
}

fn cnab_date(date: NaiveDate) -> String {
    date.format("%d%m%Y").to_string()
}

fn detail(layout: &'static RecordLayout, ctx: FileContext<'_>, batch: u32, seq: u32) -> Record {
    Record::new(layout)
        .set("bank_code", ctx.config.bank_code.as_str())
        .set("batch_number", batch.to_string())
        .set("sequence", seq.to_string())
}

fn batch_header(ctx: FileContext<'_>, batch_number: u32, key: BatchKey) -> Encoded {
    let payer = ctx.payer;
    Record::new(&BATCH_HEADER)
        .set("bank_code", ctx.config.bank_code.as_str())
        .set("batch_number", batch_number.to_string())
        .set("service_type", key.service_type)
        .set("payment_form", key.payment_form)
        .set("layout_version", key.layout_version)
        .set("inscription_type", payer.inscription_type().code())
        .set("tax_id", digits_only(&payer.tax_id))
        .set("branch", payer.branch.as_str())
        .set("account", payer.account.as_str())
        .set("check_digit", payer.check_digit.as_str())
        .set("company_name", payer.name.as_str())
        .encode()
}

fn segment_a(
    ctx: FileContext<'_>,
    batch: u32,
    seq: u32,
    p: &PaymentRecord,
    pix_key: Option<&str>,
) -> Encoded {
    let channel = if p.method == PaymentMethod::InstantPayment {
        CHANNEL_PIX
    } else {
        CHANNEL_TED
    };
    let mut record = detail(&SEGMENT_A, ctx, batch, seq).set("channel", channel);
    if let Some(dest) = &p.destination {
        record = record
            .set("dest_bank", dest.bank.as_str())
            .set("dest_branch", dest.branch.as_str())
            .set("dest_account", dest.account.as_str())
            .set("dest_check_digit", dest.check_digit.as_str());
    }
    record
        .set("payee_name", p.payee_name.as_str())
        .set("reference", p.id.as_str())
        .set("payment_date", cnab_date(p.payment_date))
        .set("initiation_form", if pix_key.is_some() { "04" } else { "01" })
        .set("amount", cents_field(p))
        .set("payee_tax_id", digits_only(&p.payee_tax_id))
        .set("transfer_purpose", ctx.config.transfer_purpose.as_str())
        .encode()
}

fn segment_b(ctx: FileContext<'_>, batch: u32, seq: u32, p: &PaymentRecord, key: &str) -> Encoded {
    detail(&SEGMENT_B, ctx, batch, seq)
        .set(
            "payee_inscription_type",
            InscriptionType::of(&p.payee_tax_id).code(),
        )
        .set("payee_tax_id", digits_only(&p.payee_tax_id))
        .set("memo", p.memo.as_str())
        .set("pix_key", key)
        .encode()
}

fn segment_j(ctx: FileContext<'_>, batch: u32, seq: u32, p: &PaymentRecord, barcode: &str) -> Encoded {
    let cents = cents_field(p);
    detail(&SEGMENT_J, ctx, batch, seq)
        .set("barcode", barcode)
        .set("payee_name", p.payee_name.as_str())
        .set("due_date", cnab_date(p.due_date))
        .set("title_amount", cents.as_str())
        .set("payment_date", cnab_date(p.payment_date))
        .set("payment_amount", cents)
        .set("reference", p.id.as_str())
        .encode()
}

fn segment_j52(ctx: FileContext<'_>, batch: u32, seq: u32, p: &PaymentRecord) -> Encoded {
    let payer = ctx.payer;
    detail(&SEGMENT_J52, ctx, batch, seq)
        .set("payer_inscription_type", payer.inscription_type().code())
        .set("payer_tax_id", digits_only(&payer.tax_id))
        .set("payer_name", payer.name.as_str())
        .set(
            "payee_inscription_type",
            InscriptionType::of(&p.payee_tax_id).code(),
        )
        .set("payee_tax_id", digits_only(&p.payee_tax_id))
        .set("payee_name", p.payee_name.as_str())
        .encode()
}

fn segment_o(ctx: FileContext<'_>, batch: u32, seq: u32, p: &PaymentRecord, barcode: &str) -> Encoded {
    let cents = cents_field(p);
    detail(&SEGMENT_O, ctx, batch, seq)
        .set("barcode", barcode)
        .set("payee_name", p.payee_name.as_str())
        .set("due_date", cnab_date(p.due_date))
        .set("amount", cents.as_str())
        .set("payment_date", cnab_date(p.payment_date))
        .set("paid_amount", cents)
        .set("reference", p.id.as_str())
        .encode()
}

fn batch_trailer(ctx: FileContext<'_>, batch_number: u32, totals: BatchTotals) -> Encoded {
    Record::new(&BATCH_TRAILER)
        .set("bank_code", ctx.config.bank_code.as_str())
        .set("batch_number", batch_number.to_string())
        .set("record_count", totals.record_count().to_string())
        .set("total_amount", totals.amount_cents.to_string())
        .encode()
}
