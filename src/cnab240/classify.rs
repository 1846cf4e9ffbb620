//! Payment classification: which batch and which segments a payment uses.

use crate::core::{PaymentMethod, PaymentRecord, barcode};

/// Batch grouping key written to the batch header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchKey {
    /// Tipo de serviço (positions 10-11).
    pub service_type: &'static str,
    /// Forma de pagamento (positions 12-13).
    pub payment_form: &'static str,
    /// Batch layout version (positions 14-16).
    pub layout_version: &'static str,
}

/// Layout used by barcode payments (Segments J, J-52 and O).
pub const LAYOUT_BARCODE: &str = "030";
/// Layout used by account-based payments (Segments A and B).
pub const LAYOUT_ACCOUNT: &str = "040";

/// Outcome of classifying one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Boleto issued by the paying bank itself.
    OwnBankBoleto { barcode: String },
    /// Boleto issued by another bank.
    OtherBankBoleto { barcode: String },
    /// Tax or utility bill with a barcode.
    Tribute { barcode: String },
    /// PIX transfer, by key when one is given, else by account.
    InstantPayment { key: Option<&'a str> },
    /// Credit to an account at the paying bank.
    OwnBankTransfer,
    /// TED to an account at another bank.
    OtherBankTransfer,
}

impl Classification<'_> {
    /// Batch header fields shared by every payment of this class.
    pub fn batch_key(&self) -> BatchKey {
        let (service_type, payment_form, layout_version) = match self {
            Self::OwnBankBoleto { .. } => ("20", "30", LAYOUT_BARCODE),
            Self::OtherBankBoleto { .. } => ("20", "31", LAYOUT_BARCODE),
            Self::Tribute { .. } => ("22", "13", LAYOUT_BARCODE),
            Self::InstantPayment { .. } => ("20", "45", LAYOUT_ACCOUNT),
            Self::OwnBankTransfer => ("20", "01", LAYOUT_ACCOUNT),
            Self::OtherBankTransfer => ("20", "41", LAYOUT_ACCOUNT),
        };
        BatchKey {
            service_type,
            payment_form,
            layout_version,
        }
    }
}

/// Classify a payment relative to the bank receiving the remittance.
///
/// Account debits have no layout of their own and travel as transfers.
pub fn classify<'a>(payment: &'a PaymentRecord, bank_code: &str) -> Classification<'a> {
    match payment.method {
        PaymentMethod::Boleto => {
            let barcode = payment
                .barcode
                .as_deref()
                .and_then(barcode::boleto_barcode)
                .unwrap_or_default();
            if barcode::issuing_bank(&barcode).is_some_and(|b| same_bank(b, bank_code)) {
                Classification::OwnBankBoleto { barcode }
            } else {
                Classification::OtherBankBoleto { barcode }
            }
        }
        PaymentMethod::Tribute => Classification::Tribute {
            barcode: payment
                .barcode
                .as_deref()
                .map(crate::core::digits_only)
                .unwrap_or_default(),
        },
        PaymentMethod::InstantPayment => Classification::InstantPayment {
            key: payment.pix_key(),
        },
        PaymentMethod::Transfer | PaymentMethod::AccountDebit => {
            let own = payment
                .destination
                .as_ref()
                .is_some_and(|d| same_bank(&d.bank, bank_code));
            if own {
                Classification::OwnBankTransfer
            } else {
                Classification::OtherBankTransfer
            }
        }
    }
}

fn same_bank(a: &str, b: &str) -> bool {
    let a = a.trim().trim_start_matches('0');
    let b = b.trim().trim_start_matches('0');
    !a.is_empty() && a == b
}
