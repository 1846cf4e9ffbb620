use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::RemessaError;
use super::text::digits_only;

/// The paying company: owner of the debited account and of the remittance file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerProfile {
    /// Legal name (razão social).
    pub name: String,
    /// CPF (11 digits) or CNPJ (14 digits), punctuation allowed.
    pub tax_id: String,
    /// Branch code (agência), up to 5 digits.
    pub branch: String,
    /// Account number (conta corrente), up to 12 digits.
    pub account: String,
    /// Account check digit (DAC).
    pub check_digit: String,
}

impl PayerProfile {
    /// Inscription type derived from the tax id digit count.
    pub fn inscription_type(&self) -> InscriptionType {
        InscriptionType::of(&self.tax_id)
    }
}

/// CNAB inscription type flag written next to every tax identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InscriptionType {
    /// 1: CPF, natural person.
    Individual,
    /// 2: CNPJ, legal entity.
    Organization,
}

impl InscriptionType {
    /// Classify a tax identifier: more than 11 digits is a CNPJ.
    pub fn of(tax_id: &str) -> Self {
        if digits_only(tax_id).len() > 11 {
            Self::Organization
        } else {
            Self::Individual
        }
    }

    /// Single-digit CNAB code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Individual => "1",
            Self::Organization => "2",
        }
    }
}

/// Payment method code as carried by the upstream payables table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// 01: TED/DOC account credit.
    #[serde(rename = "01")]
    Transfer,
    /// 02: Boleto bancário paid by barcode.
    #[serde(rename = "02")]
    Boleto,
    /// 03: Account debit.
    #[serde(rename = "03")]
    AccountDebit,
    /// 04: Tribute or utility bill paid by barcode.
    #[serde(rename = "04")]
    Tribute,
    /// 06: PIX instant payment.
    #[serde(rename = "06")]
    InstantPayment,
}

impl PaymentMethod {
    /// Two-digit method code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transfer => "01",
            Self::Boleto => "02",
            Self::AccountDebit => "03",
            Self::Tribute => "04",
            Self::InstantPayment => "06",
        }
    }

    /// Parse from the two-digit method code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Transfer),
            "02" => Some(Self::Boleto),
            "03" => Some(Self::AccountDebit),
            "04" => Some(Self::Tribute),
            "06" => Some(Self::InstantPayment),
            _ => None,
        }
    }

    /// Whether the method settles through a barcode instead of an account.
    pub fn uses_barcode(&self) -> bool {
        matches!(self, Self::Boleto | Self::Tribute)
    }
}

impl FromStr for PaymentMethod {
    type Err = RemessaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim()).ok_or_else(|| RemessaError::UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Lifecycle of a payable in the surrounding application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// Not yet sent to the bank.
    #[default]
    Pending,
    /// Settled.
    Paid,
    /// Already included in a generated remittance file.
    Processed,
}

/// Destination account for credit transfers and account-based PIX.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Bank code (COMPE), 3 digits.
    pub bank: String,
    /// Branch code, up to 5 digits.
    pub branch: String,
    /// Account number, up to 12 digits.
    pub account: String,
    /// Account check digit.
    pub check_digit: String,
}

/// A single payable selected for the remittance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Caller-side unique identifier, echoed back by the bank as "seu número".
    pub id: String,
    /// Payee (favorecido) name.
    pub payee_name: String,
    /// Payee CPF/CNPJ.
    pub payee_tax_id: String,
    /// Payment method.
    pub method: PaymentMethod,
    /// Amount in BRL with at most two fractional digits.
    pub amount: Decimal,
    /// Due date of the title.
    pub due_date: NaiveDate,
    /// Scheduled payment date.
    pub payment_date: NaiveDate,
    /// Boleto or tribute barcode, either form, punctuation allowed.
    #[serde(default)]
    pub barcode: Option<String>,
    /// Destination account for transfers.
    #[serde(default)]
    pub destination: Option<BankAccount>,
    /// PIX key (email, tax id, phone or random key).
    #[serde(default)]
    pub pix_key: Option<String>,
    /// Free-text memo.
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub status: PaymentStatus,
}

impl PaymentRecord {
    /// Amount in integer cents, rounded half away from zero to two places.
    ///
    /// `None` when the amount does not fit an `i64` of cents.
    pub fn amount_cents(&self) -> Option<i64> {
        to_cents(self.amount)
    }

    /// The PIX key if present and not blank.
    pub fn pix_key(&self) -> Option<&str> {
        self.pix_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Convert a BRL amount to integer cents, or `None` on overflow.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    use rust_decimal::prelude::ToPrimitive;

    amount
        .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}
