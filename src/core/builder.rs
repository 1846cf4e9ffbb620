use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::*;

/// Builder for [`PayerProfile`].
///
/// ```
/// use remessa::core::PayerProfileBuilder;
///
/// let payer = PayerProfileBuilder::new("ACME LTDA", "12.345.678/0001-99")
///     .account("1234", "567890", "1")
///     .build();
/// assert_eq!(payer.inscription_type().code(), "2");
/// ```
pub struct PayerProfileBuilder {
    name: String,
    tax_id: String,
    branch: String,
    account: String,
    check_digit: String,
}

impl PayerProfileBuilder {
    pub fn new(name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tax_id: tax_id.into(),
            branch: String::new(),
            account: String::new(),
            check_digit: String::new(),
        }
    }

    /// Set the debited branch, account and account check digit.
    pub fn account(
        mut self,
        branch: impl Into<String>,
        account: impl Into<String>,
        check_digit: impl Into<String>,
    ) -> Self {
        self.branch = branch.into();
        self.account = account.into();
        self.check_digit = check_digit.into();
        self
    }

    pub fn build(self) -> PayerProfile {
        PayerProfile {
            name: self.name,
            tax_id: self.tax_id,
            branch: self.branch,
            account: self.account,
            check_digit: self.check_digit,
        }
    }
}

/// Builder for [`PaymentRecord`].
///
/// ```
/// use chrono::NaiveDate;
/// use remessa::core::*;
/// use rust_decimal_macros::dec;
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let pix = PaymentRecordBuilder::new("PAY-1", PaymentMethod::InstantPayment, dec!(99.90), day)
///     .payee("Maria Souza", "123.456.789-01")
///     .pix_key("maria@example.com")
///     .memo("Reembolso")
///     .build();
/// assert_eq!(pix.amount_cents(), Some(9990));
/// ```
pub struct PaymentRecordBuilder {
    id: String,
    method: PaymentMethod,
    amount: Decimal,
    due_date: NaiveDate,
    payment_date: NaiveDate,
    payee_name: String,
    payee_tax_id: String,
    barcode: Option<String>,
    destination: Option<BankAccount>,
    pix_key: Option<String>,
    memo: String,
    status: PaymentStatus,
}

impl PaymentRecordBuilder {
    /// Start a record due and paid on `date`.
    pub fn new(
        id: impl Into<String>,
        method: PaymentMethod,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            method,
            amount,
            due_date: date,
            payment_date: date,
            payee_name: String::new(),
            payee_tax_id: String::new(),
            barcode: None,
            destination: None,
            pix_key: None,
            memo: String::new(),
            status: PaymentStatus::Pending,
        }
    }

    pub fn payee(mut self, name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        self.payee_name = name.into();
        self.payee_tax_id = tax_id.into();
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = date;
        self
    }

    pub fn payment_date(mut self, date: NaiveDate) -> Self {
        self.payment_date = date;
        self
    }

    pub fn barcode(mut self, code: impl Into<String>) -> Self {
        self.barcode = Some(code.into());
        self
    }

    pub fn destination(
        mut self,
        bank: impl Into<String>,
        branch: impl Into<String>,
        account: impl Into<String>,
        check_digit: impl Into<String>,
    ) -> Self {
        self.destination = Some(BankAccount {
            bank: bank.into(),
            branch: branch.into(),
            account: account.into(),
            check_digit: check_digit.into(),
        });
        self
    }

    pub fn pix_key(mut self, key: impl Into<String>) -> Self {
        self.pix_key = Some(key.into());
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> PaymentRecord {
        PaymentRecord {
            id: self.id,
            payee_name: self.payee_name,
            payee_tax_id: self.payee_tax_id,
            method: self.method,
            amount: self.amount,
            due_date: self.due_date,
            payment_date: self.payment_date,
            barcode: self.barcode,
            destination: self.destination,
            pix_key: self.pix_key,
            memo: self.memo,
            status: self.status,
        }
    }
}
