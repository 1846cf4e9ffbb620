//! # remessa
//!
//! CNAB 240 payment remittance files for Brazilian banks, following the
//! FEBRABAN layout as profiled by Itaú SISPAG: boletos, tribute bills,
//! TED/internal credits and PIX transfers.
//!
//! All monetary values use [`rust_decimal::Decimal`] and are written to the
//! file as integer cents, never floating point. Generation is a pure
//! function of its inputs and an injected timestamp.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use remessa::cnab240::{Cnab240Config, generate};
//! use remessa::core::*;
//! use rust_decimal_macros::dec;
//!
//! let payer = PayerProfileBuilder::new("ACME LTDA", "12345678000199")
//!     .account("1234", "567890", "1")
//!     .build();
//! let day = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
//! let pix = PaymentRecordBuilder::new("PAY-1", PaymentMethod::InstantPayment, dec!(250), day)
//!     .payee("Maria Souza", "123.456.789-01")
//!     .pix_key("maria@example.com")
//!     .build();
//!
//! let now = day.and_hms_opt(8, 0, 0).unwrap();
//! let file = generate(&payer, &[pix], 1, now, &Cnab240Config::default()).unwrap();
//! assert_eq!(file.lines().count(), 6);
//! assert!(file.lines().all(|line| line.len() == 240));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Payment types, text packing, barcodes, validation |
//! | `cnab240` (default) | CNAB 240 SISPAG remittance generation |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "cnab240")]
pub mod cnab240;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
