//! CNAB 240 remittance (remessa) generation for Itaú SISPAG.
//!
//! Payments are classified into batches by service type, payment form and
//! layout version, then encoded as fixed-width 240-byte records:
//!
//! | Record | Position 8 | Segment | Used for |
//! |--------|------------|---------|----------|
//! | File header | `0` | | once per file |
//! | Batch header | `1` | | once per batch |
//! | Detail | `3` | `A` (+ `B`) | TED, internal credit, PIX |
//! | Detail | `3` | `J` + `J-52` | boletos |
//! | Detail | `3` | `O` | tributes and utility bills |
//! | Batch trailer | `5` | | once per batch |
//! | File trailer | `9` | | once per file |
//!
//! # Example
//!
//! ```ignore
//! use remessa::cnab240::*;
//!
//! let config = Cnab240Config::default();
//! let preflight = preflight(&payer, &payments, &config);
//! for warning in &preflight.warnings {
//!     eprintln!("{warning}");
//! }
//! let content = generate(&payer, &payments, 1, now, &config)?;
//! ```

mod batch;
mod classify;
mod config;
mod file;
pub mod layout;
mod record;

pub use batch::{BatchSummary, BatchTotals, MAX_BATCH_TOTAL_CENTS};
pub use classify::{BatchKey, Classification, LAYOUT_ACCOUNT, LAYOUT_BARCODE, classify};
pub use config::{Cnab240Config, Cnab240ConfigBuilder};
pub use file::{
    Assembly, FileTotals, LINE_ENDING, Preflight, assemble, generate, generate_now, preflight,
    remittance_file_name,
};
pub use record::{Encoded, Record, Truncation};
