//! Core remittance types, text packing, barcode helpers and validation.
//!
//! This module holds everything that does not depend on a particular
//! record layout: the payer and payment models, the CNAB character set,
//! and the boundary checks run before any file is generated.

pub mod barcode;
mod builder;
mod error;
mod numbering;
mod text;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use numbering::*;
pub use text::*;
pub use types::*;
pub use validation::*;
