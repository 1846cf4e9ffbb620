use serde::{Deserialize, Serialize};

/// Configuration for CNAB 240 remittance generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cnab240Config {
    /// COMPE code of the bank receiving the file, 3 digits.
    pub bank_code: String,
    /// Bank name written to the file header, max 30 chars.
    pub bank_name: String,
    /// File-level layout version (positions 164-166 of the header).
    pub file_layout_version: String,
    /// TED purpose code in Segment A, 5 digits. `00005` is supplier payment.
    pub transfer_purpose: String,
}

impl Default for Cnab240Config {
    fn default() -> Self {
        Self {
            bank_code: "341".into(),
            bank_name: "BANCO ITAU S.A.".into(),
            file_layout_version: "085".into(),
            transfer_purpose: "00005".into(),
        }
    }
}

/// Builder for [`Cnab240Config`].
///
/// # Example
///
/// ```
/// use remessa::cnab240::Cnab240ConfigBuilder;
///
/// let config = Cnab240ConfigBuilder::new()
///     .file_layout_version("089")
///     .build();
/// assert_eq!(config.bank_code, "341");
/// ```
pub struct Cnab240ConfigBuilder {
    config: Cnab240Config,
}

impl Default for Cnab240ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Cnab240ConfigBuilder {
    /// Start from the Itaú SISPAG defaults.
    pub fn new() -> Self {
        Self {
            config: Cnab240Config::default(),
        }
    }

    /// Set the receiving bank code and name.
    pub fn bank(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.config.bank_code = code.into();
        self.config.bank_name = name.into();
        self
    }

    /// Set the file layout version (3 digits).
    pub fn file_layout_version(mut self, version: impl Into<String>) -> Self {
        self.config.file_layout_version = version.into();
        self
    }

    /// Set the TED purpose code (5 digits).
    pub fn transfer_purpose(mut self, code: impl Into<String>) -> Self {
        self.config.transfer_purpose = code.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Cnab240Config {
        self.config
    }
}
