use super::error::RemessaError;

/// Highest value of the 6-digit file sequence field (NSA).
pub const MAX_FILE_SEQUENCE: u32 = 999_999;

/// Remittance file sequence generator.
///
/// The bank expects the file sequence number of consecutive remittances to
/// increase without repeating. This struct tracks the last issued number.
#[derive(Debug, Clone)]
pub struct FileSequence {
    next: u32,
}

impl Default for FileSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSequence {
    /// Create a new sequence starting at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(next: u32) -> Result<Self, RemessaError> {
        check_file_sequence(next)?;
        Ok(Self { next })
    }

    /// Issue the next file sequence number.
    pub fn next_number(&mut self) -> Result<u32, RemessaError> {
        let num = self.next;
        check_file_sequence(num)?;
        self.next += 1;
        Ok(num)
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

/// Ensure a file sequence number fits the 6-digit header field.
pub fn check_file_sequence(n: u32) -> Result<(), RemessaError> {
    if n == 0 || n > MAX_FILE_SEQUENCE {
        return Err(RemessaError::Numbering(format!(
            "file sequence {n} outside 1..={MAX_FILE_SEQUENCE}"
        )));
    }
    Ok(())
}
