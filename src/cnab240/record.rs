//! Generic fixed-width record encoder driven by a [`RecordLayout`].

use crate::core::{ValidationWarning, WarningKind, normalize_text, pack_numeric, pack_text};

use super::layout::{FieldKind, Fill, LINE_WIDTH, RecordLayout};

/// A value that did not fit its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    pub record: &'static str,
    pub field: &'static str,
    pub width: usize,
    pub length: usize,
}

impl Truncation {
    /// Report the truncation against an input row.
    pub fn into_warning(self, row: Option<usize>) -> ValidationWarning {
        ValidationWarning {
            row,
            field: format!("{}.{}", self.record, self.field),
            kind: WarningKind::Truncated {
                width: self.width,
                length: self.length,
            },
        }
    }
}

/// One encoded line plus the truncations it suffered.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub line: String,
    pub truncations: Vec<Truncation>,
}

/// Values for one record, keyed by field name.
#[derive(Debug)]
pub struct Record {
    layout: &'static RecordLayout,
    values: Vec<(&'static str, String)>,
}

impl Record {
    /// Start a blank record for `layout`.
    pub fn new(layout: &'static RecordLayout) -> Self {
        Self {
            layout,
            values: Vec::with_capacity(layout.fields.len()),
        }
    }

    /// Set a field value. The name must exist in the layout.
    pub fn set(mut self, name: &'static str, value: impl Into<String>) -> Self {
        debug_assert!(
            self.layout.field(name).is_some(),
            "{} has no field {name}",
            self.layout.name
        );
        self.values.push((name, value.into()));
        self
    }

    fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Pack every field of the layout into a single line.
    pub fn encode(&self) -> Encoded {
        let mut line = String::with_capacity(LINE_WIDTH);
        let mut truncations = Vec::new();

        for field in self.layout.fields {
            let value = match field.fill {
                Fill::Const(literal) => literal,
                Fill::Input => self.value(field.name).unwrap_or(""),
            };
            let length = normalize_text(value).len();
            if length > field.width {
                truncations.push(Truncation {
                    record: self.layout.name,
                    field: field.name,
                    width: field.width,
                    length,
                });
            }
            match field.kind {
                FieldKind::Numeric => line.push_str(&pack_numeric(value, field.width)),
                FieldKind::Text => line.push_str(&pack_text(value, field.width)),
            }
        }

        debug_assert_eq!(line.len(), LINE_WIDTH, "{} encoded to wrong width", self.layout.name);
        Encoded { line, truncations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnab240::layout::{BATCH_TRAILER, FILE_TRAILER};

    #[test]
    fn unset_fields_use_kind_defaults() {
        let encoded = Record::new(&FILE_TRAILER).set("bank_code", "341").encode();
        assert_eq!(&encoded.line[..8], "34199999");
        assert_eq!(&encoded.line[8..17], " ".repeat(9));
        assert_eq!(&encoded.line[17..29], "000000000000");
        assert_eq!(encoded.line.len(), LINE_WIDTH);
        assert!(encoded.truncations.is_empty());
    }

    #[test]
    fn numeric_fields_are_right_aligned() {
        let line = Record::new(&BATCH_TRAILER)
            .set("bank_code", "341")
            .set("batch_number", "1")
            .set("record_count", "4")
            .set("total_amount", "150000")
            .encode()
            .line;
        assert_eq!(&line[..8], "34100015");
        assert_eq!(&line[17..23], "000004");
        assert_eq!(&line[23..41], "000000000000150000");
        assert_eq!(&line[41..59], "0".repeat(18));
    }

    #[test]
    fn reports_truncated_values() {
        let encoded = Record::new(&BATCH_TRAILER)
            .set("bank_code", "341")
            .set("batch_number", "123456")
            .encode();
        assert_eq!(&encoded.line[3..7], "1234");
        assert_eq!(
            encoded.truncations,
            vec![Truncation {
                record: "batch trailer",
                field: "batch_number",
                width: 4,
                length: 6,
            }]
        );
    }
}
