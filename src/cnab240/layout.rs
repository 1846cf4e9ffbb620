//! Record layouts of the SISPAG CNAB 240 profile.
//!
//! Each record kind is a table of fields with 1-based start positions.
//! Tables are contiguous from position 1 to [`LINE_WIDTH`]; the tests in
//! this module check that for every layout. Fields named `filler` or
//! `zeros` are never set by the assemblers.

/// Width of every CNAB 240 line in bytes.
pub const LINE_WIDTH: usize = 240;

/// How a value is packed into its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Right-aligned, zero-filled.
    Numeric,
    /// Left-aligned, space-filled.
    Text,
}

/// Where the value of a field comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Supplied by the assembler; missing values encode as zeros or spaces.
    Input,
    /// Fixed literal.
    Const(&'static str),
}

/// One fixed-width field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// 1-based first position.
    pub start: usize,
    pub width: usize,
    pub kind: FieldKind,
    pub fill: Fill,
}

impl FieldSpec {
    /// 1-based last position.
    pub const fn end(&self) -> usize {
        self.start + self.width - 1
    }
}

/// Field table of one record type.
#[derive(Debug)]
pub struct RecordLayout {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordLayout {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

const fn num(name: &'static str, start: usize, width: usize) -> FieldSpec {
    FieldSpec {
        name,
        start,
        width,
        kind: FieldKind::Numeric,
        fill: Fill::Input,
    }
}

const fn text(name: &'static str, start: usize, width: usize) -> FieldSpec {
    FieldSpec {
        name,
        start,
        width,
        kind: FieldKind::Text,
        fill: Fill::Input,
    }
}

const fn fixed(name: &'static str, start: usize, value: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        start,
        width: value.len(),
        kind: FieldKind::Text,
        fill: Fill::Const(value),
    }
}

const fn filler(start: usize, width: usize) -> FieldSpec {
    text("filler", start, width)
}

const fn zeros(start: usize, width: usize) -> FieldSpec {
    num("zeros", start, width)
}

/// Registro 0.
pub static FILE_HEADER: RecordLayout = RecordLayout {
    name: "file header",
    fields: &[
        num("bank_code", 1, 3),
        fixed("batch_number", 4, "0000"),
        fixed("record_type", 8, "0"),
        filler(9, 9),
        num("inscription_type", 18, 1),
        num("tax_id", 19, 14),
        filler(33, 20),
        num("branch", 53, 5),
        filler(58, 1),
        num("account", 59, 12),
        filler(71, 1),
        num("check_digit", 72, 1),
        text("company_name", 73, 30),
        text("bank_name", 103, 30),
        filler(133, 10),
        fixed("file_code", 143, "1"),
        num("generation_date", 144, 8),
        num("generation_time", 152, 6),
        num("file_sequence", 158, 6),
        num("layout_version", 164, 3),
        zeros(167, 5),
        filler(172, 69),
    ],
};

/// Registro 1.
pub static BATCH_HEADER: RecordLayout = RecordLayout {
    name: "batch header",
    fields: &[
        num("bank_code", 1, 3),
        num("batch_number", 4, 4),
        fixed("record_type", 8, "1"),
        fixed("operation", 9, "C"),
        num("service_type", 10, 2),
        num("payment_form", 12, 2),
        num("layout_version", 14, 3),
        filler(17, 1),
        num("inscription_type", 18, 1),
        num("tax_id", 19, 14),
        filler(33, 20),
        num("branch", 53, 5),
        filler(58, 1),
        num("account", 59, 12),
        filler(71, 1),
        num("check_digit", 72, 1),
        text("company_name", 73, 30),
        filler(103, 138),
    ],
};

/// Registro 3, Segmento A: credit to an account (TED, internal credit, PIX).
pub static SEGMENT_A: RecordLayout = RecordLayout {
    name: "segment A",
    fields: &[
        num("bank_code", 1, 3),
        num("batch_number", 4, 4),
        fixed("record_type", 8, "3"),
        num("sequence", 9, 5),
        fixed("segment", 14, "A"),
        fixed("movement_type", 15, "000"),
        num("channel", 18, 3),
        num("dest_bank", 21, 3),
        num("dest_branch", 24, 5),
        filler(29, 1),
        num("dest_account", 30, 12),
        num("dest_check_digit", 42, 1),
        filler(43, 1),
        text("payee_name", 44, 30),
        num("reference", 74, 20),
        num("payment_date", 94, 8),
        fixed("currency", 102, "REA"),
        zeros(105, 8),
        num("initiation_form", 113, 2),
        zeros(115, 5),
        num("amount", 120, 15),
        filler(135, 15),
        filler(150, 5),
        zeros(155, 8),
        zeros(163, 15),
        filler(178, 20),
        filler(198, 6),
        num("payee_tax_id", 204, 14),
        filler(218, 2),
        num("transfer_purpose", 220, 5),
        filler(225, 5),
        fixed("notice", 230, "0"),
        filler(231, 10),
    ],
};

/// Registro 3, Segmento B: PIX key and memo following an instant-payment A.
pub static SEGMENT_B: RecordLayout = RecordLayout {
    name: "segment B",
    fields: &[
        num("bank_code", 1, 3),
        num("batch_number", 4, 4),
        fixed("record_type", 8, "3"),
        num("sequence", 9, 5),
        fixed("segment", 14, "B"),
        fixed("movement_type", 15, "000"),
        num("payee_inscription_type", 18, 1),
        num("payee_tax_id", 19, 14),
        filler(33, 30),
        text("memo", 63, 65),
        text("pix_key", 128, 100),
        filler(228, 13),
    ],
};

/// Registro 3, Segmento J: boleto payment.
pub static SEGMENT_J: RecordLayout = RecordLayout {
    name: "segment J",
    fields: &[
        num("bank_code", 1, 3),
        num("batch_number", 4, 4),
        fixed("record_type", 8, "3"),
        num("sequence", 9, 5),
        fixed("segment", 14, "J"),
        filler(15, 3),
        fixed("movement_code", 18, "01"),
        text("barcode", 20, 44),
        text("payee_name", 64, 30),
        num("due_date", 94, 8),
        num("title_amount", 102, 15),
        num("discount", 117, 15),
        num("surcharge", 132, 15),
        num("payment_date", 147, 8),
        num("payment_amount", 155, 15),
        zeros(170, 15),
        num("reference", 185, 20),
        filler(205, 36),
    ],
};

/// Registro 3, Segmento J-52: payer and beneficiary of the boleto.
pub static SEGMENT_J52: RecordLayout = RecordLayout {
    name: "segment J-52",
    fields: &[
        num("bank_code", 1, 3),
        num("batch_number", 4, 4),
        fixed("record_type", 8, "3"),
        num("sequence", 9, 5),
        fixed("segment", 14, "J"),
        filler(15, 3),
        fixed("movement_code", 18, "01"),
        fixed("record_id", 20, "52"),
        num("payer_inscription_type", 22, 1),
        num("payer_tax_id", 23, 15),
        text("payer_name", 38, 40),
        num("payee_inscription_type", 78, 1),
        num("payee_tax_id", 79, 15),
        text("payee_name", 94, 40),
        zeros(134, 16),
        filler(150, 91),
    ],
};

/// Registro 3, Segmento O: tribute and utility bills paid by barcode.
pub static SEGMENT_O: RecordLayout = RecordLayout {
    name: "segment O",
    fields: &[
        num("bank_code", 1, 3),
        num("batch_number", 4, 4),
        fixed("record_type", 8, "3"),
        num("sequence", 9, 5),
        fixed("segment", 14, "O"),
        filler(15, 3),
        fixed("movement_code", 18, "01"),
        text("barcode", 20, 48),
        text("payee_name", 68, 30),
        num("due_date", 98, 8),
        fixed("currency", 106, "REA"),
        zeros(109, 15),
        num("amount", 124, 15),
        num("payment_date", 139, 8),
        num("paid_amount", 147, 15),
        num("reference", 162, 20),
        filler(182, 59),
    ],
};

/// Registro 5.
pub static BATCH_TRAILER: RecordLayout = RecordLayout {
    name: "batch trailer",
    fields: &[
        num("bank_code", 1, 3),
        num("batch_number", 4, 4),
        fixed("record_type", 8, "5"),
        filler(9, 9),
        num("record_count", 18, 6),
        num("total_amount", 24, 18),
        zeros(42, 18),
        filler(60, 171),
        filler(231, 10),
    ],
};

/// Registro 9.
pub static FILE_TRAILER: RecordLayout = RecordLayout {
    name: "file trailer",
    fields: &[
        num("bank_code", 1, 3),
        fixed("batch_number", 4, "9999"),
        fixed("record_type", 8, "9"),
        filler(9, 9),
        num("batch_count", 18, 6),
        num("record_count", 24, 6),
        filler(30, 211),
    ],
};

/// Every layout, for table-wide checks.
pub static ALL_LAYOUTS: [&RecordLayout; 9] = [
    &FILE_HEADER,
    &BATCH_HEADER,
    &SEGMENT_A,
    &SEGMENT_B,
    &SEGMENT_J,
    &SEGMENT_J52,
    &SEGMENT_O,
    &BATCH_TRAILER,
    &FILE_TRAILER,
];
