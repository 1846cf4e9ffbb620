//! Property-based tests for remittance assembly.
//!
//! Run with: `cargo test --features all --test proptest_tests`

#![cfg(feature = "cnab240")]

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use remessa::cnab240::*;
use remessa::core::*;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> NaiveDateTime {
    date(2024, 6, 15).and_hms_opt(9, 30, 5).unwrap()
}

fn payer() -> PayerProfile {
    PayerProfileBuilder::new("ACME LTDA", "12345678000199")
        .account("1234", "567890", "1")
        .build()
}

/// Payment kinds covering every batch key and segment combination.
#[derive(Debug, Clone, Copy)]
enum Kind {
    OwnBoleto,
    OtherBoleto,
    Tribute,
    PixKey,
    PixAccount,
    OwnTransfer,
    OtherTransfer,
}

fn arb_kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::OwnBoleto),
        Just(Kind::OtherBoleto),
        Just(Kind::Tribute),
        Just(Kind::PixKey),
        Just(Kind::PixAccount),
        Just(Kind::OwnTransfer),
        Just(Kind::OtherTransfer),
    ]
}

fn build(kind: Kind, id: String, name: String, cents: i64) -> PaymentRecord {
    let amount = Decimal::new(cents, 2);
    let day = date(2024, 6, 17);
    let base = |method| {
        PaymentRecordBuilder::new(id.clone(), method, amount, day).payee(name.clone(), "12345678901")
    };
    match kind {
        Kind::OwnBoleto => base(PaymentMethod::Boleto)
            .barcode("34195100000001500001234567890123456789012345")
            .build(),
        Kind::OtherBoleto => base(PaymentMethod::Boleto)
            .barcode("23791100000000123459876543210987654321098765")
            .build(),
        Kind::Tribute => base(PaymentMethod::Tribute)
            .barcode("846700000017435900240209024050002435842210108119")
            .build(),
        Kind::PixKey => base(PaymentMethod::InstantPayment)
            .pix_key("chave@example.com")
            .build(),
        Kind::PixAccount => base(PaymentMethod::InstantPayment)
            .destination("260", "1", "1234567", "8")
            .build(),
        Kind::OwnTransfer => base(PaymentMethod::Transfer)
            .destination("341", "4321", "98765", "0")
            .build(),
        Kind::OtherTransfer => base(PaymentMethod::Transfer)
            .destination("001", "4321", "98765", "0")
            .build(),
    }
}

fn arb_payment() -> impl Strategy<Value = PaymentRecord> {
    (
        arb_kind(),
        "[A-Z0-9]{1,20}",
        "[a-zA-Záéíóúãõç][a-zA-Záéíóúãõç ]{0,45}",
        1i64..=99_999_999_999,
    )
        .prop_map(|(kind, id, name, cents)| build(kind, id, name, cents))
}

fn arb_payments() -> impl Strategy<Value = Vec<PaymentRecord>> {
    prop::collection::vec(arb_payment(), 1..40)
}

fn field(line: &str, start: usize, end: usize) -> u64 {
    line[start..end].parse().unwrap()
}

/// Amount carried by a detail line, if it is the amount-bearing segment.
fn detail_amount(line: &str) -> Option<u64> {
    match &line[13..14] {
        "A" => Some(field(line, 119, 134)),
        "J" if &line[19..21] != "52" => Some(field(line, 101, 116)),
        "O" => Some(field(line, 123, 138)),
        _ => None,
    }
}

proptest! {
    #[test]
    fn every_line_is_fixed_width(payments in arb_payments()) {
        let content = generate(&payer(), &payments, 1, now(), &Cnab240Config::default()).unwrap();
        prop_assert!(content.ends_with("\r\n"));
        for line in content.split_terminator("\r\n") {
            prop_assert_eq!(line.len(), 240);
            prop_assert!(line.is_ascii());
        }
    }

    #[test]
    fn file_trailer_counts_match(payments in arb_payments()) {
        let content = generate(&payer(), &payments, 1, now(), &Cnab240Config::default()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        let trailer = lines.last().unwrap();
        let batches = lines.iter().filter(|l| &l[7..8] == "1").count() as u64;
        prop_assert_eq!(field(trailer, 17, 23), batches);
        prop_assert_eq!(field(trailer, 23, 29), lines.len() as u64);
    }

    #[test]
    fn batch_trailers_match_their_details(payments in arb_payments()) {
        let content = generate(&payer(), &payments, 1, now(), &Cnab240Config::default()).unwrap();
        let lines: Vec<_> = content.lines().collect();

        let mut start = 0;
        let mut grand_total = 0u64;
        for (i, line) in lines.iter().enumerate() {
            match &line[7..8] {
                "1" => start = i,
                "5" => {
                    let details = &lines[start + 1..i];
                    let sum: u64 = details.iter().filter_map(|l| detail_amount(l)).sum();
                    prop_assert_eq!(field(line, 17, 23), (i - start + 1) as u64);
                    prop_assert_eq!(field(line, 23, 41), sum);
                    prop_assert_eq!(&line[3..7], &lines[start][3..7]);
                    for (n, detail) in details.iter().enumerate() {
                        prop_assert_eq!(field(detail, 8, 13), n as u64 + 1);
                    }
                    grand_total += sum;
                }
                _ => {}
            }
        }

        let expected: i64 = payments.iter().filter_map(PaymentRecord::amount_cents).sum();
        prop_assert_eq!(grand_total, expected as u64);
    }

    #[test]
    fn paired_segments_stay_together(payments in arb_payments()) {
        let content = generate(&payer(), &payments, 1, now(), &Cnab240Config::default()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            if &line[7..8] != "3" {
                continue;
            }
            let is_j52 = &line[13..14] == "J" && &line[19..21] == "52";
            if &line[13..14] == "J" && !is_j52 {
                let next = lines[i + 1];
                prop_assert!(&next[13..14] == "J" && &next[19..21] == "52");
            }
            if is_j52 {
                prop_assert_eq!(&lines[i - 1][13..14], "J");
            }
            if &line[13..14] == "B" {
                prop_assert_eq!(&lines[i - 1][13..14], "A");
                prop_assert_eq!(&lines[i - 1][17..20], "009");
            }
        }
    }

    #[test]
    fn every_payment_lands_in_exactly_one_batch(payments in arb_payments()) {
        let assembly = assemble(&payer(), &payments, 1, now(), &Cnab240Config::default());
        let counted: usize = assembly.batches.iter().map(|b| b.payment_count).sum();
        prop_assert_eq!(counted, payments.len());
        let keys: HashSet<_> = assembly.batches.iter().map(|b| b.key).collect();
        prop_assert_eq!(keys.len(), assembly.batches.len());
    }

    #[test]
    fn generation_is_idempotent(payments in arb_payments(), seq in 1u32..=999_999) {
        let config = Cnab240Config::default();
        let first = generate(&payer(), &payments, seq, now(), &config).unwrap();
        let second = generate(&payer(), &payments, seq, now(), &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn packing_always_fills_the_slot(value in "\\PC{0,80}", width in 1usize..120) {
        let text = pack_text(&value, width);
        let numeric = pack_numeric(&value, width);
        prop_assert_eq!(text.len(), width);
        prop_assert_eq!(numeric.len(), width);
        prop_assert!(text.is_ascii() && numeric.is_ascii());
    }

    #[test]
    fn normalization_is_idempotent(value in "\\PC{0,80}") {
        let once = normalize_text(&value);
        prop_assert_eq!(normalize_text(&once), once.clone());
    }
}
