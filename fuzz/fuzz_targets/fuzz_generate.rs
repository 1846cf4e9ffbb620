#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use remessa::cnab240::{Cnab240Config, generate};
use remessa::core::*;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut fields = s.split('|');
    let name = fields.next().unwrap_or_default();
    let key = fields.next().unwrap_or_default();
    let memo = fields.next().unwrap_or_default();

    let payer = PayerProfileBuilder::new(name, "12345678000199")
        .account("1234", "567890", "1")
        .build();
    let Some(day) = NaiveDate::from_ymd_opt(2024, 6, 17) else {
        return;
    };
    let payment = PaymentRecordBuilder::new(name, PaymentMethod::InstantPayment, rust_decimal::Decimal::ONE, day)
        .payee(name, "12345678901")
        .pix_key(key)
        .memo(memo)
        .build();

    // Validation errors are fine; a produced file must be well formed.
    if let Ok(content) = generate(&payer, &[payment], 1, day.and_time(Default::default()), &Cnab240Config::default()) {
        for line in content.split_terminator("\r\n") {
            assert_eq!(line.len(), 240);
        }
    }
});
