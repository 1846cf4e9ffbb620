#![no_main]

use libfuzzer_sys::fuzz_target;
use remessa::core::barcode;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Any input either converts to 44 digits or is rejected.
        if let Some(code) = barcode::boleto_barcode(s) {
            assert_eq!(code.len(), barcode::BARCODE_LEN);
            let _ = barcode::is_valid_boleto_barcode(&code);
            let _ = barcode::issuing_bank(&code);
        }
        let _ = barcode::tribute_barcode(s);
    }
});
