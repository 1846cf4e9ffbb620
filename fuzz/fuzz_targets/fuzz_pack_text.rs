#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let width = usize::from(data.first().copied().unwrap_or(1)).max(1);
        let text = remessa::core::pack_text(s, width);
        let numeric = remessa::core::pack_numeric(s, width);
        assert_eq!(text.len(), width);
        assert_eq!(numeric.len(), width);
        assert!(text.is_ascii() && numeric.is_ascii());
    }
});
