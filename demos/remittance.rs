use chrono::NaiveDate;
use remessa::cnab240::*;
use remessa::core::*;
use rust_decimal_macros::dec;

fn main() {
    // RUST_LOG=debug shows batch summaries and truncation warnings
    env_logger::init();

    let payer = PayerProfileBuilder::new("Comércio São João Ltda", "12.345.678/0001-99")
        .account("1234", "567890", "1")
        .build();
    let day = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();

    let mut payments = vec![
        PaymentRecordBuilder::new("NF-1001", PaymentMethod::Boleto, dec!(1500.00), day)
            .payee("Fornecedor X", "98.765.432/0001-10")
            .due_date(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap())
            .barcode("34191.23454 67890.123457 67890.123457 5 10000000150000")
            .build(),
        PaymentRecordBuilder::new("PIX-7", PaymentMethod::InstantPayment, dec!(250.50), day)
            .payee("Maria Silva", "123.456.789-01")
            .pix_key("maria@example.com")
            .memo("Aluguel junho")
            .build(),
        PaymentRecordBuilder::new("TED-3", PaymentMethod::Transfer, dec!(3200), day)
            .payee("Distribuidora de Materiais de Construção Ltda", "11.222.333/0001-81")
            .destination("001", "4321", "98765", "0")
            .build(),
        PaymentRecordBuilder::new("DARF-6", PaymentMethod::Tribute, dec!(1743.59), day)
            .payee("Receita Federal", "")
            .barcode("846700000017435900240209024050002435842210108119")
            .build(),
    ];

    // ── 1. Preflight: errors block, warnings are for review ──────────
    let config = Cnab240Config::default();
    let report = preflight(&payer, &payments, &config);
    println!("=== Preflight ===");
    for e in &report.errors {
        println!("  error: {e}");
    }
    for w in &report.warnings {
        println!("  warning: {w}");
    }
    if !report.is_ok() {
        return;
    }

    // ── 2. Generate ──────────────────────────────────────────────────
    let mut sequence = FileSequence::new();
    let file_sequence = match sequence.next_number() {
        Ok(n) => n,
        Err(e) => {
            println!("numbering failed: {e}");
            return;
        }
    };
    let content = match generate_now(&payer, &payments, file_sequence, &config) {
        Ok(content) => content,
        Err(e) => {
            println!("generation failed: {e}");
            return;
        }
    };

    let now = chrono::Local::now().naive_local();
    println!("\n=== {} ===", remittance_file_name(&payer, now));
    for (i, line) in content.lines().enumerate() {
        println!("{:>3} {}", i + 1, &line[..80]);
    }
    println!("... ({} bytes total)", content.len());
    mark_processed(&mut payments);

    // ── 3. Rejected input ────────────────────────────────────────────
    let mut broken = payments[0].clone();
    broken.barcode = Some("34195100000001500001234567890123456789012346".into());
    match generate_now(&payer, &[broken], 2, &config) {
        Ok(_) => println!("\nunexpectedly accepted"),
        Err(e) => println!("\n=== Rejected ===\n  {e}"),
    }
}
