//! Пример: чтение ATC-контейнера через AtcReader
//!
//! Демонстрирует:
//! - открытие файла и проверку магической строки
//! - просмотр индекса блоков
//! - чтение частоты дискретизации и выборок отведений

use kardia_core::AtcReader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "recording.atc".to_string());

    // --- AtcReader проверяет заголовок и строит индекс при открытии ---
    let mut reader = match AtcReader::open(&input_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ Failed to open {input_path}: {e}");
            return Err(Box::new(e));
        }
    };

    println!("✓ Header validated");
    println!("\nBlocks:");
    for (tag, entry) in &reader.block_index() {
        println!(
            "  [{tag}] payload {:>8} bytes @ {:#010x}",
            entry.length, entry.offset
        );
    }

    match reader.read_sample_rate() {
        Ok(rate) => println!("\n  Sample Rate : {rate} Hz"),
        Err(e) => println!("\n  Sample Rate : ✗ {e}"),
    }

    for lead in reader.available_leads() {
        let samples = reader.read_lead_samples(lead)?;
        let preview: Vec<i16> = samples.iter().take(8).copied().collect();
        println!("  Lead {lead}      : {} samples {preview:?}", samples.len());
    }

    Ok(())
}
