//! Библиотека чтения контейнеров ALIVE (.atc)
//!
//! Эталонный читатель блочного бинарного контейнера, в котором ЭКГ-регистратор
//! хранит метаданные калибровки и выборки по отведениям.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use kardia_core::AtcReader;
//!
//! let mut reader = AtcReader::open("recording.atc")?;
//!
//! for (tag, entry) in &reader.block_index() {
//!     println!("{tag}: {} bytes at {:#x}", entry.length, entry.offset);
//! }
//!
//! let sample_rate = reader.read_sample_rate()?;
//! let lead_1 = reader.read_lead(1)?;
//! println!("{} samples @ {sample_rate} Hz", lead_1.len());
//! # Ok::<(), kardia_core::AtcError>(())
//! ```

pub mod binary;
pub mod format;
pub mod reader;

pub use binary::*;
pub use format::*;
pub use kardia_types::*;
pub use reader::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(&FILE_MAGIC, b"ALIVE");
        assert_eq!(FIRST_BLOCK_OFFSET, 0x0C);
        assert_eq!(BlockTag::FMT.as_bytes(), b"fmt ");
    }
}
