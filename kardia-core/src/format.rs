//! Раскладка контейнера ALIVE (.atc)
//!
//! Все многобайтовые числа хранятся в порядке little-endian.
//!
//! ```text
//! 0x00        MAGIC           5 байт  — литерал "ALIVE"
//! 0x05..0x0C  HEADER_REGION   7 байт  — не интерпретируется
//! 0x0C        первый блок
//!
//! Блок:
//! +0          TAG             4 байта — непрозрачный идентификатор
//! +4          LENGTH (N)      u32
//! +8          PAYLOAD         N байт
//! +8+N        CHECKSUM        4 байта — не проверяется
//! ```

/// Магическая строка в начале каждого контейнера: b"ALIVE"
pub const FILE_MAGIC: [u8; 5] = *b"ALIVE";

/// Размер непрозрачной области между магической строкой и первым блоком
pub const HEADER_REGION_LEN: usize = 7;

/// Абсолютное смещение заголовка первого блока
pub const FIRST_BLOCK_OFFSET: u64 = 0x0C;

/// Размер заголовка блока: тег (4) + длина (4)
pub const BLOCK_HEADER_LEN: usize = 8;

/// Размер контрольной суммы после полезной нагрузки
pub const BLOCK_CHECKSUM_LEN: usize = 4;

/// Смещение поля частоты дискретизации (u16) внутри блока `fmt `
pub const FMT_SAMPLE_RATE_OFFSET: u32 = 0x01;

/// Размер одной выборки отведения (i16)
pub const LEAD_SAMPLE_SIZE: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_consistent() {
        assert_eq!(
            FILE_MAGIC.len() + HEADER_REGION_LEN,
            FIRST_BLOCK_OFFSET as usize
        );
        assert_eq!(&FILE_MAGIC, b"ALIVE");
    }
}
