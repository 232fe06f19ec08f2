use thiserror::Error;

use crate::BlockTag;

/// Результат для операций чтения ATC контейнера
pub type AtcResult<T> = std::result::Result<T, AtcError>;

/// Типы ошибок чтения ATC контейнера.
#[derive(Debug, Error)]
pub enum AtcError {
    /// Источник не поддерживает позиционирование
    #[error("Source is not seekable: {0}")]
    UnseekableSource(#[source] std::io::Error),

    /// Первые 5 байт не равны магической строке `ALIVE`
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Запрошено больше байт, чем осталось до конца данных
    #[error(
        "Truncated read at offset {offset}: requested {requested} bytes, {available} available"
    )]
    TruncatedRead {
        offset: u64,
        requested: usize,
        available: usize,
    },

    /// Блок с таким тегом отсутствует в индексе
    #[error("Unknown block: {0}")]
    UnknownBlock(BlockTag),

    /// Номер отведения вне диапазона 1..=6
    #[error("Invalid lead identifier: {0} (expected 1..=6)")]
    InvalidLeadId(u8),

    /// Полезная нагрузка не делится на размер выборки
    #[error("Malformed payload in block {tag}: length {length} is not a multiple of 2")]
    MalformedPayload { tag: BlockTag, length: u32 },

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AtcError {
    /// Удобные конструкторы
    pub fn invalid_header<S: Into<String>>(s: S) -> Self {
        Self::InvalidHeader(s.into())
    }

    pub fn truncated(
        offset: u64,
        requested: usize,
        available: usize,
    ) -> Self {
        Self::TruncatedRead {
            offset,
            requested,
            available,
        }
    }

    /// `true` для [`AtcError::TruncatedRead`].
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = AtcError::truncated(12, 8, 3);
        assert!(e.is_truncated());
        assert_eq!(
            e.to_string(),
            "Truncated read at offset 12: requested 8 bytes, 3 available"
        );

        let e = AtcError::UnknownBlock(BlockTag::ECG2);
        assert!(!e.is_truncated());
        assert_eq!(e.to_string(), "Unknown block: ecg2");

        let e = AtcError::InvalidLeadId(7);
        assert!(e.to_string().contains("7"));
    }

    #[test]
    fn test_invalid_header_message() {
        let e = AtcError::invalid_header("magic string not found");
        assert_eq!(e.to_string(), "Invalid header: magic string not found");
    }
}
