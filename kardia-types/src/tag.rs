use serde::{Serialize, Serializer};

/// Длина тега блока в байтах
pub const BLOCK_TAG_LEN: usize = 4;

/// 4-байтовый идентификатор блока.
///
/// Тег непрозрачен: он не сверяется с закрытым словарём, и неизвестные теги
/// попадают в индекс наравне с известными. Известные теги ASCII, но в общем
/// случае байты могут быть любыми.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockTag([u8; BLOCK_TAG_LEN]);

impl BlockTag {
    /// Блок описания формата (частота дискретизации)
    pub const FMT: BlockTag = BlockTag(*b"fmt ");
    /// Отведение 1
    pub const ECG: BlockTag = BlockTag(*b"ecg ");
    /// Отведение 2
    pub const ECG2: BlockTag = BlockTag(*b"ecg2");
    /// Отведение 3
    pub const ECG3: BlockTag = BlockTag(*b"ecg3");
    /// Отведение 4
    pub const ECG4: BlockTag = BlockTag(*b"ecg4");
    /// Отведение 5
    pub const ECG5: BlockTag = BlockTag(*b"ecg5");
    /// Отведение 6
    pub const ECG6: BlockTag = BlockTag(*b"ecg6");

    pub const fn new(bytes: [u8; BLOCK_TAG_LEN]) -> Self {
        BlockTag(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_TAG_LEN] {
        &self.0
    }
}

impl From<[u8; BLOCK_TAG_LEN]> for BlockTag {
    fn from(bytes: [u8; BLOCK_TAG_LEN]) -> Self {
        BlockTag(bytes)
    }
}

impl std::fmt::Display for BlockTag {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for BlockTag {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "BlockTag(\"{self}\")")
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
