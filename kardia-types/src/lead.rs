use serde::Serialize;

use crate::{AtcError, AtcResult, BlockTag};

/// Номер отведения ЭКГ (1..=6).
///
/// Каждое отведение хранится в отдельном блоке: 1 → `ecg `, 2..=6 → `ecg2`..`ecg6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LeadId(u8);

impl LeadId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Проверяет номер и создаёт идентификатор отведения.
    pub fn new(id: u8) -> AtcResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(LeadId(id))
        } else {
            Err(AtcError::InvalidLeadId(id))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Тег блока, в котором хранится отведение.
    pub fn tag(&self) -> BlockTag {
        match self.0 {
            1 => BlockTag::ECG,
            2 => BlockTag::ECG2,
            3 => BlockTag::ECG3,
            4 => BlockTag::ECG4,
            5 => BlockTag::ECG5,
            _ => BlockTag::ECG6,
        }
    }

    /// Все шесть отведений по возрастанию.
    pub fn all() -> impl Iterator<Item = LeadId> {
        (Self::MIN..=Self::MAX).map(LeadId)
    }
}

/// Отведение 1.
impl Default for LeadId {
    fn default() -> Self {
        LeadId(Self::MIN)
    }
}

impl TryFrom<u8> for LeadId {
    type Error = AtcError;

    fn try_from(id: u8) -> AtcResult<Self> {
        LeadId::new(id)
    }
}

impl std::fmt::Display for LeadId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
