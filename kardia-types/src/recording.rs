use std::collections::BTreeMap;

use serde::Serialize;

use crate::LeadId;

/// Декодированная запись: частота дискретизации и выборки всех
/// присутствующих отведений.
///
/// Форма данных, которую получают потребители (фильтрация, демодуляция):
/// `(sample_rate: u16, samples: [i16])` на каждое отведение. Масштабирование
/// не применяется.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recording {
    /// Частота дискретизации в Гц
    pub sample_rate_hz: u16,
    /// Сырые выборки по отведениям
    pub leads: BTreeMap<LeadId, Vec<i16>>,
}

impl Recording {
    pub fn new(sample_rate_hz: u16) -> Self {
        Recording {
            sample_rate_hz,
            leads: BTreeMap::new(),
        }
    }

    pub fn lead(
        &self,
        lead: LeadId,
    ) -> Option<&[i16]> {
        self.leads.get(&lead).map(Vec::as_slice)
    }

    /// Длительность отведения в секундах (`None`, если отведения нет или
    /// частота равна нулю).
    pub fn duration_secs(
        &self,
        lead: LeadId,
    ) -> Option<f64> {
        if self.sample_rate_hz == 0 {
            return None;
        }

        self.leads
            .get(&lead)
            .map(|s| s.len() as f64 / self.sample_rate_hz as f64)
    }
}
