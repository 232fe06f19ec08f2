use std::path::{Path, PathBuf};

use kardia_core::{AtcReader, HEADER_REGION_LEN, LEAD_SAMPLE_SIZE};
use kardia_types::{AtcError, BlockTag, LeadId};
use log::warn;
use serde::Serialize;

use crate::CliResult;

/// Сводка по контейнеру для `kardia info`.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerInfo {
    pub path: PathBuf,
    /// Непрозрачная область заголовка (None, если файл обрывается раньше)
    pub header_region: Option<[u8; HEADER_REGION_LEN]>,
    pub sample_rate_hz: Option<u16>,
    pub blocks: Vec<BlockInfo>,
    pub leads: Vec<LeadInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockInfo {
    pub tag: BlockTag,
    pub offset: u64,
    pub length: u32,
    /// Сохранённая (не проверенная) контрольная сумма
    pub checksum: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadInfo {
    pub lead: LeadId,
    pub samples: u32,
    pub duration_secs: Option<f64>,
}

/// Собирает сводку, не декодируя выборки: число выборок берётся из длины
/// полезной нагрузки.
pub fn collect_info<P: AsRef<Path>>(path: P) -> CliResult<ContainerInfo> {
    let path = path.as_ref();
    let mut reader = AtcReader::open(path)?;
    let index = reader.block_index();

    let header_region = reader.header_region().ok();

    let sample_rate_hz = match reader.read_sample_rate() {
        Ok(rate) => Some(rate),
        Err(AtcError::UnknownBlock(_)) => None,
        Err(e) if e.is_truncated() => {
            warn!("Sample rate field unreadable: {e}");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let mut blocks = Vec::with_capacity(index.len());
    for (tag, entry) in &index {
        let checksum = match reader.read_block_checksum(tag) {
            Ok(c) => Some(c),
            Err(e) if e.is_truncated() => {
                warn!("Block {tag}: checksum missing ({e})");
                None
            }
            Err(e) => return Err(e.into()),
        };

        blocks.push(BlockInfo {
            tag: *tag,
            offset: entry.offset,
            length: entry.length,
            checksum,
        });
    }

    let leads = reader
        .available_leads()
        .into_iter()
        .filter_map(|lead| {
            let entry = index.get(&lead.tag())?;
            let samples = entry.length / LEAD_SAMPLE_SIZE as u32;
            let duration_secs = sample_rate_hz
                .filter(|&r| r > 0)
                .map(|r| samples as f64 / r as f64);

            Some(LeadInfo {
                lead,
                samples,
                duration_secs,
            })
        })
        .collect();

    Ok(ContainerInfo {
        path: path.to_path_buf(),
        header_region,
        sample_rate_hz,
        blocks,
        leads,
    })
}

impl std::fmt::Display for ContainerInfo {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  File          : {:?}", self.path)?;

        match &self.header_region {
            Some(r) => writeln!(f, "  Header region : {r:02x?}")?,
            None => writeln!(f, "  Header region : (truncated)")?,
        }

        match self.sample_rate_hz {
            Some(r) => writeln!(f, "  Sample rate   : {r} Hz")?,
            None => writeln!(f, "  Sample rate   : unknown")?,
        }

        writeln!(f, "  Blocks        : {}", self.blocks.len())?;
        for b in &self.blocks {
            let crc = b
                .checksum
                .map(|c| format!("{c:08x}"))
                .unwrap_or_else(|| "--------".to_string());
            writeln!(
                f,
                "    [{}] {:>10} bytes @ {:#010x}  crc {crc}",
                b.tag, b.length, b.offset
            )?;
        }

        for l in &self.leads {
            match l.duration_secs {
                Some(d) => writeln!(
                    f,
                    "  Lead {}        : {} samples ({d:.2}s)",
                    l.lead, l.samples
                )?,
                None => writeln!(f, "  Lead {}        : {} samples", l.lead, l.samples)?,
            }
        }

        write!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_container(raw: &[u8]) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(raw).unwrap();
        tmp.flush().unwrap();
        tmp
    }

    #[test]
    fn test_collect_info() {
        let mut raw = b"ALIVE\x01\x02\x03\x04\x05\x06\x07".to_vec();
        raw.extend_from_slice(b"fmt \x04\x00\x00\x00\x00\xC8\x00\x00");
        raw.extend_from_slice(&0x1122_3344u32.to_le_bytes());
        raw.extend_from_slice(b"ecg \x08\x00\x00\x00");
        raw.extend_from_slice(&[0u8; 8]);
        raw.extend_from_slice(&[0u8; 4]);

        let tmp = temp_container(&raw);
        let info = collect_info(tmp.path()).unwrap();

        assert_eq!(info.header_region, Some([1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(info.sample_rate_hz, Some(200));
        assert_eq!(info.blocks.len(), 2);

        let fmt = info.blocks.iter().find(|b| b.tag == BlockTag::FMT).unwrap();
        assert_eq!(fmt.offset, 20);
        assert_eq!(fmt.checksum, Some(0x1122_3344));

        assert_eq!(info.leads.len(), 1);
        assert_eq!(info.leads[0].samples, 4);
        assert_eq!(info.leads[0].duration_secs, Some(0.02));

        let text = info.to_string();
        assert!(text.contains("200 Hz"));
        assert!(text.contains("[ecg ]"));
    }

    #[test]
    fn test_collect_info_missing_checksum() {
        // Последний блок без контрольной суммы
        let mut raw = b"ALIVE\0\0\0\0\0\0\0".to_vec();
        raw.extend_from_slice(b"ecg3\x02\x00\x00\x00\x05\x00");

        let tmp = temp_container(&raw);
        let info = collect_info(tmp.path()).unwrap();

        assert_eq!(info.sample_rate_hz, None);
        assert_eq!(info.blocks[0].checksum, None);
        assert_eq!(info.leads[0].duration_secs, None);
    }

    #[test]
    fn test_collect_info_json() {
        let tmp = temp_container(b"ALIVE\0\0\0\0\0\0\0");
        let info = collect_info(tmp.path()).unwrap();

        let v = serde_json::to_value(&info).unwrap();
        assert_eq!(v["blocks"], serde_json::json!([]));
        assert!(v["sample_rate_hz"].is_null());
    }

    #[test]
    fn test_collect_info_rejects_bad_magic() {
        let tmp = temp_container(b"RIFF\0\0\0\0");
        assert!(collect_info(tmp.path()).is_err());
    }
}
