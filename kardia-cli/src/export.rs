use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use byteorder::{LittleEndian, WriteBytesExt};
use kardia_core::AtcReader;
use kardia_types::{AtcError, LeadId};
use log::{info, warn};
use serde::Serialize;

use crate::{CliError, CliResult, ExportConfig, OutputFormat};

/// Итог выгрузки отведения.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub output_path: PathBuf,
    pub lead: LeadId,
    pub samples: usize,
    pub sample_rate_hz: Option<u16>,
    pub bytes_written: u64,
}

#[derive(Serialize)]
struct LeadExport<'a> {
    sample_rate_hz: Option<u16>,
    lead: LeadId,
    samples: &'a [i16],
}

/// Читает отведение из контейнера и записывает его в выбранном формате.
pub fn export_lead(config: &ExportConfig) -> CliResult<ExportSummary> {
    let mut reader = AtcReader::open(&config.input_path)?;
    let samples = reader.read_lead_samples(config.lead)?;

    let sample_rate_hz = match reader.read_sample_rate() {
        Ok(rate) => Some(rate),
        Err(AtcError::UnknownBlock(tag)) if config.format != OutputFormat::Json => {
            warn!("No {tag} block: sample rate unknown, exporting samples only");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let output_path = config.resolve_output_path();
    if output_path == config.input_path {
        return Err(CliError::Config(format!(
            "output path {output_path:?} would overwrite the input"
        )));
    }

    let mut out = BufWriter::new(File::create(&output_path)?);
    write_samples(&mut out, &samples, config.format, config.lead, sample_rate_hz)?;
    out.flush()?;

    let bytes_written = out.get_ref().metadata()?.len();

    info!(
        "Lead {} → {:?}: {} samples, {} bytes ({})",
        config.lead,
        output_path,
        samples.len(),
        bytes_written,
        config.format
    );

    Ok(ExportSummary {
        output_path,
        lead: config.lead,
        samples: samples.len(),
        sample_rate_hz,
        bytes_written,
    })
}

/// Сериализует выборки в `out`.
///
/// `F32` — преобразование `i16 as f32` без масштабирования.
pub fn write_samples<W: Write>(
    out: &mut W,
    samples: &[i16],
    format: OutputFormat,
    lead: LeadId,
    sample_rate_hz: Option<u16>,
) -> CliResult<()> {
    match format {
        OutputFormat::I16 => {
            for &s in samples {
                out.write_i16::<LittleEndian>(s)?;
            }
        }
        OutputFormat::F32 => {
            for &s in samples {
                out.write_f32::<LittleEndian>(s as f32)?;
            }
        }
        OutputFormat::Json => {
            let doc = LeadExport {
                sample_rate_hz,
                lead,
                samples,
            };
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            out.write_all(b"\n")?;
        }
    }

    Ok(())
}
