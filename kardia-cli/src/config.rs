use std::path::{Path, PathBuf};

use kardia_types::LeadId;

/// Формат выгрузки выборок отведения.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Сырые little-endian i16, как в контейнере
    I16,
    /// Сырые little-endian f32 без масштабирования (вход для демодулятора)
    F32,
    /// JSON: частота дискретизации, номер отведения, выборки
    Json,
}

/// Полная конфигурация выгрузки одного отведения.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Путь к .atc контейнеру
    pub input_path: PathBuf,
    /// Выгружаемое отведение
    pub lead: LeadId,
    /// Формат результата
    pub format: OutputFormat,
    /// Путь результата (None = рядом с входным файлом)
    pub output_path: Option<PathBuf>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl OutputFormat {
    /// Расширение файла по умолчанию.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::I16 => "i16",
            OutputFormat::F32 => "f32",
            OutputFormat::Json => "json",
        }
    }
}

impl ExportConfig {
    /// Итоговый путь результата.
    ///
    /// Без явного `output_path`: `<каталог входа>/<имя входа>.lead<N>.<ext>`.
    pub fn resolve_output_path(&self) -> PathBuf {
        if let Some(p) = &self.output_path {
            return p.clone();
        }

        let stem = self
            .input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording".to_string());
        let name = format!("{stem}.lead{}.{}", self.lead, self.format.extension());

        self.input_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(name)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для OutputFormat, ExportConfig
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for OutputFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i16" | "int16" | "raw" => Ok(OutputFormat::I16),
            "f32" | "float32" => Ok(OutputFormat::F32),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{s}'. Use: i16, f32, json")),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("recording.atc"),
            lead: LeadId::default(),
            format: OutputFormat::F32,
            output_path: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
