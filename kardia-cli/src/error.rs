use kardia_types::AtcError;
use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Ошибка чтения контейнера
    #[error("Container error: {0}")]
    Atc(#[from] AtcError),

    /// Ошибка ввода/вывода при записи результата
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка JSON сериализации
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Некорректные параметры
    #[error("Config error: {0}")]
    Config(String),
}
