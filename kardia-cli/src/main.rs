use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kardia_cli::{collect_info, export_lead, CliError, CliResult, ExportConfig, OutputFormat};
use kardia_types::LeadId;
use log::{error, info, LevelFilter};

#[derive(Parser, Debug)]
#[command(
    name = "kardia",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect ALIVE (.atc) ECG containers and export lead samples",
    long_about = None,
)]
struct Cli {
    /// Тихий режим (только ошибки)
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Подробный вывод (индекс блоков, сканирование)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Заголовок, таблица блоков, частота дискретизации и отведения
    Info {
        /// Путь к .atc файлу
        file: PathBuf,
        /// Вывод в JSON
        #[arg(long)]
        json: bool,
    },
    /// Выгрузить выборки одного отведения
    Export {
        /// Путь к .atc файлу
        file: PathBuf,
        /// Номер отведения (1..=6)
        #[arg(short, long, default_value = "1")]
        lead: u8,
        /// Формат: i16, f32, json
        #[arg(short, long, default_value = "f32")]
        format: String,
        /// Путь к выходному файлу. По умолчанию: <file>.lead<N>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    if let Err(e) = run(cli.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> CliResult<()> {
    match command {
        Command::Info { file, json } => {
            let info = collect_info(&file)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{info}");
            }
        }
        Command::Export {
            file,
            lead,
            format,
            output,
        } => {
            let format: OutputFormat = format
                .parse()
                .map_err(CliError::Config)?;

            let config = ExportConfig {
                input_path: file,
                lead: LeadId::new(lead)?,
                format,
                output_path: output,
            };

            let summary = export_lead(&config)?;
            info!("✓ Export complete: {:?}", summary.output_path);
        }
    }

    Ok(())
}
