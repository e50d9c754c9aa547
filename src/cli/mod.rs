use crate::error::UnitRole;
use crate::format::MAX_PRECISION;
use crate::{
    convert_byte_unit, convert_bytes, from_bytes, parse_bytes, to_bytes, ByteUnit, Config,
    ConversionResult, ConverterOptions,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::debug;
use prettytable::{format, Cell, Row, Table};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "byte-units")]
#[command(version, about = "Convert, format and parse byte sizes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Flags shared by every conversion command
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct OutputArgs {
    /// Fractional digits to keep, 0-100 (defaults to the config value, then 2)
    #[arg(short, long, value_parser = parse_precision)]
    pub precision: Option<usize>,

    /// Use 1024 between units instead of 1000
    #[arg(short, long)]
    pub binary: bool,

    /// Output as JSON (machine-readable)
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a byte count in its best-fit unit
    Format {
        /// Byte count, either a number or a size such as "1.5 MB"
        bytes: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert a value from one unit to another
    Convert {
        /// Value expressed in FROM
        value: f64,

        /// Source unit (B, KB, MB, GB, TB, PB)
        from: String,

        /// Target unit (B, KB, MB, GB, TB, PB)
        to: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert a value in a unit to a raw byte count
    ToBytes {
        /// Value expressed in UNIT
        value: f64,

        /// Unit of VALUE (B, KB, MB, GB, TB, PB)
        unit: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Express a raw byte count in a specific unit
    FromBytes {
        /// Raw byte count
        bytes: f64,

        /// Target unit (B, KB, MB, GB, TB, PB)
        unit: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Parse a size such as "1.5 MB" or "1 KiB" into bytes
    Parse {
        /// Size to parse
        input: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a byte count in every unit
    Table {
        /// Byte count, either a number or a size such as "1.5 MB"
        bytes: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate default config file
    InitConfig {
        /// Output path for config file
        path: Option<PathBuf>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = if let Some(config_path) = &self.config {
            Config::load(config_path)?
        } else {
            Config::load_or_default(Config::default_path())?
        };

        match self.command {
            Commands::Format { bytes, output } => {
                let options = effective_options(&config, output);
                let bytes = resolve_bytes(&bytes, &options)?;
                let result = convert_bytes(bytes, &options)?;
                println!("{}", render_result(&result, json_output(&config, output))?);
            }
            Commands::Convert {
                value,
                from,
                to,
                output,
            } => {
                let options = effective_options(&config, output);
                let from = ByteUnit::parse_as(&from, UnitRole::Source)?;
                let to = ByteUnit::parse_as(&to, UnitRole::Target)?;
                let result = convert_byte_unit(value, from, to, &options)?;
                println!("{}", render_result(&result, json_output(&config, output))?);
            }
            Commands::ToBytes {
                value,
                unit,
                output,
            } => {
                let options = effective_options(&config, output);
                let unit: ByteUnit = unit.parse()?;
                let bytes = to_bytes(value, unit, &options)?;
                println!("{}", render_bytes(bytes, json_output(&config, output))?);
            }
            Commands::FromBytes {
                bytes,
                unit,
                output,
            } => {
                let options = effective_options(&config, output);
                let unit: ByteUnit = unit.parse()?;
                let result = from_bytes(bytes, unit, &options)?;
                println!("{}", render_result(&result, json_output(&config, output))?);
            }
            Commands::Parse { input, output } => {
                let options = effective_options(&config, output);
                let bytes = parse_bytes(&input, &options)?;
                println!("{}", render_bytes(bytes, json_output(&config, output))?);
            }
            Commands::Table { bytes, output } => {
                let options = effective_options(&config, output);
                let bytes = resolve_bytes(&bytes, &options)?;
                run_table(bytes, &options, json_output(&config, output))?;
            }
            Commands::InitConfig { path } => {
                init_config(path)?;
            }
        }

        Ok(())
    }
}

fn parse_precision(input: &str) -> std::result::Result<usize, String> {
    let precision: usize = input
        .parse()
        .map_err(|_| format!("`{}` is not a number of digits", input))?;
    if precision > MAX_PRECISION {
        return Err(format!("precision must be at most {}", MAX_PRECISION));
    }
    Ok(precision)
}

fn effective_options(config: &Config, output: OutputArgs) -> ConverterOptions {
    let options = config.options(output.precision, output.binary);
    debug!("Effective converter options: {:?}", options);
    options
}

fn json_output(config: &Config, output: OutputArgs) -> bool {
    output.json || config.json
}

/// Accept either a plain number of bytes or a human-readable size.
fn resolve_bytes(input: &str, options: &ConverterOptions) -> Result<f64> {
    if let Ok(bytes) = input.trim().parse::<f64>() {
        return Ok(bytes);
    }

    let bytes = parse_bytes(input, options)?;
    debug!("Parsed `{}` as {} bytes", input, bytes);
    Ok(bytes)
}

fn render_result(result: &ConversionResult, json_output: bool) -> Result<String> {
    if json_output {
        return serde_json::to_string_pretty(result).with_context(|| "Failed to serialize result");
    }

    Ok(result.formatted.bright_yellow().to_string())
}

fn render_bytes(bytes: f64, json_output: bool) -> Result<String> {
    if json_output {
        return serde_json::to_string_pretty(&json!({ "bytes": bytes }))
            .with_context(|| "Failed to serialize result");
    }

    Ok(format!("{} {}", bytes.to_string().bright_yellow(), "bytes".bright_black()))
}

fn unit_rows(bytes: f64, options: &ConverterOptions) -> Result<Vec<ConversionResult>> {
    let mut rows = Vec::with_capacity(ByteUnit::ALL.len());
    for unit in ByteUnit::ALL {
        rows.push(from_bytes(bytes, unit, options)?);
    }
    Ok(rows)
}

fn run_table(bytes: f64, options: &ConverterOptions, json_output: bool) -> Result<()> {
    let rows = unit_rows(bytes, options)?;

    if json_output {
        let json = serde_json::to_string_pretty(&rows).with_context(|| "Failed to serialize table")?;
        println!("{}", json);
        return Ok(());
    }

    let best = convert_bytes(bytes, options)?;
    let base = if options.binary { "binary" } else { "decimal" };
    println!(
        "\n{} {} ({} base)",
        "📏".bright_cyan(),
        best.formatted.bright_cyan().bold(),
        base
    );

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        Cell::new("Unit"),
        Cell::new("Value"),
        Cell::new("Formatted"),
    ]));

    for row in &rows {
        table.add_row(Row::new(vec![
            Cell::new(row.unit.code()),
            Cell::new(&row.value.to_string()),
            Cell::new(&row.formatted),
        ]));
    }

    table.printstd();
    Ok(())
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| {
        Config::ensure_config_dir().unwrap_or_else(|_| PathBuf::from("config.toml"))
    });

    let config = Config::default();
    config.save(&config_path)?;

    println!(
        "{} {}",
        "Config file created:".green().bold(),
        config_path.display()
    );

    Ok(())
}
