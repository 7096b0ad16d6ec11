// ==========================================
// 表格清单 - 命令行入口
// ==========================================
// 用途: 加载表格清单并以 JSON / YAML 输出到 stdout
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use table_inventory::config::{InventoryConfig, InventoryPlugin, TableSourceOptions};
use table_inventory::importer::{TableInventory, UniversalFileParser};
use table_inventory::logging::{self, LogFormat};
use table_inventory::Inventory;

#[derive(Parser)]
#[command(
    name = "table-inventory",
    version,
    about = "Build a network automation inventory from CSV/Excel tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format for the inventory.
    #[arg(long, value_enum, default_value = "json", global = true)]
    format: OutputFormat,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Load the inventory sources named in a YAML config file.
    Config {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Load inventory tables directly; format is chosen by file extension.
    Files {
        #[arg(long, value_name = "PATH")]
        hosts: PathBuf,

        #[arg(long, value_name = "PATH")]
        groups: Option<PathBuf>,

        #[arg(long, value_name = "PATH")]
        defaults: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    logging::init_with(log_format, "warn");

    let inventory = match cli.command {
        Command::Config { path } => {
            let config = InventoryConfig::from_file(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            TableInventory::from_config(&config).load()?
        }
        Command::Files {
            hosts,
            groups,
            defaults,
        } => {
            // 未指定的可选表使用空路径（视为不存在）
            let options = TableSourceOptions {
                plugin: InventoryPlugin::Csv,
                host_file: hosts,
                group_file: groups.unwrap_or_default(),
                defaults_file: defaults.unwrap_or_default(),
            };
            TableInventory::with_parser(options, Box::new(UniversalFileParser)).load()?
        }
    };

    print_inventory(&inventory, cli.format)
}

fn print_inventory(inventory: &Inventory, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(inventory)?,
        OutputFormat::Yaml => serde_yaml::to_string(inventory)?,
    };
    println!("{}", rendered);
    Ok(())
}
