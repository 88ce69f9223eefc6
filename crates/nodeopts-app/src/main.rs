//! nodeopts: inspect and edit the node GUI's options from a terminal.
//!
//! Opens the same settings store, node config and RW config the options
//! dialog uses, runs the options model's start-up sequence (migration,
//! defaults, argument forwarding) and then executes one command.
//!
//! # Usage
//!
//! ```text
//! nodeopts [OPTIONS] [COMMAND]
//!
//! Commands:
//!   show                 List every option (default)
//!   get <NAME>           Print one option
//!   set <NAME> <VALUE>   Change one option
//!   reset                Back up and reset every option
//!
//! Options:
//!   --config <PATH>        nodeopts config file [env: NODEOPTS_CONFIG]
//!   --chain <CHAIN>        main, test, signet or regtest [env: NODEOPTS_CHAIN]
//!   --datadir <PATH>       Node base data directory [env: NODEOPTS_DATADIR]
//!   --arg <NAME=VALUE>     Node command-line argument, repeatable
//!   --reset-gui-settings   Reset before running the command
//!   --dry-run              Keep every change in memory
//!   --json                 Print the command result as JSON
//! ```
//!
//! Log output is controlled by `RUST_LOG`, falling back to the configured
//! `log_level`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use nodeopts_app::application::options_model::{OptionsBackends, OptionsModel};
use nodeopts_app::application::settings_store::SettingsStore;
use nodeopts_app::infrastructure::autostart::platform_registrar;
use nodeopts_app::infrastructure::node::offline::OfflineNode;
use nodeopts_app::infrastructure::node::rwconf::{read_config_file, PersistentArgs, RwConfigFile};
use nodeopts_app::infrastructure::node::default_data_dir;
use nodeopts_app::infrastructure::storage::config::{load_config, load_config_from, AppConfig};
use nodeopts_app::infrastructure::storage::memory::MemoryStore;
use nodeopts_app::infrastructure::storage::toml_file::TomlFileStore;
use nodeopts_app::infrastructure::ui_bridge::{
    self, CommandResult, OptionDto, OptionsSummaryDto,
};
use nodeopts_core::{ArgsTable, Chain, RuntimeArgs};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit the node GUI's options.
#[derive(Debug, Parser)]
#[command(name = "nodeopts", about = "Inspect and edit the node GUI's options", version)]
struct Cli {
    /// nodeopts config file; the platform default when omitted.
    #[arg(long, env = "NODEOPTS_CONFIG")]
    config: Option<PathBuf>,

    /// Chain whose settings to open, overriding the config file.
    #[arg(long, env = "NODEOPTS_CHAIN")]
    chain: Option<String>,

    /// Node base data directory, overriding the config file.
    #[arg(long, env = "NODEOPTS_DATADIR")]
    datadir: Option<PathBuf>,

    /// Node command-line argument as `NAME=VALUE` (or bare `NAME`).
    ///
    /// These take precedence over stored settings exactly as they would on
    /// the node's own command line.
    #[arg(long = "arg", value_name = "NAME=VALUE", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Back up and reset every setting before running the command.
    #[arg(long)]
    reset_gui_settings: bool,

    /// Use an in-memory settings store and leave the RW config untouched.
    #[arg(long)]
    dry_run: bool,

    /// Print the command result as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every option.
    Show,
    /// Print one option.
    Get { name: String },
    /// Change one option.
    Set { name: String, value: String },
    /// Back up and reset every option.
    Reset,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let config = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => load_config().unwrap_or_default(),
        };
        Ok(config)
    }

    /// Splits each `--arg` into a normalized name and value.
    fn command_line_args(&self) -> Vec<(String, String)> {
        self.args
            .iter()
            .map(|raw| match raw.split_once('=') {
                Some((name, value)) => (name.trim().to_string(), value.to_string()),
                None => (raw.trim().to_string(), String::new()),
            })
            .collect()
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let chain: Chain = cli
        .chain
        .as_deref()
        .unwrap_or(&config.node.chain)
        .parse()
        .context("invalid chain")?;
    let data_dir = match cli.datadir.clone().or_else(|| config.node.data_dir.clone()) {
        Some(dir) => dir,
        None => default_data_dir().context("could not determine the node data directory")?,
    };
    info!(%chain, data_dir = %data_dir.display(), "opening node options");

    // Node config file first, then the command line above it.
    let mut table = ArgsTable::new();
    let conf_path = data_dir.join(&config.node.conf_file);
    for (name, value) in read_config_file(&conf_path, chain)
        .with_context(|| format!("failed to read {}", conf_path.display()))?
    {
        table.set_config_file(&name, &value);
    }
    for (name, value) in cli.command_line_args() {
        table.set_command_line(&name, &value);
    }

    let rw_file = RwConfigFile::for_data_dir(&data_dir, chain);
    let (store, args): (Box<dyn SettingsStore>, Box<dyn RuntimeArgs>) = if cli.dry_run {
        let entries = rw_file.read_entries().context("failed to read RW config")?;
        table.load_rw_config(entries);
        (Box::new(MemoryStore::new()), Box::new(table))
    } else {
        let application = config.settings.application_for(chain);
        let store = TomlFileStore::for_application(&config.settings.organization, &application)
            .context("failed to locate the settings store")?;
        debug!(path = %store.path().display(), "settings store");
        let args = PersistentArgs::load(table, rw_file).context("failed to read RW config")?;
        (Box::new(store), Box::new(args))
    };

    let node = OfflineNode::from_args(chain, &data_dir, args.as_ref());
    let startup = platform_registrar(config.node.gui_executable.clone(), chain);
    let backends = OptionsBackends {
        store,
        args,
        node: Box::new(node),
        startup,
    };
    let (mut model, events) = OptionsModel::new(
        backends,
        data_dir.display().to_string(),
        cli.reset_gui_settings,
    );

    let outcome = match &cli.command {
        None | Some(Command::Show) => {
            report(ui_bridge::list_options(&model), cli.json, print_summary)
        }
        Some(Command::Get { name }) => {
            report(ui_bridge::get_option(&model, name), cli.json, print_option)
        }
        Some(Command::Set { name, value }) => report(
            ui_bridge::update_option(&mut model, name, value),
            cli.json,
            print_option,
        ),
        Some(Command::Reset) => {
            report(ui_bridge::reset_options(&mut model), cli.json, print_summary)
        }
    };

    for event in events.try_iter() {
        debug!(?event, "options event");
    }
    if model.is_restart_required() && !cli.json {
        println!("(restart the node for changes to take effect)");
    }
    outcome
}

// ── Output ────────────────────────────────────────────────────────────────────

fn report<T: Serialize>(
    result: CommandResult<T>,
    json: bool,
    print: fn(&T),
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(data) = &result.data {
        print(data);
    }
    match result.error {
        Some(error) if !result.success => anyhow::bail!(error),
        _ => Ok(()),
    }
}

fn print_option(option: &OptionDto) {
    let marker = if option.requires_restart { " *" } else { "" };
    println!("{:<34} {}{marker}", option.name, option.value);
}

fn print_summary(summary: &OptionsSummaryDto) {
    for option in &summary.options {
        print_option(option);
    }
    println!();
    println!("* takes effect after a restart");
    if !summary.overridden_by_command_line.is_empty() {
        println!(
            "overridden by command line or config file: {}",
            summary.overridden_by_command_line
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
