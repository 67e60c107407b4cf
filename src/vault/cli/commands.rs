//! # CLI Layer
//!
//! One UI client for the vault library. This is the only code that knows
//! about stdout, stderr and exit codes.
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap derive in `setup.rs`
//! 2. **Logging**: installs the `tracing` subscriber
//! 3. **Context Setup**: resolves home, config and backend, builds the `VaultApi`
//! 4. **Dispatch**: one-shot subcommands, or the interactive menu
//! 5. **Output Formatting**: `print.rs`
//!
//! The concrete store is picked once here. Everything after that is generic
//! over `RecordStore`, so both backends go through the same handlers.

use super::menu;
use super::print::{print_messages, print_records, print_sorted, print_stats};
use super::setup::{Cli, Commands};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vault::api::VaultApi;
use vault::backup::BackupWriter;
use vault::config::{vault_home, VaultConfig, CONFIG_FILENAME};
use vault::error::Result;
use vault::store::data_api::DataApiCollection;
use vault::store::fs::FileStore;
use vault::store::remote_store::RemoteStore;
use vault::store::{BackendKind, RecordStore};

/// Everything resolved from flags, environment and `config.json`.
struct AppContext {
    config: VaultConfig,
    data_file: PathBuf,
    backups: Option<BackupWriter>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;
    tracing::debug!(backend = %ctx.config.backend, "starting vault");

    match ctx.config.backend {
        BackendKind::File => {
            let store = FileStore::open_file(&ctx.data_file)?;
            let api = VaultApi::new(store, ctx.backups.clone());
            dispatch(api, cli.command, &ctx)
        }
        BackendKind::Remote => {
            let collection = DataApiCollection::from_config(&ctx.config.remote)?;
            let store = RemoteStore::connect(collection)?;
            let api = VaultApi::new(store, ctx.backups.clone());
            dispatch(api, cli.command, &ctx)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "vault=debug" } else { "vault=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let home = vault_home(std::env::var_os("VAULT_HOME").map(PathBuf::from))?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| home.join(CONFIG_FILENAME));

    let mut config = VaultConfig::load(&config_path)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(data) = &cli.data {
        config.data_file = Some(data.clone());
    }
    if cli.no_backup {
        config.backups.enabled = false;
    }

    let data_file = config.data_file(&home);
    let backups = config
        .backups
        .enabled
        .then(|| BackupWriter::new(config.backup_dir(&home)));

    tracing::debug!(
        home = %home.display(),
        config = %config_path.display(),
        data = %data_file.display(),
        "resolved paths"
    );

    Ok(AppContext {
        config,
        data_file,
        backups,
    })
}

fn dispatch<S: RecordStore>(
    mut api: VaultApi<S>,
    command: Option<Commands>,
    ctx: &AppContext,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        None | Some(Commands::Menu) => {
            let stdin = io::stdin();
            menu::run(&mut api, stdin.lock(), &mut out, &ctx.config.export_file)
        }
        Some(Commands::Add { name, value }) => {
            let result = api.add_record(&name, &value)?;
            print_messages(&mut out, &result.messages)?;
            Ok(())
        }
        Some(Commands::List) => {
            let result = api.list_records()?;
            print_messages(&mut out, &result.messages)?;
            print_records(&mut out, &result.listed_records)?;
            Ok(())
        }
        Some(Commands::Update { id, name, value }) => {
            let result = api.update_record(&id, &name, &value)?;
            print_messages(&mut out, &result.messages)?;
            Ok(())
        }
        Some(Commands::Delete { id }) => {
            let result = api.delete_record(&id)?;
            print_messages(&mut out, &result.messages)?;
            Ok(())
        }
        Some(Commands::Search { keyword }) => {
            let result = api.search(&keyword)?;
            print_messages(&mut out, &result.messages)?;
            print_records(&mut out, &result.listed_records)?;
            Ok(())
        }
        Some(Commands::Sort { field, order }) => {
            let result = api.sort(&field, &order)?;
            print_messages(&mut out, &result.messages)?;
            print_sorted(&mut out, &result.listed_records)?;
            Ok(())
        }
        Some(Commands::Export { output }) => {
            let path = output.unwrap_or_else(|| ctx.config.export_file.clone());
            let result = api.export(&path)?;
            print_messages(&mut out, &result.messages)?;
            Ok(())
        }
        Some(Commands::Stats) => {
            let result = api.stats()?;
            if let Some(stats) = &result.stats {
                print_stats(&mut out, stats)?;
            }
            print_messages(&mut out, &result.messages)?;
            Ok(())
        }
    }
}
