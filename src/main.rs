use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use keydesk::cli::{self, KeyChanges, OutputFormat};
use keydesk::{config, logging, web};

#[derive(Debug, Parser)]
#[command(name = "keydesk")]
#[command(about = "Admin dashboard for API keys, IP usage and token quotas")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the browser dashboard
    Serve {
        /// Bind address (default: server.addr from config)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Manage API keys
    Keys {
        #[command(subcommand)]
        command: KeysCommand,
    },
    /// Inspect and reset per-IP usage
    Ips {
        #[command(subcommand)]
        command: IpsCommand,
    },
    /// Show the usage summary
    Summary {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show quota of the configured API key
    Usage {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check config and backend health
    Health,
    /// Send text to the backend's /predict endpoint
    Predict {
        /// Text to classify
        text: String,
    },
    /// Manage keydesk configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
enum KeysCommand {
    /// List all API keys
    List {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one key in full
    Show {
        id: i64,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a new key
    Create(KeyArgs),
    /// Update an existing key; unspecified fields keep their value
    Update {
        id: i64,
        #[command(flatten)]
        fields: KeyArgs,
    },
    /// Delete a key
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct KeyArgs {
    /// Free-text description
    #[arg(long)]
    description: Option<String>,
    /// Monthly token limit (blank or 0 uses ui.default_monthly_limit)
    #[arg(long)]
    limit: Option<String>,
    /// Mark the key as unlimited
    #[arg(long, overrides_with = "limited")]
    unlimited: bool,
    /// Clear the unlimited flag
    #[arg(long)]
    limited: bool,
    /// Enable monthly auto-reset
    #[arg(long, overrides_with = "no_auto_reset")]
    auto_reset: bool,
    /// Disable monthly auto-reset
    #[arg(long)]
    no_auto_reset: bool,
}

impl KeyArgs {
    fn into_changes(self) -> KeyChanges {
        KeyChanges {
            description: self.description,
            monthly_limit: self.limit,
            is_unlimited: flag_pair(self.unlimited, self.limited),
            auto_reset: flag_pair(self.auto_reset, self.no_auto_reset),
        }
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[derive(Debug, Subcommand)]
enum IpsCommand {
    /// List per-IP usage
    List {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Reset the counters of one IP address
    Reset {
        ip: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Display the effective merged configuration
    Show,
    /// Create a default config file at ~/.keydesk/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a config value using dotted key notation (e.g., backend.base_url)
    Set {
        /// Dotted key path (e.g., ui.locale)
        key: String,
        /// Value to set
        value: String,
    },
    /// Reset config file to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let config = config::load();
    logging::init_tracing(&config.logging);

    match app.command {
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            web::serve(&config, &addr)
        }
        Commands::Keys { command } => {
            let mut dash = cli::connect(&config);
            match command {
                KeysCommand::List { format } => {
                    cli::run_keys_list(&mut dash, OutputFormat::from_str_opt(Some(&format)))
                }
                KeysCommand::Show { id, format } => {
                    cli::run_keys_show(&mut dash, id, OutputFormat::from_str_opt(Some(&format)))
                }
                KeysCommand::Create(fields) => {
                    cli::run_keys_create(&mut dash, &fields.into_changes())
                }
                KeysCommand::Update { id, fields } => {
                    cli::run_keys_update(&mut dash, id, &fields.into_changes())
                }
                KeysCommand::Delete { id, yes } => cli::run_keys_delete(&mut dash, id, yes),
            }
        }
        Commands::Ips { command } => {
            let mut dash = cli::connect(&config);
            match command {
                IpsCommand::List { format } => {
                    cli::run_ips_list(&mut dash, OutputFormat::from_str_opt(Some(&format)))
                }
                IpsCommand::Reset { ip, yes } => cli::run_ips_reset(&mut dash, &ip, yes),
            }
        }
        Commands::Summary { format } => {
            let mut dash = cli::connect(&config);
            cli::run_summary(&mut dash, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Usage { format } => {
            let dash = cli::connect(&config);
            cli::run_usage(&dash, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Health => {
            let mut dash = cli::connect(&config);
            cli::run_health(&mut dash, &config)
        }
        Commands::Predict { text } => {
            let mut dash = cli::connect(&config);
            cli::run_predict(&mut dash, &text)
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => cli::run_config_show(),
            ConfigCommand::Init { force } => cli::run_config_init(force),
            ConfigCommand::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigCommand::Reset => cli::run_config_reset(),
        },
    }
}
