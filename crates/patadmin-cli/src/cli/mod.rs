//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use patadmin_core::config::Config;
use patadmin_core::logging;

mod app;
mod commands;
mod console;

use app::App;

#[derive(Parser)]
#[command(name = "patadmin")]
#[command(version)]
#[command(about = "Patient and user administration from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL (overrides PATADMIN_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create a new (standard) account
    Register {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in profile
    Whoami {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Personal details shared by registration and user creation.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct ProfileArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    cpf: String,
    /// Birth date, e.g. 1990-01-31
    #[arg(long, value_name = "DATE")]
    birth_date: String,
    #[arg(long)]
    municipality: String,
    #[arg(long)]
    email: String,
}

#[derive(clap::Subcommand)]
enum UsersCommands {
    /// List users, one page at a time
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Filter by name or email
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a single user
    Show {
        #[arg(value_name = "USER_ID")]
        id: u64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a user (administrators only)
    Create {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Grant administrator rights
        #[arg(long)]
        admin: bool,
        /// Create the account deactivated
        #[arg(long)]
        inactive: bool,
    },
    /// Update a user (administrators only)
    Update {
        #[arg(value_name = "USER_ID")]
        id: u64,
        #[command(flatten)]
        changes: commands::users::UserChanges,
    },
    /// Remove a user (administrators only)
    Remove {
        #[arg(value_name = "USER_ID")]
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("load config")?;
    let _log_guard = logging::init_logging(&config).context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let Cli { command, api_url } = cli;
    let start = move || App::start(config, api_url.as_deref());

    match command {
        Commands::Login { email, password } => {
            commands::auth::login(&mut start()?, &email, password).await
        }
        Commands::Register { profile, password } => {
            commands::auth::register(&mut start()?, profile, password).await
        }
        Commands::Logout => {
            commands::auth::logout(&mut start()?);
            Ok(())
        }
        Commands::Whoami { json } => commands::auth::whoami(json),

        Commands::Users { command } => {
            let app = start()?;
            match command {
                UsersCommands::List { page, search, json } => {
                    commands::users::list(&app, page, search.as_deref(), json).await
                }
                UsersCommands::Show { id, json } => commands::users::show(&app, id, json).await,
                UsersCommands::Create {
                    profile,
                    password,
                    admin,
                    inactive,
                } => commands::users::create(&app, profile, password, admin, !inactive).await,
                UsersCommands::Update { id, changes } => {
                    commands::users::update(&app, id, changes).await
                }
                UsersCommands::Remove { id, yes } => commands::users::remove(&app, id, yes).await,
            }
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_page_must_be_positive() {
        assert!(Cli::try_parse_from(["patadmin", "users", "list", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["patadmin", "users", "list", "--page", "2"]).is_ok());
    }
}
