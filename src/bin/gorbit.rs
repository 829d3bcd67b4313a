//! `gorbit` project CLI.
//!
//! ```text
//! gorbit version
//! gorbit new my-service
//! gorbit token --secret s3cr3t --id 1 --email me@example.com --role admin
//! ```

use clap::{Parser, Subcommand};
use gorbit::console::commands::{
    CallableTrait, NewCommand, TokenCommand, VersionCommand, WelcomeCommand,
};

#[derive(Parser, Debug)]
#[command(name = "gorbit", about = "Scaffold and poke at Gorbit services")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the CLI version
    Version,
    /// Create a new project with layered config files
    New {
        /// Project directory name
        name: String,
        /// Overwrite an existing directory
        #[arg(long)]
        force: bool,
    },
    /// Sign a bearer token for local testing
    Token {
        /// HMAC secret (app.jwt_secret)
        #[arg(long, env = "GORBIT_APP__JWT_SECRET", hide_env_values = true)]
        secret: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        email: String,
        /// Repeat for several roles (default: user)
        #[arg(long = "role", value_name = "ROLE")]
        roles: Vec<String>,
        #[arg(long, default_value_t = 60)]
        ttl_minutes: u64,
        #[arg(long, default_value = "gorbit")]
        issuer: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = get_command(cli);
    if let Err(err) = command.call() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
    Ok(())
}

fn get_command(cli: Cli) -> Box<dyn CallableTrait> {
    match cli.command {
        None => Box::new(WelcomeCommand::new()),
        Some(Commands::Version) => Box::new(VersionCommand::new()),
        Some(Commands::New { name, force }) => Box::new(NewCommand::new(name, force)),
        Some(Commands::Token {
            secret,
            id,
            email,
            roles,
            ttl_minutes,
            issuer,
        }) => Box::new(TokenCommand::new(secret, id, email, roles, ttl_minutes, issuer)),
    }
}
