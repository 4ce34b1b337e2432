//! Emporia Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

use emporia_app::database;

#[derive(Debug, Parser)]
#[command(name = "emporia-app", about = "Emporia CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Token(TokenCommand),
    Db(DbCommand),
}

#[derive(Debug, Args)]
struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Mint an admin API token and print the digest to configure.
    Generate,
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    Migrate(MigrateArgs),
}

#[derive(Debug, Args)]
struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        #[expect(
            clippy::print_stderr,
            reason = "CLI reports failures on stderr"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Token(TokenCommand {
            command: TokenSubcommand::Generate,
        }) => generate_token(),
        Commands::Db(DbCommand {
            command: DbSubcommand::Migrate(args),
        }) => migrate(args).await,
    }
}

#[expect(clippy::print_stdout, reason = "CLI output goes to stdout")]
fn generate_token() -> Result<(), String> {
    let mut secret = [0_u8; 32];

    OsRng.fill_bytes(&mut secret);

    let token = format!("em_{}", hex::encode(secret));
    let digest = hex::encode(Sha256::digest(token.as_bytes()));

    println!("admin_token: {token}");
    println!("admin_token_digest: {digest}");
    println!("store this token now; it is only shown once");
    println!("set ADMIN_TOKEN_DIGEST to the digest on the server");

    Ok(())
}

async fn migrate(args: MigrateArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    Ok(())
}
