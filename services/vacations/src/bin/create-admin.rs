//! Create an administrator account
//!
//! Self-registration never grants the elevated role, so administrators are
//! created with this tool against the service database.

use anyhow::Result;
use clap::Parser;
use common::database::{DatabaseConfig, init_pool, run_migrations};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use vacations::{
    MIGRATOR, accounts,
    models::{NewUser, Role},
    repositories::PgUserRepository,
};

#[derive(Parser, Debug)]
#[command(name = "create-admin", about = "Create an administrator account")]
struct Args {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    /// Plaintext password; read from the environment to keep it out of shell history
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    let args = Args::parse();

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    run_migrations(&pool, &MIGRATOR).await?;

    let users = PgUserRepository::new(pool);
    let candidate = NewUser {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password: args.password,
        role: Role::Admin,
    };

    let admin = accounts::create_admin(&users, candidate).await?;
    info!("Administrator {} created with id {}", admin.email, admin.id);

    Ok(())
}
