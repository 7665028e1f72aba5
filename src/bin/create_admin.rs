//! create_admin
//!
//! Asegura que exista la cuenta administrativa. Se corre una vez por
//! despliegue; si el username ya existe no cambia nada.
//!
//! Uso:
//!   ADMIN_PASSWORD="..." cargo run --bin create_admin
//!   cargo run --bin create_admin -- --username ops --email ops@example.com --password "..."

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;

use messaging_records::config::app_config::AppConfig;
use messaging_records::db::{run_migrations, setup_database};
use messaging_records::logger::init_logger;
use messaging_records::models::admin_model::{AdminAccount, AdminProvisioning};
use messaging_records::services::admin_service::AdminService;

#[derive(Parser)]
#[command(name = "create_admin", about = "Crea la cuenta admin si no existe")]
struct Args {
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    username: String,

    #[arg(long, env = "ADMIN_EMAIL", default_value = "admin@messaging.com")]
    email: String,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_logger();

    let args = Args::parse();
    let config = AppConfig::from_env().context("Configuración inválida")?;

    let db_pool = setup_database(&config).await?;
    run_migrations(&db_pool).await?;

    let account = AdminAccount {
        username: args.username,
        email: args.email,
        password: args.password,
    };

    let outcome = AdminService::new(db_pool.clone())
        .ensure_admin(&account)
        .await?;

    match outcome {
        AdminProvisioning::Created => {
            println!("Admin '{}' creado ({})", account.username, account.email)
        }
        AdminProvisioning::AlreadyExists => {
            println!("Admin '{}' ya existe", account.username)
        }
    }

    db_pool.close().await;
    Ok(())
}
