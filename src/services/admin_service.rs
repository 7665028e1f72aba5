use anyhow::{anyhow, bail, Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::models::{
    admin_model::{AdminAccount, AdminProvisioning, AdminUserRecord},
    resource::format_timestamp,
    validation::is_valid_email,
};

/// Provisión de la cuenta administrativa. Se usa desde `create_admin`,
/// nunca desde el servidor HTTP.
#[derive(Clone, Debug)]
pub struct AdminService {
    db_pool: Pool<Sqlite>,
}

impl AdminService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        AdminService { db_pool }
    }

    /// Crea la cuenta si el username no existe. Idempotente.
    pub async fn ensure_admin(&self, account: &AdminAccount) -> Result<AdminProvisioning> {
        let username = account.username.trim();
        let email = account.email.trim();

        if username.is_empty() {
            bail!("El username no puede estar vacío");
        }
        if !is_valid_email(email) {
            bail!("Email inválido para la cuenta admin: {}", email);
        }
        if account.password.is_empty() {
            bail!("El password no puede estar vacío");
        }

        if self.find_by_username(username).await?.is_some() {
            log::info!("(ensure_admin) El admin '{}' ya existe", username);
            return Ok(AdminProvisioning::AlreadyExists);
        }

        let password_hash = hash_password(&account.password)?;
        let now = format_timestamp(&Utc::now());

        // ON CONFLICT cubre la carrera entre dos ejecuciones simultáneas
        let result = sqlx::query(
            r#"
            INSERT INTO admin_users (username, email, password_hash, is_superuser, created_at)
            VALUES (?1, ?2, ?3, 1, ?4)
            ON CONFLICT(username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar admin_users")?;

        if result.rows_affected() == 0 {
            log::info!("(ensure_admin) El admin '{}' ya existe", username);
            return Ok(AdminProvisioning::AlreadyExists);
        }

        log::info!("(ensure_admin) Admin '{}' creado", username);
        Ok(AdminProvisioning::Created)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminUserRecord>> {
        let row = sqlx::query_as::<_, AdminUserRecord>(
            r#"
            SELECT id, username, email, password_hash, is_superuser, created_at
            FROM admin_users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db_pool)
        .await
        .context("Fallo al consultar admin_users")?;

        Ok(row)
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("No se pudo generar el hash del password: {}", e))?;
    Ok(hash.to_string())
}
