//! models/resource.rs
//! Contrato común de los tres recursos (Email, SMS, WhatsApp).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::{sqlite::SqliteRow, FromRow};

use crate::models::validation::ValidationErrors;

/// Un tipo de registro persistido en su propia tabla.
///
/// Cada implementación declara su tabla, sus columnas editables y cómo
/// validar un payload. `id` y `timestamp` nunca forman parte de `COLUMNS`:
/// los asigna el store.
pub trait Resource: Send + Sync + 'static {
    /// Nombre legible, usado en respuestas y logs ("Email", "SMS", ...).
    const LABEL: &'static str;
    const TABLE: &'static str;
    /// Segmento de ruta, con la barra inicial ("/emails").
    const PATH: &'static str;
    /// Columnas editables, en el orden de `column_values`.
    const COLUMNS: &'static [&'static str];

    type Record: Serialize + for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static;
    /// Payload completo ya validado (POST, PUT).
    type Fields: Send + Sync + 'static;
    /// Payload parcial ya validado (PATCH).
    type Patch: Send + Sync + 'static;

    fn record_id(record: &Self::Record) -> i64;

    fn validate(payload: &Value) -> Result<Self::Fields, ValidationErrors>;

    fn validate_patch(payload: &Value) -> Result<Self::Patch, ValidationErrors>;

    fn column_values(fields: &Self::Fields) -> Vec<String>;

    /// Solo las columnas presentes en el patch.
    fn patch_values(patch: &Self::Patch) -> Vec<(&'static str, String)>;
}

/// Formato de ancho fijo: el orden lexicográfico coincide con el cronológico.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
