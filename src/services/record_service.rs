use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::models::resource::{format_timestamp, Resource};
use crate::services::error::{StoreError, StoreResult};

/// Store de un recurso: una tabla SQLite.
///
/// Las consultas se arman una vez por llamada a partir de `R::TABLE` y
/// `R::COLUMNS` (constantes, nunca datos del cliente).
pub struct RecordService<R: Resource> {
    db_pool: Pool<Sqlite>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for RecordService<R> {
    fn clone(&self) -> Self {
        RecordService {
            db_pool: self.db_pool.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> RecordService<R> {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        RecordService {
            db_pool,
            _resource: PhantomData,
        }
    }

    fn select_columns() -> String {
        format!("id, {}, timestamp", R::COLUMNS.join(", "))
    }

    /// Todos los registros, más recientes primero.
    pub async fn list(&self) -> StoreResult<Vec<R::Record>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY timestamp DESC, id DESC",
            Self::select_columns(),
            R::TABLE
        );
        let rows = sqlx::query_as::<_, R::Record>(&sql)
            .fetch_all(&self.db_pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> StoreResult<R::Record> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1",
            Self::select_columns(),
            R::TABLE
        );
        sqlx::query_as::<_, R::Record>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn insert(&self, fields: &R::Fields) -> StoreResult<R::Record> {
        self.insert_at(fields, Utc::now()).await
    }

    /// Igual que `insert`, con el timestamp fijado por el llamador.
    pub async fn insert_at(
        &self,
        fields: &R::Fields,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<R::Record> {
        let placeholders = vec!["?"; R::COLUMNS.len() + 1].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}, timestamp) VALUES ({}) RETURNING {}",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders,
            Self::select_columns()
        );

        let mut query = sqlx::query_as::<_, R::Record>(&sql);
        for value in R::column_values(fields) {
            query = query.bind(value);
        }
        let record = query
            .bind(format_timestamp(&timestamp))
            .fetch_one(&self.db_pool)
            .await?;

        log::debug!("(insert) Registro {} insertado en '{}'", R::LABEL, R::TABLE);
        Ok(record)
    }

    /// Reemplaza todas las columnas editables. El timestamp no cambia.
    pub async fn replace(&self, id: i64, fields: &R::Fields) -> StoreResult<R::Record> {
        let columns: Vec<(&'static str, String)> = R::COLUMNS
            .iter()
            .copied()
            .zip(R::column_values(fields))
            .collect();
        self.update_columns(id, columns).await
    }

    /// Solo toca las columnas presentes en el patch.
    pub async fn update(&self, id: i64, patch: &R::Patch) -> StoreResult<R::Record> {
        let columns = R::patch_values(patch);
        if columns.is_empty() {
            return self.get(id).await;
        }
        self.update_columns(id, columns).await
    }

    async fn update_columns(
        &self,
        id: i64,
        columns: Vec<(&'static str, String)>,
    ) -> StoreResult<R::Record> {
        let assignments: Vec<String> = columns
            .iter()
            .map(|(col, _)| format!("{} = ?", col))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ? RETURNING {}",
            R::TABLE,
            assignments.join(", "),
            Self::select_columns()
        );

        let mut query = sqlx::query_as::<_, R::Record>(&sql);
        for (_, value) in columns {
            query = query.bind(value);
        }
        query
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Borrar un id inexistente (o ya borrado) siempre da `NotFound`.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        let (total,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.db_pool).await?;
        Ok(total)
    }
}
