//! tests/record_service_tests.rs
//! Pruebas del store contra SQLite real (en memoria y en archivo).

#[cfg(test)]
mod tests {
    use actix_rt::test;
    use chrono::{Duration, TimeZone, Utc};
    use sqlx::{Pool, Sqlite};

    use crate::config::app_config::AppConfig;
    use crate::db::{run_migrations, setup_database};
    use crate::tests::migrated_pool;
    use crate::models::email_model::{Email, EmailFields, EmailPatch};
    use crate::models::phone_message_model::{PhoneMessageFields, PhoneMessagePatch, Sms, WhatsApp};
    use crate::services::error::StoreError;
    use crate::services::record_service::RecordService;

    async fn setup_pool() -> Pool<Sqlite> {
        migrated_pool().await
    }

    fn email(to: &str, subject: &str) -> EmailFields {
        EmailFields {
            email_to: to.to_string(),
            subject: subject.to_string(),
            message: "cuerpo".to_string(),
        }
    }

    fn phone(number: &str, message: &str) -> PhoneMessageFields {
        PhoneMessageFields {
            mobile_number: number.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    async fn insert_assigns_id_and_timestamp() {
        let service = RecordService::<Email>::new(setup_pool().await);

        let before = Utc::now() - Duration::seconds(1);
        let record = service.insert(&email("a@b.com", "Hi")).await.unwrap();

        assert!(record.id > 0);
        assert_eq!(record.email_to, "a@b.com");
        assert_eq!(record.subject, "Hi");
        assert!(record.timestamp >= before);

        let fetched = service.get(record.id).await.unwrap();
        assert_eq!(fetched, record);
    }

    #[test]
    async fn list_is_empty_on_a_fresh_table() {
        let service = RecordService::<Sms>::new(setup_pool().await);
        assert!(service.list().await.unwrap().is_empty());
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[test]
    async fn list_orders_newest_first() {
        let service = RecordService::<Email>::new(setup_pool().await);
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();

        let middle = service
            .insert_at(&email("m@b.com", "m"), base + Duration::minutes(5))
            .await
            .unwrap();
        let oldest = service
            .insert_at(&email("o@b.com", "o"), base)
            .await
            .unwrap();
        let newest = service
            .insert_at(&email("n@b.com", "n"), base + Duration::hours(2))
            .await
            .unwrap();

        let ids: Vec<i64> = service.list().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);
        assert_eq!(oldest.timestamp, base);
    }

    #[test]
    async fn equal_timestamps_fall_back_to_id() {
        let service = RecordService::<WhatsApp>::new(setup_pool().await);
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap();

        let first = service.insert_at(&phone("+1", "uno"), at).await.unwrap();
        let second = service.insert_at(&phone("+2", "dos"), at).await.unwrap();

        let ids: Vec<i64> = service.list().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    async fn get_missing_is_not_found() {
        let service = RecordService::<Sms>::new(setup_pool().await);
        let err = service.get(404).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    async fn replace_keeps_id_and_timestamp() {
        let service = RecordService::<Sms>::new(setup_pool().await);
        let original = service.insert(&phone("+1555", "hola")).await.unwrap();

        let replaced = service
            .replace(original.id, &phone("+1666", "adiós"))
            .await
            .unwrap();

        assert_eq!(replaced.id, original.id);
        assert_eq!(replaced.timestamp, original.timestamp);
        assert_eq!(replaced.mobile_number, "+1666");
        assert_eq!(replaced.message, "adiós");

        let err = service.replace(999, &phone("+1", "x")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    async fn update_merges_only_supplied_fields() {
        let service = RecordService::<Email>::new(setup_pool().await);
        let original = service.insert(&email("a@b.com", "Hi")).await.unwrap();

        let patch = EmailPatch {
            subject: Some("Nuevo asunto".to_string()),
            ..EmailPatch::default()
        };
        let updated = service.update(original.id, &patch).await.unwrap();

        assert_eq!(updated.email_to, "a@b.com");
        assert_eq!(updated.subject, "Nuevo asunto");
        assert_eq!(updated.message, original.message);
        assert_eq!(updated.timestamp, original.timestamp);
    }

    #[test]
    async fn empty_patch_returns_current_record() {
        let service = RecordService::<WhatsApp>::new(setup_pool().await);
        let original = service.insert(&phone("+1", "hola")).await.unwrap();

        let same = service
            .update(original.id, &PhoneMessagePatch::default())
            .await
            .unwrap();
        assert_eq!(same, original);

        let err = service
            .update(original.id + 1, &PhoneMessagePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    async fn delete_is_durable_and_repeat_delete_fails() {
        let service = RecordService::<Sms>::new(setup_pool().await);
        let record = service.insert(&phone("+1555", "hi")).await.unwrap();

        service.delete(record.id).await.unwrap();
        assert!(matches!(
            service.get(record.id).await.unwrap_err(),
            StoreError::NotFound
        ));
        assert!(matches!(
            service.delete(record.id).await.unwrap_err(),
            StoreError::NotFound
        ));
        assert!(matches!(
            service.delete(record.id).await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[test]
    async fn ids_are_not_reused_after_delete() {
        let service = RecordService::<Sms>::new(setup_pool().await);
        let first = service.insert(&phone("+1", "a")).await.unwrap();
        service.delete(first.id).await.unwrap();

        let second = service.insert(&phone("+1", "b")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    async fn resources_do_not_share_tables() {
        let pool = setup_pool().await;
        let sms = RecordService::<Sms>::new(pool.clone());
        let whatsapp = RecordService::<WhatsApp>::new(pool);

        sms.insert(&phone("+1", "sms")).await.unwrap();
        assert_eq!(sms.count().await.unwrap(), 1);
        assert_eq!(whatsapp.count().await.unwrap(), 0);
    }

    #[test]
    async fn records_survive_a_new_pool() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: dir.path().join("nested").join("messages.db"),
            ..AppConfig::default()
        };

        let pool = setup_database(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let created = RecordService::<Email>::new(pool.clone())
            .insert(&email("a@b.com", "persistente"))
            .await
            .unwrap();
        pool.close().await;

        let pool = setup_database(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let fetched = RecordService::<Email>::new(pool).get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }
}
