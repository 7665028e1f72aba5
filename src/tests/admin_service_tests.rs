#[cfg(test)]
mod tests {
    use actix_rt::test;

    use crate::tests::migrated_pool;
    use crate::models::admin_model::{AdminAccount, AdminProvisioning};
    use crate::services::admin_service::AdminService;

    async fn setup_service() -> AdminService {
        let pool = migrated_pool().await;
        AdminService::new(pool)
    }

    fn account(password: &str) -> AdminAccount {
        AdminAccount {
            username: "admin".to_string(),
            email: "admin@messaging.com".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    async fn creates_once_then_reports_existing() {
        let service = setup_service().await;

        let first = service.ensure_admin(&account("s3cret-pass")).await.unwrap();
        assert_eq!(first, AdminProvisioning::Created);

        // Otro password no pisa la cuenta existente
        let second = service.ensure_admin(&account("otro-pass")).await.unwrap();
        assert_eq!(second, AdminProvisioning::AlreadyExists);

        let stored = service.find_by_username("admin").await.unwrap().unwrap();
        assert!(stored.is_superuser);
        assert_eq!(stored.email, "admin@messaging.com");
        assert!(stored.password_hash.starts_with("$argon2"));
        assert!(!stored.password_hash.contains("s3cret-pass"));
    }

    #[test]
    async fn hash_is_not_serialized() {
        let service = setup_service().await;
        service.ensure_admin(&account("s3cret-pass")).await.unwrap();

        let stored = service.find_by_username("admin").await.unwrap().unwrap();
        let value = serde_json::to_value(&stored).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["username"], "admin");
    }

    #[test]
    async fn rejects_invalid_input() {
        let service = setup_service().await;

        let mut bad_email = account("s3cret-pass");
        bad_email.email = "admin".to_string();
        assert!(service.ensure_admin(&bad_email).await.is_err());

        assert!(service.ensure_admin(&account("")).await.is_err());

        let mut blank_user = account("s3cret-pass");
        blank_user.username = "  ".to_string();
        assert!(service.ensure_admin(&blank_user).await.is_err());

        assert!(service.find_by_username("admin").await.unwrap().is_none());
    }

    #[test]
    async fn debug_output_hides_password() {
        let rendered = format!("{:?}", account("s3cret-pass"));
        assert!(!rendered.contains("s3cret-pass"));
        assert!(rendered.contains("admin@messaging.com"));
    }
}
