use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub db_url: Option<String>,
    pub app_name: String,
    pub deployment: String,
    pub bind_address: String,
    pub keycloak_url: String,
    pub keycloak_realm: String,
    pub tests_running: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok(); // Load from .env file if available
        let db_url = env::var("DB_URL").ok().or_else(|| {
            Some(format!(
                "{}://{}:{}@{}:{}/{}",
                env::var("DB_PREFIX").unwrap_or_else(|_| "postgresql".to_string()),
                env::var("DB_USER").ok()?,
                env::var("DB_PASSWORD").ok()?,
                env::var("DB_HOST").ok()?,
                env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string()),
                env::var("DB_NAME").ok()?,
            ))
        });

        Config {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "shop-tracking-api".to_string()),
            deployment: env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            // Leaving KEYCLOAK_URL empty disables authentication on mutating routes
            keycloak_url: env::var("KEYCLOAK_URL").unwrap_or_default(),
            keycloak_realm: env::var("KEYCLOAK_REALM").unwrap_or_default(),
            tests_running: false,
            db_url,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            app_name: "shop-tracking-api-test".to_string(),
            deployment: "test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            keycloak_url: String::new(),
            keycloak_realm: "test-realm".to_string(),
            tests_running: true,
            db_url: None,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::routes::build_router;
    use axum::Router;
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// Connects to `TEST_DB_URL` when set, otherwise to a private in-memory
    /// SQLite database. Every call returns a freshly migrated store.
    pub async fn setup_test_db() -> DatabaseConnection {
        let database_url =
            env::var("TEST_DB_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

        // An in-memory SQLite database lives and dies with its connection
        let mut options = ConnectOptions::new(database_url);
        options.max_connections(1).sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .expect("Failed to connect to test database");

        use migration::{Migrator, MigratorTrait};
        Migrator::up(&db, None)
            .await
            .expect("Failed to run database migrations");

        cleanup_test_data(&db).await;

        db
    }

    pub async fn setup_test_app() -> (Router, DatabaseConnection) {
        let db = setup_test_db().await;
        let config = Config::for_tests();
        let router = build_router(&db, &config).expect("Failed to build router");
        (router, db)
    }

    // Shared databases (TEST_DB_URL) may carry rows from earlier runs
    pub async fn cleanup_test_data(db: &DatabaseConnection) {
        use sea_orm::EntityTrait;

        let _ = crate::devices::models::Entity::delete_many().exec(db).await;
        let _ = crate::sims::models::Entity::delete_many().exec(db).await;
    }
}
