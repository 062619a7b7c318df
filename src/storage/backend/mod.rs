//! SeaORM storage backend
//!
//! Persists tracking events through SeaORM, supporting SQLite,
//! MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use sea_orm::DatabaseConnection;
use std::borrow::Cow;
use tracing::info;

use crate::errors::{Result, TrackingError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_tracking_event, tracking_event_to_active_model};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(TrackingError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// Rewrite a SQLAlchemy-style relative SQLite URL into the form sqlx reads.
///
/// `sqlite:///./data.db` means `./data.db` to SQLAlchemy but `/./data.db`
/// (filesystem root) to sqlx. Only the `./` and `../` forms are rewritten;
/// `sqlite:///abs/path.db` keeps its absolute meaning.
pub fn normalize_sqlite_url(database_url: &str) -> Cow<'_, str> {
    match database_url.strip_prefix("sqlite:///") {
        Some(rest) if rest.starts_with("./") || rest.starts_with("../") => {
            Cow::Owned(format!("sqlite://{}", rest))
        }
        _ => Cow::Borrowed(database_url),
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(TrackingError::database_config("DATABASE_URL is not set"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        run_migrations(&storage.db).await?;

        info!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Round-trip to the database to prove it is reachable
    pub async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| TrackingError::database_connection(format!("ping failed: {}", e)))
    }

    /// 关闭连接池（优雅退出时调用）
    pub async fn close(self) -> Result<()> {
        self.db
            .close()
            .await
            .map_err(|e| TrackingError::database_connection(format!("close failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sqlite_url() {
        assert_eq!(
            normalize_sqlite_url("sqlite:///./tracking_service.db"),
            "sqlite://./tracking_service.db"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:///../data/tracking.db?mode=rwc"),
            "sqlite://../data/tracking.db?mode=rwc"
        );
        // 绝对路径与其他形式保持不变
        for url in [
            "sqlite:///var/lib/tracking.db",
            "sqlite://tracking.db",
            "tracking_service.db",
            ":memory:",
            "postgres://localhost/tracking",
        ] {
            assert_eq!(normalize_sqlite_url(url), url);
        }
    }

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("tracking_service.db").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("sqlite://data/tracking.db?mode=rwc").unwrap(),
            "sqlite"
        );
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("postgres://u:p@localhost/tracking").unwrap(),
            "postgres"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://localhost/tracking").unwrap(),
            "postgres"
        );
        assert_eq!(
            infer_backend_from_url("mariadb://localhost/tracking").unwrap(),
            "mysql"
        );
    }

    #[test]
    fn test_infer_backend_rejects_unknown_scheme() {
        let err = infer_backend_from_url("mongodb://localhost").unwrap_err();
        assert!(matches!(err, TrackingError::DatabaseConfig(_)));
    }
}
