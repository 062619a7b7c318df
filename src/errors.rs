use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum TrackingError {
    Validation(String),
    BadRequest(String),
    NotFound(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    EventHandler(String),
}

impl TrackingError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TrackingError::Validation(_) => "E001",
            TrackingError::BadRequest(_) => "E002",
            TrackingError::NotFound(_) => "E003",
            TrackingError::DatabaseConfig(_) => "E004",
            TrackingError::DatabaseConnection(_) => "E005",
            TrackingError::DatabaseOperation(_) => "E006",
            TrackingError::Serialization(_) => "E007",
            TrackingError::EventHandler(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TrackingError::Validation(_) => "Validation Error",
            TrackingError::BadRequest(_) => "Bad Request",
            TrackingError::NotFound(_) => "Resource Not Found",
            TrackingError::DatabaseConfig(_) => "Database Configuration Error",
            TrackingError::DatabaseConnection(_) => "Database Connection Error",
            TrackingError::DatabaseOperation(_) => "Database Operation Error",
            TrackingError::Serialization(_) => "Serialization Error",
            TrackingError::EventHandler(_) => "Event Handler Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TrackingError::Validation(msg)
            | TrackingError::BadRequest(msg)
            | TrackingError::NotFound(msg)
            | TrackingError::DatabaseConfig(msg)
            | TrackingError::DatabaseConnection(msg)
            | TrackingError::DatabaseOperation(msg)
            | TrackingError::Serialization(msg)
            | TrackingError::EventHandler(msg) => msg,
        }
    }

    /// HTTP status used when the error reaches the API boundary
    pub fn http_status(&self) -> StatusCode {
        match self {
            TrackingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TrackingError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TrackingError::NotFound(_) => StatusCode::NOT_FOUND,
            TrackingError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            TrackingError::DatabaseConfig(_)
            | TrackingError::DatabaseOperation(_)
            | TrackingError::Serialization(_)
            | TrackingError::EventHandler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller is at fault (4xx)
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TrackingError {}

// 便捷的构造函数
impl TrackingError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TrackingError::Validation(msg.into())
    }

    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        TrackingError::BadRequest(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TrackingError::NotFound(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        TrackingError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        TrackingError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        TrackingError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TrackingError::Serialization(msg.into())
    }

    pub fn event_handler<T: Into<String>>(msg: T) -> Self {
        TrackingError::EventHandler(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TrackingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_client_error() {
        let err = TrackingError::validation("interaction_type: unknown variant `purchase`");
        assert_eq!(err.code(), "E001");
        assert_eq!(err.http_status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.is_client_error());
        assert!(err.to_string().contains("Validation Error"));
        assert!(err.to_string().contains("purchase"));
    }

    #[test]
    fn test_persistence_errors_are_server_errors() {
        let op = TrackingError::database_operation("insert failed");
        let conn = TrackingError::database_connection("refused");
        assert_eq!(op.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(conn.http_status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!op.is_client_error());
    }

    #[test]
    fn test_format_simple() {
        let err = TrackingError::not_found("tracking event abc");
        assert_eq!(err.format_simple(), "Resource Not Found: tracking event abc");
    }

    #[test]
    fn test_format_colored_carries_code_and_message() {
        colored::control::set_override(false);
        let err = TrackingError::database_config("Cannot infer database type from URL: redis://x");
        let text = err.format_colored();
        assert!(text.starts_with("[ERROR] E004 Database Configuration Error"));
        assert!(text.contains("redis://x"));
    }
}
