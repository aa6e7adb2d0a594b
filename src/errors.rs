//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及到 HTTP 响应的映射。

use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_track_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TrackError {
            $($variant(String),)*
        }

        impl TrackError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TrackError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TrackError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TrackError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TrackError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TrackError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_track_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
}

impl TrackError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrackError::Validation(_) | TrackError::DateParse(_) => StatusCode::BAD_REQUEST,
            TrackError::Authentication(_) => StatusCode::UNAUTHORIZED,
            TrackError::Authorization(_) => StatusCode::FORBIDDEN,
            TrackError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的 API 错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            TrackError::Validation(_) | TrackError::DateParse(_) => ErrorCode::ValidationFailed,
            TrackError::Authentication(_) => ErrorCode::Unauthorized,
            TrackError::Authorization(_) => ErrorCode::Forbidden,
            TrackError::NotFound(_) => ErrorCode::NotFound,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 渲染为统一的 JSON 错误响应
    ///
    /// 500 类错误会先记录日志，响应中保留存储层的原始消息。
    pub fn to_http_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{} ({})", self.format_simple(), self.code());
        }
        HttpResponse::build(status).json(ApiResponse::error_empty(
            self.error_code(),
            self.message().to_string(),
        ))
    }
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TrackError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TrackError {
    fn from(err: sea_orm::DbErr) -> Self {
        TrackError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TrackError {
    fn from(err: std::io::Error) -> Self {
        TrackError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(err: serde_json::Error) -> Self {
        TrackError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TrackError {
    fn from(err: chrono::ParseError) -> Self {
        TrackError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TrackError::database_config("test").code(), "E001");
        assert_eq!(TrackError::validation("test").code(), "E005");
        assert_eq!(TrackError::authentication("test").code(), "E009");
        assert_eq!(TrackError::authorization("test").code(), "E010");
    }

    #[test]
    fn test_error_message() {
        let err = TrackError::validation("la nota debe estar entre 0 y 10");
        assert_eq!(err.message(), "la nota debe estar entre 0 y 10");
        assert!(err.format_simple().contains("Validation Error"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            TrackError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TrackError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            TrackError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            TrackError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TrackError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_error_conversion() {
        let err: TrackError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("boom"));
    }
}
