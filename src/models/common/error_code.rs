use serde::Serialize;

/// API 业务错误码
///
/// 与 HTTP 状态码并列返回，供客户端区分具体失败原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1005,
    InternalServerError = 1006,

    // 认证
    AuthFailed = 2000,

    // 文件
    FileNotFound = 3000,
    FileTypeNotAllowed = 3001,
    FileSizeExceeded = 3002,
    FileUploadFailed = 3003,
    MultifileUploadNotAllowed = 3004,
}
