//! 数据模型定义
//!
//! 业务实体、请求体与响应体，与 `entity` 中的数据库实体分离。

pub mod auth;
pub mod comisiones;
pub mod common;
pub mod cursadas;
pub mod entregas;
pub mod evaluaciones;
pub mod materias;
pub mod notificaciones;
pub mod resultados;
pub mod tps;
pub mod usuarios;

pub use common::{ApiResponse, ErrorCode};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
