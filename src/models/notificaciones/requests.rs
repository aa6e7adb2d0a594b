use chrono::{DateTime, Utc};
use serde::Deserialize;

// 管理员直接创建通知
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotificacionRequest {
    pub alumno_id: i64,
    pub mensaje: String,
    pub fecha_hora: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNotificacionRequest {
    pub mensaje: Option<String>,
    pub fecha_hora: Option<DateTime<Utc>>,
    pub leida: Option<bool>,
    pub alumno_id: Option<i64>,
}

// 按课程群发
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyMateriaRequest {
    pub materia_id: i64,
    pub mensaje: String,
}

// 按分组群发
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyComisionRequest {
    pub comision_id: i64,
    pub mensaje: String,
}
