use chrono::{DateTime, Utc};
use serde::Serialize;

// 学生通知
#[derive(Debug, Clone, Serialize)]
pub struct Notificacion {
    pub id: i64,
    pub alumno_id: i64,
    pub mensaje: String,
    pub fecha_hora: DateTime<Utc>,
    pub leida: bool,
}

/// 待写入的通知行（批量插入使用）
#[derive(Debug, Clone)]
pub struct NewNotificacion {
    pub alumno_id: i64,
    pub mensaje: String,
    pub fecha_hora: DateTime<Utc>,
}
