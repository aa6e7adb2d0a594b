use serde::Serialize;

use super::entities::Notificacion;
use crate::models::usuarios::entities::AlumnoSummary;

// 群发结果
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub alumnos_notificados: u64,
}

// 批量标记已读结果
#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub actualizadas: u64,
}

// 通知详情（含学生）
#[derive(Debug, Serialize)]
pub struct NotificacionDetailResponse {
    #[serde(flatten)]
    pub notificacion: Notificacion,
    pub alumno: Option<AlumnoSummary>,
}
