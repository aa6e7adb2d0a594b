use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntregaRequest {
    pub alumno_id: i64,
    pub tp_id: i64,
    pub fecha_hora: Option<DateTime<Utc>>,
    pub nota: Option<f64>,
    pub devolucion: Option<String>,
}

// 更新提交（部分更新，评分与评语可独立设置）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEntregaRequest {
    pub fecha_hora: Option<DateTime<Utc>>,
    pub nota: Option<f64>,
    pub devolucion: Option<String>,
    pub alumno_id: Option<i64>,
    pub tp_id: Option<i64>,
}

/// 存储层使用的附件记录
#[derive(Debug, Clone)]
pub struct NewArchivo {
    pub entrega_id: i64,
    pub filename: String,
    pub original_name: String,
    pub file_path: String,
    pub content_type: String,
    pub size: i64,
}
