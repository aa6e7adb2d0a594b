use chrono::{DateTime, Utc};
use serde::Serialize;

// 作业提交
#[derive(Debug, Clone, Serialize)]
pub struct Entrega {
    pub id: i64,
    pub alumno_id: i64,
    pub tp_id: i64,
    pub fecha_hora: DateTime<Utc>,
    pub nota: Option<f64>,
    pub devolucion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 提交附件
#[derive(Debug, Clone, Serialize)]
pub struct Archivo {
    pub id: i64,
    pub entrega_id: i64,
    pub filename: String,
    pub original_name: String,
    #[serde(skip_serializing)]
    pub file_path: String,
    pub content_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}
