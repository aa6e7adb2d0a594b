use chrono::{DateTime, Utc};
use serde::Serialize;

// 评估结果
#[derive(Debug, Clone, Serialize)]
pub struct ResultadoEvaluacion {
    pub id: i64,
    pub nota: f64,
    pub devolucion: Option<String>,
    pub alumno_id: i64,
    pub evaluacion_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
