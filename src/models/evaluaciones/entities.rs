use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::comisiones::entities::ComisionSummary;

// 评估安排（不含成绩）
#[derive(Debug, Clone, Serialize)]
pub struct Evaluacion {
    pub id: i64,
    /// YYYY-MM-DD
    pub fecha_evaluacion: String,
    pub temas: String,
    pub observaciones: Option<String>,
    pub comision_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluacionSummary {
    pub id: i64,
    pub fecha_evaluacion: String,
    pub temas: String,
    pub comision: Option<ComisionSummary>,
}
