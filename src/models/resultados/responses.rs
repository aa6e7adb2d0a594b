use serde::Serialize;

use super::entities::ResultadoEvaluacion;
use crate::models::{evaluaciones::entities::EvaluacionSummary, usuarios::entities::AlumnoSummary};

// 评估结果详情（含学生与评估、分组）
#[derive(Debug, Serialize)]
pub struct ResultadoDetailResponse {
    #[serde(flatten)]
    pub resultado: ResultadoEvaluacion,
    pub alumno: Option<AlumnoSummary>,
    pub evaluacion: Option<EvaluacionSummary>,
}
