use serde::Serialize;

use super::entities::Cursada;
use crate::models::{comisiones::entities::ComisionSummary, usuarios::entities::AlumnoSummary};

// 选课详情（含学生与分组、课程）
#[derive(Debug, Serialize)]
pub struct CursadaDetailResponse {
    #[serde(flatten)]
    pub cursada: Cursada,
    pub alumno: Option<AlumnoSummary>,
    pub comision: Option<ComisionSummary>,
}
