use serde::Serialize;

use super::entities::{Archivo, Entrega};
use crate::models::{tps::entities::TpSummary, usuarios::entities::AlumnoSummary};

// 提交详情（含附件、学生与 TP）
#[derive(Debug, Serialize)]
pub struct EntregaDetailResponse {
    #[serde(flatten)]
    pub entrega: Entrega,
    pub archivos: Vec<Archivo>,
    pub alumno: Option<AlumnoSummary>,
    pub tp: Option<TpSummary>,
}

// 上传结果
#[derive(Debug, Serialize)]
pub struct EntregaUploadResponse {
    pub entrega: Entrega,
    pub archivo: Archivo,
}
