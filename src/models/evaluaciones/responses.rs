use serde::Serialize;

use super::entities::Evaluacion;
use crate::models::comisiones::entities::ComisionSummary;

#[derive(Debug, Serialize)]
pub struct EvaluacionDetailResponse {
    #[serde(flatten)]
    pub evaluacion: Evaluacion,
    pub comision: Option<ComisionSummary>,
}
