use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvaluacionRequest {
    pub fecha_evaluacion: String,
    pub temas: String,
    pub observaciones: Option<String>,
    pub comision_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvaluacionRequest {
    pub fecha_evaluacion: Option<String>,
    pub temas: Option<String>,
    pub observaciones: Option<String>,
    pub comision_id: Option<i64>,
}
