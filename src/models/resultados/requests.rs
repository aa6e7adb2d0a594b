use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateResultadoRequest {
    pub nota: f64,
    pub devolucion: Option<String>,
    pub alumno_id: i64,
    pub evaluacion_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResultadoRequest {
    pub nota: Option<f64>,
    pub devolucion: Option<String>,
    pub alumno_id: Option<i64>,
    pub evaluacion_id: Option<i64>,
}
