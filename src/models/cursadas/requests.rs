use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCursadaRequest {
    pub alumno_id: i64,
    pub comision_id: i64,
    pub ano_lectivo: i32,
    pub nota_final: Option<f64>,
    pub nota_conceptual: Option<f64>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCursadaRequest {
    pub ano_lectivo: Option<i32>,
    pub nota_final: Option<f64>,
    pub nota_conceptual: Option<f64>,
    pub feedback: Option<String>,
    pub alumno_id: Option<i64>,
    pub comision_id: Option<i64>,
}
