use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComisionRequest {
    pub nombre: String,
    pub materia_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComisionRequest {
    pub nombre: Option<String>,
    pub materia_id: Option<i64>,
}
