use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMateriaRequest {
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMateriaRequest {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}
