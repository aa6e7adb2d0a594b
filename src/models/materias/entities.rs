use serde::Serialize;

// 课程
#[derive(Debug, Clone, Serialize)]
pub struct Materia {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MateriaSummary {
    pub id: i64,
    pub nombre: String,
}
