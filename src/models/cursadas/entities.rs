use serde::Serialize;

// 选课记录：学生与分组的关联
#[derive(Debug, Clone, Serialize)]
pub struct Cursada {
    pub id: i64,
    pub alumno_id: i64,
    pub comision_id: i64,
    pub ano_lectivo: i32,
    pub nota_final: Option<f64>,
    pub nota_conceptual: Option<f64>,
    pub feedback: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
