use serde::Serialize;

use crate::models::materias::entities::MateriaSummary;

// 课程分组
#[derive(Debug, Clone, Serialize)]
pub struct Comision {
    pub id: i64,
    pub nombre: String,
    pub materia_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 关联数据中内嵌的分组信息（含所属课程）
#[derive(Debug, Clone, Serialize)]
pub struct ComisionSummary {
    pub id: i64,
    pub nombre: String,
    pub materia: Option<MateriaSummary>,
}

/// 通知文案所需的分组与课程名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComisionContext {
    pub comision_id: i64,
    pub comision_nombre: String,
    pub materia_id: i64,
    pub materia_nombre: String,
}
