use serde::Serialize;

use crate::models::auth::Role;

// 账号（管理员 / 教师 / 学生共用的业务视图）
#[derive(Debug, Clone, Serialize)]
pub struct Usuario {
    pub id: i64,
    pub role: Role,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legajo: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 关联数据中内嵌的学生信息
#[derive(Debug, Clone, Serialize)]
pub struct AlumnoSummary {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub legajo: String,
}
