use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::comisiones::entities::ComisionSummary;

// 作业（trabajo práctico）
#[derive(Debug, Clone, Serialize)]
pub struct Tp {
    pub id: i64,
    pub consigna: String,
    pub fecha_entrega: DateTime<Utc>,
    pub vigente: bool,
    pub comision_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 提交、通知等关联数据中内嵌的 TP 信息
#[derive(Debug, Clone, Serialize)]
pub struct TpSummary {
    pub id: i64,
    pub consigna: String,
    pub fecha_entrega: DateTime<Utc>,
    pub vigente: bool,
    pub comision: Option<ComisionSummary>,
}
