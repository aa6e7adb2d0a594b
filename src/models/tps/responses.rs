use serde::Serialize;

use super::entities::Tp;
use crate::models::comisiones::entities::ComisionSummary;

// TP 详情（含分组与课程）
#[derive(Debug, Serialize)]
pub struct TpDetailResponse {
    #[serde(flatten)]
    pub tp: Tp,
    pub comision: Option<ComisionSummary>,
}
