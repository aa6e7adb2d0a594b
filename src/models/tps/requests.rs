use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTpRequest {
    pub consigna: String,
    pub fecha_entrega: DateTime<Utc>,
    pub vigente: Option<bool>,
    pub comision_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTpRequest {
    pub consigna: Option<String>,
    pub fecha_entrega: Option<DateTime<Utc>>,
    pub vigente: Option<bool>,
    pub comision_id: Option<i64>,
}
