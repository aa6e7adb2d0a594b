use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ComisionService, ensure_materia_exists};
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    comisiones::{entities::Comision, requests::UpdateComisionRequest},
};
use crate::storage::Storage;
use crate::utils::validate::validate_required;

pub(crate) async fn apply_update(
    storage: &dyn Storage,
    id: i64,
    update: UpdateComisionRequest,
) -> Result<Comision> {
    if let Some(nombre) = &update.nombre {
        validate_required("nombre", nombre)?;
    }
    if let Some(materia_id) = update.materia_id {
        ensure_materia_exists(storage, materia_id).await?;
    }

    storage
        .update_comision(id, update)
        .await?
        .ok_or_else(|| TrackError::not_found("comisión no encontrada"))
}

pub async fn update_comision(
    service: &ComisionService,
    id: i64,
    update: UpdateComisionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_update(storage.as_ref(), id, update).await {
        Ok(comision) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            comision,
            "Comisión actualizada correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
