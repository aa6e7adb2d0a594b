use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CursadaService, validate_notas};
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    cursadas::{entities::Cursada, requests::UpdateCursadaRequest},
};
use crate::services::comisiones::ensure_comision_exists;
use crate::services::usuarios::ensure_alumno_exists;
use crate::storage::Storage;

pub(crate) async fn apply_update(
    storage: &dyn Storage,
    id: i64,
    update: UpdateCursadaRequest,
) -> Result<Cursada> {
    validate_notas(update.nota_final, update.nota_conceptual)?;
    if let Some(alumno_id) = update.alumno_id {
        ensure_alumno_exists(storage, alumno_id).await?;
    }
    if let Some(comision_id) = update.comision_id {
        ensure_comision_exists(storage, comision_id).await?;
    }

    storage
        .update_cursada(id, update)
        .await?
        .ok_or_else(|| TrackError::not_found("cursada no encontrada"))
}

pub async fn update_cursada(
    service: &CursadaService,
    id: i64,
    update: UpdateCursadaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_update(storage.as_ref(), id, update).await {
        Ok(cursada) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            cursada,
            "Cursada actualizada correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
