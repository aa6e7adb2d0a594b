use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CursadaService;
use crate::errors::{Result, TrackError};
use crate::models::{ApiResponse, cursadas::responses::CursadaDetailResponse};
use crate::services::require_identity;
use crate::storage::Storage;

pub(crate) async fn list_cursada_details(
    storage: &dyn Storage,
    alumno_id: Option<i64>,
) -> Result<Vec<CursadaDetailResponse>> {
    let cursadas = match alumno_id {
        Some(alumno_id) => storage.list_cursadas_by_alumno(alumno_id).await?,
        None => storage.list_cursadas().await?,
    };
    storage.load_cursada_details(cursadas).await
}

pub(crate) async fn load_cursada_detail(
    storage: &dyn Storage,
    id: i64,
) -> Result<CursadaDetailResponse> {
    let cursada = storage
        .get_cursada_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("cursada no encontrada"))?;

    storage
        .load_cursada_details(vec![cursada])
        .await?
        .pop()
        .ok_or_else(|| TrackError::not_found("cursada no encontrada"))
}

pub async fn list_cursadas(
    service: &CursadaService,
    alumno_id: Option<i64>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match list_cursada_details(storage.as_ref(), alumno_id).await {
        Ok(cursadas) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            cursadas,
            "Cursadas obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_mine(
    service: &CursadaService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };

    list_cursadas(service, Some(identity.subject_id), request).await
}

pub async fn get_cursada(
    service: &CursadaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_cursada_detail(storage.as_ref(), id).await {
        Ok(cursada) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            cursada,
            "Cursada obtenida correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
