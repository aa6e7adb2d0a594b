use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EntregaService;
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    entregas::{entities::Entrega, responses::EntregaDetailResponse},
};
use crate::storage::Storage;

pub(crate) async fn load_entrega(storage: &dyn Storage, id: i64) -> Result<Entrega> {
    storage
        .get_entrega_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("entrega no encontrada"))
}

/// 提交连同附件、学生与 TP
pub(crate) async fn load_detail(
    storage: &dyn Storage,
    entrega: Entrega,
) -> Result<EntregaDetailResponse> {
    storage
        .load_entrega_details(vec![entrega])
        .await?
        .pop()
        .ok_or_else(|| TrackError::not_found("entrega no encontrada"))
}

pub(crate) async fn list_entrega_details(
    storage: &dyn Storage,
    alumno_id: Option<i64>,
) -> Result<Vec<EntregaDetailResponse>> {
    let entregas = match alumno_id {
        Some(alumno_id) => storage.list_entregas_by_alumno(alumno_id).await?,
        None => storage.list_entregas().await?,
    };
    storage.load_entrega_details(entregas).await
}

pub async fn list_entregas(
    service: &EntregaService,
    alumno_id: Option<i64>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match list_entrega_details(storage.as_ref(), alumno_id).await {
        Ok(entregas) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            entregas,
            "Entregas obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_entrega(
    service: &EntregaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let detail = match load_entrega(storage.as_ref(), id).await {
        Ok(entrega) => load_detail(storage.as_ref(), entrega).await,
        Err(e) => Err(e),
    };

    match detail {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Entrega obtenida correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_archivos(
    service: &EntregaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(e) = load_entrega(storage.as_ref(), id).await {
        return Ok(e.to_http_response());
    }

    match storage.list_archivos_by_entrega(id).await {
        Ok(archivos) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            archivos,
            "Archivos obtenidos correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
