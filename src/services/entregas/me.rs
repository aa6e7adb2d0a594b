use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EntregaService;
use super::get::{list_entrega_details, load_detail, load_entrega};
use crate::errors::Result;
use crate::models::auth::Identity;
use crate::models::entregas::responses::EntregaDetailResponse;
use crate::models::ApiResponse;
use crate::services::require_identity;
use crate::storage::Storage;

pub(crate) async fn get_owned(
    storage: &dyn Storage,
    identity: &Identity,
    id: i64,
) -> Result<EntregaDetailResponse> {
    let entrega = load_entrega(storage, id).await?;
    identity.ensure_owns(entrega.alumno_id, "esta entrega")?;
    load_detail(storage, entrega).await
}

pub async fn list_mine(
    service: &EntregaService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    match list_entrega_details(storage.as_ref(), Some(identity.subject_id)).await {
        Ok(entregas) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            entregas,
            "Entregas obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_mine(
    service: &EntregaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    match get_owned(storage.as_ref(), &identity, id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Entrega obtenida correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
