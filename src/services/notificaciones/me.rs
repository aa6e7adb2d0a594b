use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NotificacionService, fanout};
use crate::models::ApiResponse;
use crate::models::notificaciones::responses::MarkAllReadResponse;
use crate::services::require_identity;

pub async fn list_mine(
    service: &NotificacionService,
    request: &HttpRequest,
    leida: Option<bool>,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    match fanout::list_details(storage.as_ref(), Some(identity.subject_id), leida).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Notificaciones obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_mine(
    service: &NotificacionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    let detail = match fanout::get_owned(storage.as_ref(), &identity, id).await {
        Ok(notificacion) => fanout::load_detail(storage.as_ref(), notificacion).await,
        Err(e) => Err(e),
    };

    match detail {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Notificación obtenida correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn mark_mine_read(
    service: &NotificacionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    match fanout::mark_read_owned(storage.as_ref(), &identity, id).await {
        Ok(notificacion) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notificacion,
            "Notificación marcada como leída",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn mark_all_mine_read(
    service: &NotificacionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    match storage
        .mark_all_notificaciones_read(identity.subject_id)
        .await
    {
        Ok(actualizadas) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { actualizadas },
            "Notificaciones marcadas como leídas",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
