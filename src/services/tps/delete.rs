use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TpService;
use crate::errors::TrackError;
use crate::models::ApiResponse;

pub async fn delete_tp(
    service: &TpService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_tp(id).await {
        Ok(true) => {
            tracing::info!("TP {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Trabajo práctico eliminado correctamente",
            )))
        }
        Ok(false) => Ok(TrackError::not_found("trabajo práctico no encontrado").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
