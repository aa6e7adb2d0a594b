use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CursadaService;
use crate::errors::TrackError;
use crate::models::ApiResponse;

pub async fn delete_cursada(
    service: &CursadaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_cursada(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Cursada eliminada correctamente",
        ))),
        Ok(false) => Ok(TrackError::not_found("cursada no encontrada").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
