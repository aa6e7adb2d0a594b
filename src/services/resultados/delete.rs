use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultadoService;
use crate::errors::TrackError;
use crate::models::ApiResponse;

pub async fn delete_resultado(
    service: &ResultadoService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_resultado(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Resultado eliminado correctamente",
        ))),
        Ok(false) => Ok(TrackError::not_found("resultado no encontrado").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
