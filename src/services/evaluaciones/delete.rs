use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluacionService;
use crate::errors::TrackError;
use crate::models::ApiResponse;

pub async fn delete_evaluacion(
    service: &EvaluacionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_evaluacion(id).await {
        Ok(true) => {
            tracing::info!("Evaluacion {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Evaluación eliminada correctamente",
            )))
        }
        Ok(false) => Ok(TrackError::not_found("evaluación no encontrada").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
