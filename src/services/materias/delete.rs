use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MateriaService;
use crate::errors::TrackError;
use crate::models::ApiResponse;

pub async fn delete_materia(
    service: &MateriaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_materia(id).await {
        Ok(true) => {
            tracing::info!("Materia {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Materia eliminada correctamente",
            )))
        }
        Ok(false) => Ok(TrackError::not_found("materia no encontrada").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
