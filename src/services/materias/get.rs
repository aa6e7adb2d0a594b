use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MateriaService;
use crate::errors::TrackError;
use crate::models::ApiResponse;

pub async fn list_materias(
    service: &MateriaService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_materias().await {
        Ok(materias) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            materias,
            "Materias obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_materia(
    service: &MateriaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_materia_by_id(id).await {
        Ok(Some(materia)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            materia,
            "Materia obtenida correctamente",
        ))),
        Ok(None) => Ok(TrackError::not_found("materia no encontrada").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
