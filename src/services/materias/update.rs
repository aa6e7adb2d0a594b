use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MateriaService;
use crate::errors::TrackError;
use crate::models::{ApiResponse, materias::requests::UpdateMateriaRequest};
use crate::utils::validate::validate_required;

pub async fn update_materia(
    service: &MateriaService,
    id: i64,
    update: UpdateMateriaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(nombre) = &update.nombre
        && let Err(e) = validate_required("nombre", nombre)
    {
        return Ok(e.to_http_response());
    }

    let storage = service.get_storage(request);

    match storage.update_materia(id, update).await {
        Ok(Some(materia)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            materia,
            "Materia actualizada correctamente",
        ))),
        Ok(None) => Ok(TrackError::not_found("materia no encontrada").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
