use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MateriaService;
use crate::models::{ApiResponse, materias::requests::CreateMateriaRequest};
use crate::utils::validate::validate_required;

pub async fn create_materia(
    service: &MateriaService,
    req: CreateMateriaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = validate_required("nombre", &req.nombre) {
        return Ok(e.to_http_response());
    }

    let storage = service.get_storage(request);

    match storage.create_materia(req).await {
        Ok(materia) => {
            tracing::info!("Materia {} created", materia.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(materia, "Materia creada correctamente")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
