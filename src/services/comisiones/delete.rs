use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ComisionService;
use crate::errors::TrackError;
use crate::models::ApiResponse;

pub async fn delete_comision(
    service: &ComisionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_comision(id).await {
        Ok(true) => {
            tracing::info!("Comision {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Comisión eliminada correctamente",
            )))
        }
        Ok(false) => Ok(TrackError::not_found("comisión no encontrada").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
