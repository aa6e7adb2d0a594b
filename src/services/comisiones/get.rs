use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ComisionService;
use crate::errors::TrackError;
use crate::models::ApiResponse;

pub async fn list_comisiones(
    service: &ComisionService,
    materia_id: Option<i64>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match materia_id {
        Some(materia_id) => storage.list_comisiones_by_materia(materia_id).await,
        None => storage.list_comisiones().await,
    };

    match result {
        Ok(comisiones) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            comisiones,
            "Comisiones obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_comision(
    service: &ComisionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_comision_by_id(id).await {
        Ok(Some(comision)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            comision,
            "Comisión obtenida correctamente",
        ))),
        Ok(None) => Ok(TrackError::not_found("comisión no encontrada").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
