use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::get::{list_resultado_details, load_detail, load_resultado};
use super::{ResultadoFilter, ResultadoService};
use crate::errors::Result;
use crate::models::{ApiResponse, auth::Identity, resultados::responses::ResultadoDetailResponse};
use crate::services::require_identity;
use crate::storage::Storage;

pub(crate) async fn get_owned(
    storage: &dyn Storage,
    identity: &Identity,
    id: i64,
) -> Result<ResultadoDetailResponse> {
    let resultado = load_resultado(storage, id).await?;
    identity.ensure_owns(resultado.alumno_id, "este resultado")?;
    load_detail(storage, resultado).await
}

pub async fn list_mine(
    service: &ResultadoService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    let filter = ResultadoFilter::Alumno(identity.subject_id);
    match list_resultado_details(storage.as_ref(), filter).await {
        Ok(resultados) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resultados,
            "Resultados obtenidos correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_mine(
    service: &ResultadoService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    match get_owned(storage.as_ref(), &identity, id).await {
        Ok(resultado) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resultado,
            "Resultado obtenido correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
