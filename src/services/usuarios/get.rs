use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UsuarioService, not_found};
use crate::models::{ApiResponse, auth::Role};

pub async fn list_usuarios(
    service: &UsuarioService,
    role: Role,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_usuarios(role).await {
        Ok(usuarios) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            usuarios,
            "Cuentas obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_usuario(
    service: &UsuarioService,
    role: Role,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_usuario_by_id(role, id).await {
        Ok(Some(usuario)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            usuario,
            "Cuenta obtenida correctamente",
        ))),
        Ok(None) => Ok(not_found(role).to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
