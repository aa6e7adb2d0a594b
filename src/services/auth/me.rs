use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::errors::TrackError;
use crate::models::{ApiResponse, auth::responses::UsuarioInfoResponse};
use crate::services::require_identity;

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    // 令牌有效但账号已被删除时视为未登录
    match storage
        .get_usuario_by_id(identity.role, identity.subject_id)
        .await
    {
        Ok(Some(usuario)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UsuarioInfoResponse { usuario },
            "Información del usuario obtenida correctamente",
        ))),
        Ok(None) => Ok(TrackError::authentication("la cuenta ya no existe").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
