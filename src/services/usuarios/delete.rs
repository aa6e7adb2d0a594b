use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UsuarioService, not_found};
use crate::errors::TrackError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, auth::Role};

pub async fn delete_usuario(
    service: &UsuarioService,
    role: Role,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 禁止删除当前登录的管理员
    if let Some(identity) = RequireJWT::extract_identity(request)
        && identity.role == role
        && identity.subject_id == id
    {
        return Ok(TrackError::validation("no puedes eliminar tu propia cuenta").to_http_response());
    }

    match storage.delete_usuario(role, id).await {
        Ok(true) => {
            tracing::info!("{} {} deleted", role, id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Cuenta eliminada correctamente",
            )))
        }
        Ok(false) => Ok(not_found(role).to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
