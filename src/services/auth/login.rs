use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
    usuarios::entities::Usuario,
};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

const CREDENCIALES_INVALIDAS: &str = "credenciales inválidas";

/// 按邮箱在三张账号表中查找并校验密码
///
/// 邮箱不存在与密码错误返回同一条消息。
pub(crate) async fn authenticate(
    storage: &dyn Storage,
    email: &str,
    password: &str,
) -> Result<Usuario> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(TrackError::authentication(CREDENCIALES_INVALIDAS));
    }

    match storage.find_usuario_by_email(email).await? {
        Some(usuario) if verify_password(password, &usuario.password_hash) => Ok(usuario),
        _ => Err(TrackError::authentication(CREDENCIALES_INVALIDAS)),
    }
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 查找账号并验证密码
    let usuario =
        match authenticate(storage.as_ref(), &login_request.email, &login_request.password).await {
            Ok(usuario) => usuario,
            Err(TrackError::Authentication(msg)) => {
                tracing::info!("Failed login attempt for {}", login_request.email);
                return Ok(HttpResponse::Unauthorized()
                    .json(ApiResponse::error_empty(ErrorCode::AuthFailed, msg)));
            }
            Err(e) => return Ok(e.to_http_response()),
        };

    // 2. 生成访问令牌
    match JwtUtils::generate_access_token(usuario.id, usuario.role) {
        Ok(access_token) => {
            tracing::info!("{} {} logged in successfully", usuario.role, usuario.id);

            let response = LoginResponse {
                access_token,
                expires_in: JwtUtils::access_token_ttl_secs(),
                usuario,
                created_at: chrono::Utc::now(),
            };

            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Inicio de sesión exitoso")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "No se pudo generar el token de acceso",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;
    use crate::models::usuarios::requests::CreateUsuarioRequest;
    use crate::test_support;
    use crate::utils::password::hash_password;

    #[actix_web::test]
    async fn test_authenticate_profesor_by_email() {
        let storage = test_support::storage().await;
        let profesor = storage
            .create_usuario(
                Role::Profesor,
                CreateUsuarioRequest {
                    nombre: "Marta".into(),
                    apellido: "Ruiz".into(),
                    email: "marta@uni.edu".into(),
                    legajo: Some("P-100".into()),
                    password: hash_password("clave1234").unwrap(),
                },
            )
            .await
            .unwrap();

        let usuario = authenticate(storage.as_ref(), "marta@uni.edu", "clave1234")
            .await
            .unwrap();
        assert_eq!(usuario.id, profesor.id);
        assert_eq!(usuario.role, Role::Profesor);

        let wrong = authenticate(storage.as_ref(), "marta@uni.edu", "otra-clave1")
            .await
            .unwrap_err();
        let unknown = authenticate(storage.as_ref(), "nadie@uni.edu", "clave1234")
            .await
            .unwrap_err();
        assert_eq!(wrong.message(), CREDENCIALES_INVALIDAS);
        assert_eq!(wrong.message(), unknown.message());
    }
}
