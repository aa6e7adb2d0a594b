use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UsuarioService;
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    auth::Role,
    usuarios::{entities::Usuario, requests::CreateUsuarioRequest},
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_legajo, validate_password, validate_required,
};

/// 校验并创建账号，密码在这里完成哈希
pub(crate) async fn apply_create(
    storage: &dyn Storage,
    role: Role,
    mut req: CreateUsuarioRequest,
) -> Result<Usuario> {
    validate_required("nombre", &req.nombre)?;
    validate_required("apellido", &req.apellido)?;
    req.email = req.email.trim().to_lowercase();
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    if role.requires_legajo() {
        let legajo = req
            .legajo
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| TrackError::validation("el legajo es obligatorio"))?
            .to_string();
        validate_legajo(&legajo)?;
        if storage.legajo_in_use(&legajo, None).await? {
            return Err(TrackError::validation("ya existe una cuenta con ese legajo"));
        }
        req.legajo = Some(legajo);
    } else {
        req.legajo = None;
    }

    if storage.email_in_use(&req.email, None).await? {
        return Err(TrackError::validation("ya existe una cuenta con ese email"));
    }

    req.password = hash_password(&req.password)?;
    storage.create_usuario(role, req).await
}

pub async fn create_usuario(
    service: &UsuarioService,
    role: Role,
    req: CreateUsuarioRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_create(storage.as_ref(), role, req).await {
        Ok(usuario) => {
            info!("{} {} created", role, usuario.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                usuario,
                "Cuenta creada correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use crate::utils::password::verify_password;

    fn alta(email: &str, legajo: Option<&str>) -> CreateUsuarioRequest {
        CreateUsuarioRequest {
            nombre: "Lucía".into(),
            apellido: "Pérez".into(),
            email: email.into(),
            legajo: legajo.map(Into::into),
            password: "segura123".into(),
        }
    }

    #[actix_web::test]
    async fn test_create_hashes_password_and_normalizes_email() {
        let storage = test_support::storage().await;
        let alta_alumno = alta(" Lucia@Uni.EDU ", Some("A-77"));
        let alumno = apply_create(storage.as_ref(), Role::Alumno, alta_alumno)
            .await
            .unwrap();

        assert_eq!(alumno.email, "lucia@uni.edu");
        assert_ne!(alumno.password_hash, "segura123");
        assert!(verify_password("segura123", &alumno.password_hash));
    }

    #[actix_web::test]
    async fn test_email_unique_across_roles() {
        let storage = test_support::storage().await;
        apply_create(storage.as_ref(), Role::Admin, alta("dup@uni.edu", None))
            .await
            .unwrap();

        let err = apply_create(storage.as_ref(), Role::Profesor, alta("dup@uni.edu", Some("P-1")))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "ya existe una cuenta con ese email");
    }

    #[actix_web::test]
    async fn test_legajo_unique_between_profesores_and_alumnos() {
        let storage = test_support::storage().await;
        apply_create(storage.as_ref(), Role::Profesor, alta("p@uni.edu", Some("X-1")))
            .await
            .unwrap();

        let err = apply_create(storage.as_ref(), Role::Alumno, alta("a@uni.edu", Some("X-1")))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "ya existe una cuenta con ese legajo");

        let err = apply_create(storage.as_ref(), Role::Alumno, alta("b@uni.edu", None))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "el legajo es obligatorio");
    }

    #[actix_web::test]
    async fn test_admin_ignores_legajo() {
        let storage = test_support::storage().await;
        let admin = apply_create(storage.as_ref(), Role::Admin, alta("root@uni.edu", Some("Z-9")))
            .await
            .unwrap();
        assert!(admin.legajo.is_none());
    }
}
