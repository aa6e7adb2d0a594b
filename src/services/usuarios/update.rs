use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UsuarioService, not_found};
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    auth::Role,
    usuarios::{entities::Usuario, requests::UpdateUsuarioRequest},
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_legajo, validate_password, validate_required,
};

/// 部分更新：只校验并写入请求中出现的字段
pub(crate) async fn apply_update(
    storage: &dyn Storage,
    role: Role,
    id: i64,
    mut update: UpdateUsuarioRequest,
) -> Result<Usuario> {
    if let Some(nombre) = &update.nombre {
        validate_required("nombre", nombre)?;
    }
    if let Some(apellido) = &update.apellido {
        validate_required("apellido", apellido)?;
    }

    if let Some(email) = update.email.take() {
        let email = email.trim().to_lowercase();
        validate_email(&email)?;
        if storage.email_in_use(&email, Some((role, id))).await? {
            return Err(TrackError::validation("ya existe una cuenta con ese email"));
        }
        update.email = Some(email);
    }

    if role.requires_legajo() {
        if let Some(legajo) = update.legajo.take() {
            let legajo = legajo.trim().to_string();
            validate_legajo(&legajo)?;
            if storage.legajo_in_use(&legajo, Some((role, id))).await? {
                return Err(TrackError::validation("ya existe una cuenta con ese legajo"));
            }
            update.legajo = Some(legajo);
        }
    } else {
        update.legajo = None;
    }

    if let Some(password) = update.password.take() {
        validate_password(&password)?;
        update.password = Some(hash_password(&password)?);
    }

    storage
        .update_usuario(role, id, update)
        .await?
        .ok_or_else(|| not_found(role))
}

pub async fn update_usuario(
    service: &UsuarioService,
    role: Role,
    id: i64,
    update: UpdateUsuarioRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_update(storage.as_ref(), role, id, update).await {
        Ok(usuario) => {
            info!("{} {} updated", role, id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                usuario,
                "Cuenta actualizada correctamente",
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
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_update_keeps_own_email_and_rehashes() {
        let storage = test_support::storage().await;
        let alumno = test_support::seed_alumno(&storage, "eva@uni.edu", "E-1").await;

        let updated = apply_update(
            storage.as_ref(),
            Role::Alumno,
            alumno.id,
            UpdateUsuarioRequest {
                email: Some("eva@uni.edu".into()),
                password: Some("nueva1234".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(verify_password("nueva1234", &updated.password_hash));
    }

    #[actix_web::test]
    async fn test_update_rejects_taken_email_and_missing_row() {
        let storage = test_support::storage().await;
        test_support::seed_usuario(&storage, Role::Admin, "admin@uni.edu", None).await;
        let alumno = test_support::seed_alumno(&storage, "leo@uni.edu", "L-1").await;

        let err = apply_update(
            storage.as_ref(),
            Role::Alumno,
            alumno.id,
            UpdateUsuarioRequest {
                email: Some("admin@uni.edu".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = apply_update(
            storage.as_ref(),
            Role::Profesor,
            9999,
            UpdateUsuarioRequest {
                nombre: Some("Nadie".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
