pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::Role;
use crate::models::usuarios::requests::{CreateUsuarioRequest, UpdateUsuarioRequest};
use crate::storage::Storage;

/// 管理员、教师与学生账号的增删改查，角色由路由决定
pub struct UsuarioService {
    storage: Option<Arc<dyn Storage>>,
}

impl UsuarioService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_usuarios(
        &self,
        role: Role,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_usuarios(self, role, request).await
    }

    pub async fn get_usuario(
        &self,
        role: Role,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_usuario(self, role, id, request).await
    }

    pub async fn create_usuario(
        &self,
        role: Role,
        req: CreateUsuarioRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_usuario(self, role, req, request).await
    }

    pub async fn update_usuario(
        &self,
        role: Role,
        id: i64,
        update: UpdateUsuarioRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_usuario(self, role, id, update, request).await
    }

    pub async fn delete_usuario(
        &self,
        role: Role,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_usuario(self, role, id, request).await
    }
}

pub(crate) fn not_found(role: Role) -> crate::errors::TrackError {
    let recurso = match role {
        Role::Admin => "administrador no encontrado",
        Role::Profesor => "profesor no encontrado",
        Role::Alumno => "alumno no encontrado",
    };
    crate::errors::TrackError::not_found(recurso)
}

/// 引用的学生必须存在
pub(crate) async fn ensure_alumno_exists(
    storage: &dyn Storage,
    alumno_id: i64,
) -> crate::errors::Result<()> {
    if storage
        .get_usuario_by_id(Role::Alumno, alumno_id)
        .await?
        .is_none()
    {
        return Err(crate::errors::TrackError::validation(
            "el alumno especificado no existe",
        ));
    }
    Ok(())
}
