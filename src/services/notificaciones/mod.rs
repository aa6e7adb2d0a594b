pub mod admin;
pub mod broadcast;
pub(crate) mod fanout;
pub mod me;
pub(crate) mod notifier;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notificaciones::requests::{
    CreateNotificacionRequest, NotifyComisionRequest, NotifyMateriaRequest,
    UpdateNotificacionRequest,
};
use crate::storage::Storage;

pub struct NotificacionService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificacionService {
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

    // 管理员：全部通知
    pub async fn list_notificaciones(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::list_notificaciones(self, request).await
    }

    pub async fn get_notificacion(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        admin::get_notificacion(self, request, id).await
    }

    pub async fn create_notificacion(
        &self,
        request: &HttpRequest,
        req: CreateNotificacionRequest,
    ) -> ActixResult<HttpResponse> {
        admin::create_notificacion(self, request, req).await
    }

    pub async fn update_notificacion(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateNotificacionRequest,
    ) -> ActixResult<HttpResponse> {
        admin::update_notificacion(self, request, id, update).await
    }

    pub async fn delete_notificacion(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        admin::delete_notificacion(self, request, id).await
    }

    pub async fn mark_read(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        admin::mark_read(self, request, id).await
    }

    // 管理员：按学生查询，leida 为 None 时返回全部
    pub async fn list_by_alumno(
        &self,
        request: &HttpRequest,
        alumno_id: i64,
        leida: Option<bool>,
    ) -> ActixResult<HttpResponse> {
        admin::list_by_alumno(self, request, alumno_id, leida).await
    }

    pub async fn mark_all_read_by_alumno(
        &self,
        request: &HttpRequest,
        alumno_id: i64,
    ) -> ActixResult<HttpResponse> {
        admin::mark_all_read_by_alumno(self, request, alumno_id).await
    }

    // 教师与管理员：群发
    pub async fn notify_materia(
        &self,
        request: &HttpRequest,
        req: NotifyMateriaRequest,
    ) -> ActixResult<HttpResponse> {
        broadcast::notify_materia(self, request, req).await
    }

    pub async fn notify_comision(
        &self,
        request: &HttpRequest,
        req: NotifyComisionRequest,
    ) -> ActixResult<HttpResponse> {
        broadcast::notify_comision(self, request, req).await
    }

    // 学生：自己的通知
    pub async fn list_mine(
        &self,
        request: &HttpRequest,
        leida: Option<bool>,
    ) -> ActixResult<HttpResponse> {
        me::list_mine(self, request, leida).await
    }

    pub async fn get_mine(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        me::get_mine(self, request, id).await
    }

    pub async fn mark_mine_read(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        me::mark_mine_read(self, request, id).await
    }

    pub async fn mark_all_mine_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::mark_all_mine_read(self, request).await
    }
}
