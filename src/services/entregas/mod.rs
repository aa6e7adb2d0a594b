pub mod create;
pub mod delete;
pub mod get;
pub mod me;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{Result, TrackError};
use crate::models::entregas::requests::{CreateEntregaRequest, UpdateEntregaRequest};
use crate::models::tps::entities::Tp;
use crate::storage::Storage;

pub struct EntregaService {
    storage: Option<Arc<dyn Storage>>,
}

impl EntregaService {
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

    pub async fn list_entregas(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_entregas(self, None, request).await
    }

    pub async fn list_entregas_by_alumno(
        &self,
        alumno_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_entregas(self, Some(alumno_id), request).await
    }

    // 提交详情（含附件）
    pub async fn get_entrega(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_entrega(self, id, request).await
    }

    pub async fn list_archivos(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_archivos(self, id, request).await
    }

    pub async fn create_entrega(
        &self,
        req: CreateEntregaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_entrega(self, req, request).await
    }

    // 评分与评语
    pub async fn update_entrega(
        &self,
        id: i64,
        update: UpdateEntregaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_entrega(self, id, update, request).await
    }

    pub async fn delete_entrega(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_entrega(self, id, request).await
    }

    // 学生：自己的提交
    pub async fn list_mine(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::list_mine(self, request).await
    }

    pub async fn get_mine(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_mine(self, id, request).await
    }

    // 学生：为某个 TP 上传附件
    pub async fn upload(
        &self,
        tp_id: i64,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, tp_id, request, payload).await
    }
}

pub(crate) async fn ensure_tp_exists(storage: &dyn Storage, tp_id: i64) -> Result<Tp> {
    storage
        .get_tp_by_id(tp_id)
        .await?
        .ok_or_else(|| TrackError::validation("el TP especificado no existe"))
}
