pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::tps::requests::{CreateTpRequest, UpdateTpRequest};
use crate::storage::Storage;

pub struct TpService {
    storage: Option<Arc<dyn Storage>>,
}

impl TpService {
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

    pub async fn list_tps(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_tps(self, request).await
    }

    // 学生：所在分组中仍有效的 TP
    pub async fn list_mine(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_mine(self, request).await
    }

    pub async fn get_tp(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_tp(self, id, request).await
    }

    // 创建后通知分组内全部学生
    pub async fn create_tp(
        &self,
        req: CreateTpRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_tp(self, req, request).await
    }

    pub async fn update_tp(
        &self,
        id: i64,
        update: UpdateTpRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_tp(self, id, update, request).await
    }

    pub async fn delete_tp(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_tp(self, id, request).await
    }
}
