pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::materias::requests::{CreateMateriaRequest, UpdateMateriaRequest};
use crate::storage::Storage;

pub struct MateriaService {
    storage: Option<Arc<dyn Storage>>,
}

impl MateriaService {
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

    pub async fn list_materias(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_materias(self, request).await
    }

    pub async fn get_materia(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_materia(self, id, request).await
    }

    pub async fn create_materia(
        &self,
        req: CreateMateriaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_materia(self, req, request).await
    }

    pub async fn update_materia(
        &self,
        id: i64,
        update: UpdateMateriaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_materia(self, id, update, request).await
    }

    // 删除课程，分组及其下属数据级联删除
    pub async fn delete_materia(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_materia(self, id, request).await
    }
}
