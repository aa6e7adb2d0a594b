pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{Result, TrackError};
use crate::models::comisiones::requests::{CreateComisionRequest, UpdateComisionRequest};
use crate::storage::Storage;

pub struct ComisionService {
    storage: Option<Arc<dyn Storage>>,
}

impl ComisionService {
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

    pub async fn list_comisiones(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_comisiones(self, None, request).await
    }

    pub async fn list_comisiones_by_materia(
        &self,
        materia_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_comisiones(self, Some(materia_id), request).await
    }

    pub async fn get_comision(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_comision(self, id, request).await
    }

    pub async fn create_comision(
        &self,
        req: CreateComisionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_comision(self, req, request).await
    }

    pub async fn update_comision(
        &self,
        id: i64,
        update: UpdateComisionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_comision(self, id, update, request).await
    }

    pub async fn delete_comision(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_comision(self, id, request).await
    }
}

/// 引用的课程必须存在
pub(crate) async fn ensure_materia_exists(storage: &dyn Storage, materia_id: i64) -> Result<()> {
    if storage.get_materia_by_id(materia_id).await?.is_none() {
        return Err(TrackError::validation("la materia especificada no existe"));
    }
    Ok(())
}

/// 引用的分组必须存在（TP、评估、选课共用）
pub(crate) async fn ensure_comision_exists(storage: &dyn Storage, comision_id: i64) -> Result<()> {
    if storage.get_comision_by_id(comision_id).await?.is_none() {
        return Err(TrackError::validation("la comisión especificada no existe"));
    }
    Ok(())
}
