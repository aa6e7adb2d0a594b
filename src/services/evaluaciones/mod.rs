pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::evaluaciones::requests::{CreateEvaluacionRequest, UpdateEvaluacionRequest};
use crate::storage::Storage;

pub struct EvaluacionService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluacionService {
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

    pub async fn list_evaluaciones(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_evaluaciones(self, None, request).await
    }

    pub async fn list_evaluaciones_by_comision(
        &self,
        comision_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_evaluaciones(self, Some(comision_id), request).await
    }

    pub async fn get_evaluacion(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_evaluacion(self, id, request).await
    }

    pub async fn create_evaluacion(
        &self,
        req: CreateEvaluacionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_evaluacion(self, req, request).await
    }

    pub async fn update_evaluacion(
        &self,
        id: i64,
        update: UpdateEvaluacionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_evaluacion(self, id, update, request).await
    }

    pub async fn delete_evaluacion(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_evaluacion(self, id, request).await
    }
}
