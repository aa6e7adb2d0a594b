pub mod create;
pub mod delete;
pub mod get;
pub mod me;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{Result, TrackError};
use crate::models::resultados::requests::{CreateResultadoRequest, UpdateResultadoRequest};
use crate::storage::Storage;

pub struct ResultadoService {
    storage: Option<Arc<dyn Storage>>,
}

/// 结果列表的过滤方式
#[derive(Debug, Clone, Copy)]
pub enum ResultadoFilter {
    Todos,
    Alumno(i64),
    Evaluacion(i64),
}

impl ResultadoService {
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

    pub async fn list_resultados(
        &self,
        filter: ResultadoFilter,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_resultados(self, filter, request).await
    }

    pub async fn get_resultado(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_resultado(self, id, request).await
    }

    pub async fn create_resultado(
        &self,
        req: CreateResultadoRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_resultado(self, req, request).await
    }

    pub async fn update_resultado(
        &self,
        id: i64,
        update: UpdateResultadoRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_resultado(self, id, update, request).await
    }

    pub async fn delete_resultado(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_resultado(self, id, request).await
    }

    // 学生：自己的评估结果
    pub async fn list_mine(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::list_mine(self, request).await
    }

    pub async fn get_mine(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_mine(self, id, request).await
    }
}

pub(crate) async fn ensure_evaluacion_exists(
    storage: &dyn Storage,
    evaluacion_id: i64,
) -> Result<()> {
    if storage.get_evaluacion_by_id(evaluacion_id).await?.is_none() {
        return Err(TrackError::validation("la evaluación especificada no existe"));
    }
    Ok(())
}
