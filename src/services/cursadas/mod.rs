pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::cursadas::requests::{CreateCursadaRequest, UpdateCursadaRequest};
use crate::storage::Storage;
use crate::utils::validate::validate_nota;

pub struct CursadaService {
    storage: Option<Arc<dyn Storage>>,
}

impl CursadaService {
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

    pub async fn list_cursadas(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_cursadas(self, None, request).await
    }

    pub async fn list_cursadas_by_alumno(
        &self,
        alumno_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_cursadas(self, Some(alumno_id), request).await
    }

    // 学生：自己的选课
    pub async fn list_mine(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_mine(self, request).await
    }

    pub async fn get_cursada(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_cursada(self, id, request).await
    }

    pub async fn create_cursada(
        &self,
        req: CreateCursadaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_cursada(self, req, request).await
    }

    pub async fn update_cursada(
        &self,
        id: i64,
        update: UpdateCursadaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_cursada(self, id, update, request).await
    }

    pub async fn delete_cursada(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_cursada(self, id, request).await
    }
}

fn validate_notas(nota_final: Option<f64>, nota_conceptual: Option<f64>) -> Result<()> {
    if let Some(nota) = nota_final {
        validate_nota(nota)?;
    }
    if let Some(nota) = nota_conceptual {
        validate_nota(nota)?;
    }
    Ok(())
}
