pub mod delete;
pub mod download;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::io::ErrorKind;
use std::sync::Arc;

use crate::errors::{Result, TrackError};
use crate::models::auth::Identity;
use crate::models::entregas::entities::Archivo;
use crate::storage::Storage;

pub struct ArchivoService {
    storage: Option<Arc<dyn Storage>>,
}

impl ArchivoService {
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

    // 下载附件：教师与管理员不受限，学生只能下载自己提交的附件
    pub async fn download(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        download::handle_download(self, id, request).await
    }

    pub async fn delete(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::handle_delete(self, id, request).await
    }
}

/// 删除磁盘上的附件文件
///
/// 文件已不存在不算错误；其余错误只记录日志，不阻断数据库删除。
pub(crate) async fn remove_stored_file(file_path: &str) {
    match tokio::fs::remove_file(file_path).await {
        Ok(()) => tracing::debug!("Removed stored file {file_path}"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            "{}",
            TrackError::file_operation(format!("failed to remove {file_path}: {e}"))
        ),
    }
}

/// 读取附件记录并校验归属（经由所属提交的 alumno_id）
pub(crate) async fn get_archivo_owned(
    storage: &dyn Storage,
    identity: &Identity,
    id: i64,
) -> Result<Archivo> {
    let archivo = storage
        .get_archivo_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("archivo no encontrado"))?;

    let entrega = storage
        .get_entrega_by_id(archivo.entrega_id)
        .await?
        .ok_or_else(|| TrackError::not_found("entrega no encontrada"))?;
    identity.ensure_owns(entrega.alumno_id, "este archivo")?;

    Ok(archivo)
}
