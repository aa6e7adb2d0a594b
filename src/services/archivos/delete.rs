use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ArchivoService, remove_stored_file};
use crate::errors::{Result, TrackError};
use crate::models::ApiResponse;
use crate::storage::Storage;

/// 先删磁盘文件，再删记录
pub(crate) async fn apply_delete(storage: &dyn Storage, id: i64) -> Result<()> {
    let archivo = storage
        .get_archivo_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("archivo no encontrado"))?;

    remove_stored_file(&archivo.file_path).await;
    storage.delete_archivo(id).await?;

    Ok(())
}

pub async fn handle_delete(
    service: &ArchivoService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_delete(storage.as_ref(), id).await {
        Ok(()) => {
            tracing::info!("Archivo {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Archivo eliminado correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
