use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::{ArchivoService, get_archivo_owned};
use crate::errors::TrackError;
use crate::services::require_identity;

pub async fn handle_download(
    service: &ArchivoService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    let archivo = match get_archivo_owned(storage.as_ref(), &identity, id).await {
        Ok(archivo) => archivo,
        Err(e) => return Ok(e.to_http_response()),
    };

    let buf = match tokio::fs::read(&archivo.file_path).await {
        Ok(buf) => buf,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let e = TrackError::not_found("el archivo no existe en el servidor");
            return Ok(e.to_http_response());
        }
        Err(e) => {
            let e = TrackError::file_operation(format!("File read failed: {e}"));
            return Ok(e.to_http_response());
        }
    };

    // 使用数据库中的原始文件名
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, archivo.content_type.as_str()))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                archivo.original_name.replace('"', "")
            ),
        ))
        .body(buf))
}
