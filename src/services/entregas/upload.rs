use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::path::Path;
use uuid::Uuid;

use super::EntregaService;
use crate::config::AppConfig;
use crate::errors::{Result, TrackError};
use crate::models::entregas::{
    entities::Entrega,
    requests::{CreateEntregaRequest, NewArchivo},
    responses::EntregaUploadResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::archivos::remove_stored_file;
use crate::services::notificaciones::notifier;
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::file_magic::{content_type_for, extension_of};
use crate::utils::validate_magic_bytes;

/// 从 multipart 中读出的单个文件
pub(crate) struct UploadedFile {
    pub original_name: String,
    pub extension: String,
    pub data: Vec<u8>,
}

/// 上传被拒绝的原因，各自对应独立的错误码
#[derive(Debug)]
pub(crate) enum UploadRejected {
    Missing,
    Multiple,
    TypeNotAllowed,
    ContentMismatch,
    TooLarge,
    Malformed(String),
}

impl UploadRejected {
    fn to_http_response(&self) -> HttpResponse {
        let (code, message) = match self {
            UploadRejected::Missing => (
                ErrorCode::FileNotFound,
                "no se encontró ningún archivo en la solicitud".to_string(),
            ),
            UploadRejected::Multiple => (
                ErrorCode::MultifileUploadNotAllowed,
                "solo se puede subir un archivo por solicitud".to_string(),
            ),
            UploadRejected::TypeNotAllowed => {
                (ErrorCode::FileTypeNotAllowed, "tipo de archivo no permitido".to_string())
            }
            UploadRejected::ContentMismatch => (
                ErrorCode::FileTypeNotAllowed,
                "el contenido del archivo no coincide con su extensión".to_string(),
            ),
            UploadRejected::TooLarge => (
                ErrorCode::FileSizeExceeded,
                "el archivo supera el tamaño máximo permitido".to_string(),
            ),
            UploadRejected::Malformed(e) => (
                ErrorCode::BadRequest,
                format!("solicitud multipart inválida: {e}"),
            ),
        };
        HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
    }
}

/// 读取唯一的 `file` 字段，边读边校验扩展名、魔术字节和大小
async fn read_upload(
    payload: &mut Multipart,
    allowed_types: &[String],
    max_size: usize,
) -> std::result::Result<UploadedFile, UploadRejected> {
    let mut uploaded: Option<UploadedFile> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| UploadRejected::Malformed(e.to_string()))?
    {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if uploaded.is_some() {
            return Err(UploadRejected::Multiple);
        }

        // 去掉客户端可能带上的路径
        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.rsplit(['/', '\\']).next().unwrap_or(s).to_string())
            .unwrap_or_default();

        let extension = extension_of(&original_name).ok_or(UploadRejected::TypeNotAllowed)?;
        if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
            return Err(UploadRejected::TypeNotAllowed);
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| UploadRejected::Malformed(e.to_string()))?;
            if data.is_empty() && !validate_magic_bytes(&chunk, &extension) {
                return Err(UploadRejected::ContentMismatch);
            }
            if data.len() + chunk.len() > max_size {
                return Err(UploadRejected::TooLarge);
            }
            data.extend_from_slice(&chunk);
        }
        if data.is_empty() {
            return Err(UploadRejected::ContentMismatch);
        }

        uploaded = Some(UploadedFile {
            original_name,
            extension,
            data,
        });
    }

    uploaded.ok_or(UploadRejected::Missing)
}

/// 学生只能向自己所在分组中仍有效的 TP 提交
async fn check_tp_for_upload(storage: &dyn Storage, alumno_id: i64, tp_id: i64) -> Result<()> {
    let tp = storage
        .get_tp_by_id(tp_id)
        .await?
        .ok_or_else(|| TrackError::not_found("trabajo práctico no encontrado"))?;

    if !storage
        .alumno_enrolled_in_comision(alumno_id, tp.comision_id)
        .await?
    {
        return Err(TrackError::validation(
            "el TP no pertenece a ninguna de tus comisiones",
        ));
    }
    if !tp.vigente {
        return Err(TrackError::validation("el TP ya no admite entregas"));
    }
    Ok(())
}

/// 复用该学生在此 TP 上的已有提交，没有则新建
async fn entrega_for_upload(storage: &dyn Storage, alumno_id: i64, tp_id: i64) -> Result<Entrega> {
    if let Some(entrega) = storage.get_entrega_by_alumno_and_tp(alumno_id, tp_id).await? {
        return Ok(entrega);
    }

    let entrega = storage
        .create_entrega(CreateEntregaRequest {
            alumno_id,
            tp_id,
            fecha_hora: None,
            nota: None,
            devolucion: None,
        })
        .await?;
    notifier::best_effort(
        "entrega created",
        notifier::on_entrega_created(storage, &entrega),
    )
    .await;

    Ok(entrega)
}

/// 落盘并登记附件；登记失败时删除刚写入的文件
pub(crate) async fn register_upload(
    storage: &dyn Storage,
    upload_dir: &Path,
    alumno_id: i64,
    tp_id: i64,
    file: UploadedFile,
) -> Result<EntregaUploadResponse> {
    check_tp_for_upload(storage, alumno_id, tp_id).await?;
    let entrega = entrega_for_upload(storage, alumno_id, tp_id).await?;

    tokio::fs::create_dir_all(upload_dir).await?;
    let filename = format!(
        "{}_{}_{}{}",
        entrega.id,
        Utc::now().timestamp(),
        Uuid::new_v4().simple(),
        file.extension
    );
    let file_path = upload_dir.join(&filename).to_string_lossy().into_owned();
    tokio::fs::write(&file_path, &file.data).await?;

    let archivo = storage
        .create_archivo(NewArchivo {
            entrega_id: entrega.id,
            filename,
            original_name: file.original_name,
            file_path: file_path.clone(),
            content_type: content_type_for(&file.extension).to_string(),
            size: file.data.len() as i64,
        })
        .await;

    match archivo {
        Ok(archivo) => Ok(EntregaUploadResponse { entrega, archivo }),
        Err(e) => {
            remove_stored_file(&file_path).await;
            Err(e)
        }
    }
}

pub async fn handle_upload(
    service: &EntregaService,
    tp_id: i64,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let config = AppConfig::get();

    let upload = &config.upload;
    let file = match read_upload(&mut payload, &upload.allowed_types, upload.max_size).await {
        Ok(file) => file,
        Err(rejected) => {
            tracing::debug!("Upload rejected for alumno {}: {:?}", identity.subject_id, rejected);
            return Ok(rejected.to_http_response());
        }
    };

    let storage = service.get_storage(request);

    match register_upload(
        storage.as_ref(),
        Path::new(&config.upload.dir),
        identity.subject_id,
        tp_id,
        file,
    )
    .await
    {
        Ok(response) => {
            tracing::info!(
                "Alumno {} uploaded archivo {} for TP {}",
                identity.subject_id,
                response.archivo.id,
                tp_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                response,
                "Archivo subido correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tps::requests::CreateTpRequest;
    use crate::test_support;
    use actix_web::http::StatusCode;
    use chrono::Duration;

    fn pdf() -> UploadedFile {
        UploadedFile {
            original_name: "informe.pdf".into(),
            extension: ".pdf".into(),
            data: b"%PDF-1.7 contenido".to_vec(),
        }
    }

    #[actix_web::test]
    async fn test_upload_reuses_entrega_and_writes_file() {
        let storage = test_support::storage().await;
        let dir = tempfile::tempdir().unwrap();
        let materia = test_support::seed_materia(&storage, "Física II").await;
        let comision = test_support::seed_comision(&storage, materia.id, "F2").await;
        let alumno = test_support::seed_alumno(&storage, "up@uni.edu", "U-1").await;
        test_support::enroll(&storage, alumno.id, comision.id).await;
        let tp = storage
            .create_tp(CreateTpRequest {
                consigna: "Informe de laboratorio".into(),
                fecha_entrega: Utc::now() + Duration::days(2),
                vigente: Some(true),
                comision_id: comision.id,
            })
            .await
            .unwrap();

        let first = register_upload(storage.as_ref(), dir.path(), alumno.id, tp.id, pdf())
            .await
            .unwrap();
        let second = register_upload(storage.as_ref(), dir.path(), alumno.id, tp.id, pdf())
            .await
            .unwrap();

        assert_eq!(first.entrega.id, second.entrega.id);
        assert_eq!(first.archivo.content_type, "application/pdf");
        assert!(first.archivo.filename.starts_with(&format!("{}_", first.entrega.id)));
        assert!(Path::new(&first.archivo.file_path).exists());
        assert_eq!(
            storage
                .list_archivos_by_entrega(first.entrega.id)
                .await
                .unwrap()
                .len(),
            2
        );
        // 只有首次创建提交时通知
        assert_eq!(test_support::notificaciones_de(&storage, alumno.id).await.len(), 1);
    }

    #[actix_web::test]
    async fn test_upload_rejected_outside_own_comisiones() {
        let storage = test_support::storage().await;
        let dir = tempfile::tempdir().unwrap();
        let materia = test_support::seed_materia(&storage, "Física II").await;
        let comision = test_support::seed_comision(&storage, materia.id, "F2").await;
        let alumno = test_support::seed_alumno(&storage, "out@uni.edu", "O-1").await;
        let tp = storage
            .create_tp(CreateTpRequest {
                consigna: "Informe".into(),
                fecha_entrega: Utc::now(),
                vigente: Some(true),
                comision_id: comision.id,
            })
            .await
            .unwrap();

        let err = register_upload(storage.as_ref(), dir.path(), alumno.id, tp.id, pdf())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "el TP no pertenece a ninguna de tus comisiones");
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
