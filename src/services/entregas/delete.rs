use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EntregaService;
use super::get::load_entrega;
use crate::errors::{Result, TrackError};
use crate::models::ApiResponse;
use crate::services::archivos::remove_stored_file;
use crate::storage::Storage;

/// 删除提交：先删磁盘文件，再删附件记录与提交本身
pub(crate) async fn apply_delete(storage: &dyn Storage, id: i64) -> Result<()> {
    load_entrega(storage, id).await?;

    for archivo in storage.list_archivos_by_entrega(id).await? {
        remove_stored_file(&archivo.file_path).await;
        storage.delete_archivo(archivo.id).await?;
    }

    if !storage.delete_entrega(id).await? {
        return Err(TrackError::not_found("entrega no encontrada"));
    }
    Ok(())
}

pub async fn delete_entrega(
    service: &EntregaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_delete(storage.as_ref(), id).await {
        Ok(()) => {
            tracing::info!("Entrega {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Entrega eliminada correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entregas::requests::{CreateEntregaRequest, NewArchivo};
    use crate::models::tps::requests::CreateTpRequest;
    use crate::test_support;
    use chrono::Utc;

    #[actix_web::test]
    async fn test_delete_removes_physical_files() {
        let storage = test_support::storage().await;
        let dir = tempfile::tempdir().unwrap();

        let materia = test_support::seed_materia(&storage, "Base de Datos").await;
        let comision = test_support::seed_comision(&storage, materia.id, "BD1").await;
        let alumno = test_support::seed_alumno(&storage, "bd@uni.edu", "BD-1").await;
        let tp = storage
            .create_tp(CreateTpRequest {
                consigna: "Normalización".into(),
                fecha_entrega: Utc::now(),
                vigente: Some(true),
                comision_id: comision.id,
            })
            .await
            .unwrap();
        let entrega = storage
            .create_entrega(CreateEntregaRequest {
                alumno_id: alumno.id,
                tp_id: tp.id,
                fecha_hora: None,
                nota: None,
                devolucion: None,
            })
            .await
            .unwrap();

        let presente = dir.path().join("presente.pdf");
        std::fs::write(&presente, b"%PDF-1.4").unwrap();
        // 第二个附件的磁盘文件已经丢失，不应阻断删除
        let perdido = dir.path().join("perdido.pdf");

        for path in [&presente, &perdido] {
            storage
                .create_archivo(NewArchivo {
                    entrega_id: entrega.id,
                    filename: path.file_name().unwrap().to_string_lossy().into_owned(),
                    original_name: "tp.pdf".into(),
                    file_path: path.to_string_lossy().into_owned(),
                    content_type: "application/pdf".into(),
                    size: 8,
                })
                .await
                .unwrap();
        }

        apply_delete(storage.as_ref(), entrega.id).await.unwrap();

        assert!(!presente.exists());
        assert!(storage.get_entrega_by_id(entrega.id).await.unwrap().is_none());
        assert!(storage.list_archivos_by_entrega(entrega.id).await.unwrap().is_empty());

        let err = apply_delete(storage.as_ref(), entrega.id).await.unwrap_err();
        assert_eq!(err.status_code(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
