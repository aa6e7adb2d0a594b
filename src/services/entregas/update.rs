use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EntregaService, ensure_tp_exists};
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    entregas::{entities::Entrega, requests::UpdateEntregaRequest},
};
use crate::services::notificaciones::notifier;
use crate::services::usuarios::ensure_alumno_exists;
use crate::storage::Storage;
use crate::utils::validate::validate_nota;

/// 部分更新提交；评分或评语变化时通知学生
pub(crate) async fn apply_update(
    storage: &dyn Storage,
    id: i64,
    update: UpdateEntregaRequest,
) -> Result<Entrega> {
    if let Some(nota) = update.nota {
        validate_nota(nota)?;
    }
    if let Some(alumno_id) = update.alumno_id {
        ensure_alumno_exists(storage, alumno_id).await?;
    }
    if let Some(tp_id) = update.tp_id {
        ensure_tp_exists(storage, tp_id).await?;
    }

    let before = storage
        .get_entrega_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("entrega no encontrada"))?;

    let after = storage
        .update_entrega(id, update)
        .await?
        .ok_or_else(|| TrackError::not_found("entrega no encontrada"))?;

    notifier::best_effort(
        "entrega updated",
        notifier::on_entrega_updated(storage, &before, &after),
    )
    .await;

    Ok(after)
}

pub async fn update_entrega(
    service: &EntregaService,
    id: i64,
    update: UpdateEntregaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_update(storage.as_ref(), id, update).await {
        Ok(entrega) => {
            tracing::info!("Entrega {} updated", entrega.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                entrega,
                "Entrega actualizada correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entregas::requests::CreateEntregaRequest;
    use crate::models::tps::requests::CreateTpRequest;
    use crate::test_support;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    async fn graded_entrega(storage: &Arc<dyn Storage>) -> Entrega {
        let materia = test_support::seed_materia(storage, "Paradigmas").await;
        let comision = test_support::seed_comision(storage, materia.id, "K2").await;
        let alumno = test_support::seed_alumno(storage, "g@uni.edu", "G-1").await;
        let tp = storage
            .create_tp(CreateTpRequest {
                consigna: "Haskell".into(),
                fecha_entrega: Utc::now() + Duration::days(1),
                vigente: Some(true),
                comision_id: comision.id,
            })
            .await
            .unwrap();

        storage
            .create_entrega(CreateEntregaRequest {
                alumno_id: alumno.id,
                tp_id: tp.id,
                fecha_hora: None,
                nota: Some(7.0),
                devolucion: None,
            })
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_grade_change_notifies_once() {
        let storage = test_support::storage().await;
        let entrega = graded_entrega(&storage).await;

        let updated = apply_update(
            storage.as_ref(),
            entrega.id,
            UpdateEntregaRequest {
                nota: Some(8.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.nota, Some(8.0));

        let mensajes = test_support::notificaciones_de(&storage, entrega.alumno_id).await;
        assert_eq!(mensajes.len(), 1);
        assert!(mensajes[0].contains("8.00"));
        assert!(mensajes[0].contains("Paradigmas (Comisión: K2)"));
    }

    #[actix_web::test]
    async fn test_fecha_hora_only_is_silent() {
        let storage = test_support::storage().await;
        let entrega = graded_entrega(&storage).await;

        apply_update(
            storage.as_ref(),
            entrega.id,
            UpdateEntregaRequest {
                fecha_hora: Some(Utc::now() - Duration::hours(2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(test_support::notificaciones_de(&storage, entrega.alumno_id).await.is_empty());
    }

    #[actix_web::test]
    async fn test_grade_and_feedback_notify_separately() {
        let storage = test_support::storage().await;
        let entrega = graded_entrega(&storage).await;

        apply_update(
            storage.as_ref(),
            entrega.id,
            UpdateEntregaRequest {
                nota: Some(9.0),
                devolucion: Some("Muy prolijo".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(test_support::notificaciones_de(&storage, entrega.alumno_id).await.len(), 2);
    }

    #[actix_web::test]
    async fn test_invalid_nota_rejected_before_store() {
        let storage = test_support::storage().await;
        let err = apply_update(
            storage.as_ref(),
            1,
            UpdateEntregaRequest {
                nota: Some(-1.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), "la nota debe estar entre 0 y 10");
    }
}
