use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluacionService;
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    evaluaciones::{entities::Evaluacion, requests::UpdateEvaluacionRequest},
};
use crate::services::comisiones::ensure_comision_exists;
use crate::services::notificaciones::notifier;
use crate::storage::Storage;
use crate::utils::validate::{validate_fecha_evaluacion, validate_required};

pub(crate) async fn apply_update(
    storage: &dyn Storage,
    id: i64,
    update: UpdateEvaluacionRequest,
) -> Result<Evaluacion> {
    if let Some(fecha) = &update.fecha_evaluacion {
        validate_fecha_evaluacion(fecha)?;
    }
    if let Some(temas) = &update.temas {
        validate_required("temas", temas)?;
    }
    if let Some(comision_id) = update.comision_id {
        ensure_comision_exists(storage, comision_id).await?;
    }

    let before = storage
        .get_evaluacion_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("evaluación no encontrada"))?;

    let after = storage
        .update_evaluacion(id, update)
        .await?
        .ok_or_else(|| TrackError::not_found("evaluación no encontrada"))?;

    notifier::best_effort(
        "evaluacion updated",
        notifier::on_evaluacion_updated(storage, &before, &after),
    )
    .await;

    Ok(after)
}

pub async fn update_evaluacion(
    service: &EvaluacionService,
    id: i64,
    update: UpdateEvaluacionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_update(storage.as_ref(), id, update).await {
        Ok(evaluacion) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluacion,
            "Evaluación actualizada correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluaciones::requests::CreateEvaluacionRequest;
    use crate::services::notificaciones::notifier::EVALUACION_REASIGNADA;
    use crate::test_support;

    #[actix_web::test]
    async fn test_observaciones_change_notifies_and_move_reassigns() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Análisis").await;
        let a = test_support::seed_comision(&storage, materia.id, "A").await;
        let b = test_support::seed_comision(&storage, materia.id, "B").await;
        let en_a = test_support::seed_alumno(&storage, "ea@uni.edu", "EA-1").await;
        let en_b = test_support::seed_alumno(&storage, "eb@uni.edu", "EB-1").await;
        test_support::enroll(&storage, en_a.id, a.id).await;
        test_support::enroll(&storage, en_b.id, b.id).await;

        let evaluacion = storage
            .create_evaluacion(CreateEvaluacionRequest {
                fecha_evaluacion: "2025-07-01".into(),
                temas: "Límites".into(),
                observaciones: None,
                comision_id: a.id,
            })
            .await
            .unwrap();

        apply_update(
            storage.as_ref(),
            evaluacion.id,
            UpdateEvaluacionRequest {
                observaciones: Some("Traer calculadora".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(test_support::notificaciones_de(&storage, en_a.id).await.len(), 1);

        apply_update(
            storage.as_ref(),
            evaluacion.id,
            UpdateEvaluacionRequest {
                comision_id: Some(b.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let mensajes_a = test_support::notificaciones_de(&storage, en_a.id).await;
        assert_eq!(mensajes_a.len(), 2);
        assert!(mensajes_a.contains(&EVALUACION_REASIGNADA.to_string()));
        let mensajes_b = test_support::notificaciones_de(&storage, en_b.id).await;
        assert_eq!(mensajes_b.len(), 1);
        assert!(mensajes_b[0].contains("Temas: Límites"));
    }
}
