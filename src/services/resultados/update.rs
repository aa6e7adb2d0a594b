use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResultadoService, ensure_evaluacion_exists};
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    resultados::{entities::ResultadoEvaluacion, requests::UpdateResultadoRequest},
};
use crate::services::notificaciones::notifier;
use crate::services::usuarios::ensure_alumno_exists;
use crate::storage::Storage;
use crate::utils::validate::validate_nota;

pub(crate) async fn apply_update(
    storage: &dyn Storage,
    id: i64,
    update: UpdateResultadoRequest,
) -> Result<ResultadoEvaluacion> {
    if let Some(nota) = update.nota {
        validate_nota(nota)?;
    }
    if let Some(alumno_id) = update.alumno_id {
        ensure_alumno_exists(storage, alumno_id).await?;
    }
    if let Some(evaluacion_id) = update.evaluacion_id {
        ensure_evaluacion_exists(storage, evaluacion_id).await?;
    }

    let before = storage
        .get_resultado_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("resultado no encontrado"))?;

    let after = storage
        .update_resultado(id, update)
        .await?
        .ok_or_else(|| TrackError::not_found("resultado no encontrado"))?;

    notifier::best_effort(
        "resultado updated",
        notifier::on_resultado_updated(storage, &before, &after),
    )
    .await;

    Ok(after)
}

pub async fn update_resultado(
    service: &ResultadoService,
    id: i64,
    update: UpdateResultadoRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_update(storage.as_ref(), id, update).await {
        Ok(resultado) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resultado,
            "Resultado actualizado correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluaciones::requests::CreateEvaluacionRequest;
    use crate::models::resultados::requests::CreateResultadoRequest;
    use crate::test_support;

    #[actix_web::test]
    async fn test_same_nota_does_not_notify() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Lógica").await;
        let comision = test_support::seed_comision(&storage, materia.id, "L1").await;
        let alumno = test_support::seed_alumno(&storage, "n@uni.edu", "N-1").await;
        let evaluacion = storage
            .create_evaluacion(CreateEvaluacionRequest {
                fecha_evaluacion: "2025-09-10".into(),
                temas: "Resolución".into(),
                observaciones: None,
                comision_id: comision.id,
            })
            .await
            .unwrap();
        let resultado = storage
            .create_resultado(CreateResultadoRequest {
                nota: 6.0,
                devolucion: None,
                alumno_id: alumno.id,
                evaluacion_id: evaluacion.id,
            })
            .await
            .unwrap();

        apply_update(
            storage.as_ref(),
            resultado.id,
            UpdateResultadoRequest {
                nota: Some(6.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(test_support::notificaciones_de(&storage, alumno.id).await.is_empty());

        apply_update(
            storage.as_ref(),
            resultado.id,
            UpdateResultadoRequest {
                nota: Some(7.5),
                devolucion: Some("Mejoró".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let mensajes = test_support::notificaciones_de(&storage, alumno.id).await;
        assert_eq!(mensajes.len(), 2);
        assert!(mensajes.iter().any(|m| m.ends_with("Nota: 7.50")));
    }
}
