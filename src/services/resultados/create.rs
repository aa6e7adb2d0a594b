use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResultadoService, ensure_evaluacion_exists};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    resultados::{entities::ResultadoEvaluacion, requests::CreateResultadoRequest},
};
use crate::services::notificaciones::notifier;
use crate::services::usuarios::ensure_alumno_exists;
use crate::storage::Storage;
use crate::utils::validate::validate_nota;

pub(crate) async fn apply_create(
    storage: &dyn Storage,
    req: CreateResultadoRequest,
) -> Result<ResultadoEvaluacion> {
    validate_nota(req.nota)?;
    ensure_alumno_exists(storage, req.alumno_id).await?;
    ensure_evaluacion_exists(storage, req.evaluacion_id).await?;

    let resultado = storage.create_resultado(req).await?;
    notifier::best_effort(
        "resultado created",
        notifier::on_resultado_created(storage, &resultado),
    )
    .await;

    Ok(resultado)
}

pub async fn create_resultado(
    service: &ResultadoService,
    req: CreateResultadoRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_create(storage.as_ref(), req).await {
        Ok(resultado) => {
            tracing::info!(
                "Resultado {} recorded for alumno {}",
                resultado.id,
                resultado.alumno_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                resultado,
                "Resultado registrado correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluaciones::requests::CreateEvaluacionRequest;
    use crate::test_support;

    #[actix_web::test]
    async fn test_resultado_round_trip() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Lógica").await;
        let comision = test_support::seed_comision(&storage, materia.id, "L1").await;
        let alumno = test_support::seed_alumno(&storage, "r@uni.edu", "R-1").await;
        let evaluacion = storage
            .create_evaluacion(CreateEvaluacionRequest {
                fecha_evaluacion: "2025-09-10".into(),
                temas: "Deducción natural".into(),
                observaciones: None,
                comision_id: comision.id,
            })
            .await
            .unwrap();

        let created = apply_create(
            storage.as_ref(),
            CreateResultadoRequest {
                nota: 9.5,
                devolucion: Some("Excelente".into()),
                alumno_id: alumno.id,
                evaluacion_id: evaluacion.id,
            },
        )
        .await
        .unwrap();

        let leido = storage.get_resultado_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(leido.nota, 9.5);
        assert_eq!(leido.devolucion.as_deref(), Some("Excelente"));

        let mensajes = test_support::notificaciones_de(&storage, alumno.id).await;
        assert_eq!(
            mensajes,
            vec!["Resultado de evaluación disponible para Lógica - Nota: 9.50".to_string()]
        );
    }

    #[actix_web::test]
    async fn test_nota_range_and_references() {
        let storage = test_support::storage().await;
        let err = apply_create(
            storage.as_ref(),
            CreateResultadoRequest {
                nota: 10.5,
                devolucion: None,
                alumno_id: 1,
                evaluacion_id: 1,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), "la nota debe estar entre 0 y 10");

        let alumno = test_support::seed_alumno(&storage, "s@uni.edu", "S-1").await;
        let err = apply_create(
            storage.as_ref(),
            CreateResultadoRequest {
                nota: 6.0,
                devolucion: None,
                alumno_id: alumno.id,
                evaluacion_id: 404,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), "la evaluación especificada no existe");
    }
}
