use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluacionService;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    evaluaciones::{entities::Evaluacion, requests::CreateEvaluacionRequest},
};
use crate::services::comisiones::ensure_comision_exists;
use crate::services::notificaciones::notifier;
use crate::storage::Storage;
use crate::utils::validate::{validate_fecha_evaluacion, validate_required};

pub(crate) async fn apply_create(
    storage: &dyn Storage,
    req: CreateEvaluacionRequest,
) -> Result<Evaluacion> {
    validate_fecha_evaluacion(&req.fecha_evaluacion)?;
    validate_required("temas", &req.temas)?;
    ensure_comision_exists(storage, req.comision_id).await?;

    let evaluacion = storage.create_evaluacion(req).await?;
    notifier::best_effort(
        "evaluacion created",
        notifier::on_evaluacion_created(storage, &evaluacion),
    )
    .await;

    Ok(evaluacion)
}

pub async fn create_evaluacion(
    service: &EvaluacionService,
    req: CreateEvaluacionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_create(storage.as_ref(), req).await {
        Ok(evaluacion) => {
            tracing::info!(
                "Evaluacion {} scheduled for comision {}",
                evaluacion.id,
                evaluacion.comision_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                evaluacion,
                "Evaluación creada correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn evaluacion(fecha: &str, comision_id: i64) -> CreateEvaluacionRequest {
        CreateEvaluacionRequest {
            fecha_evaluacion: fecha.into(),
            temas: "Árboles y grafos".into(),
            observaciones: None,
            comision_id,
        }
    }

    #[actix_web::test]
    async fn test_invalid_date_rejected() {
        let storage = test_support::storage().await;
        let err = apply_create(storage.as_ref(), evaluacion("15/06/2025", 1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");
        assert_eq!(err.status_code(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_create_notifies_comision() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Estructuras").await;
        let comision = test_support::seed_comision(&storage, materia.id, "E1").await;
        let alumno = test_support::seed_alumno(&storage, "e@uni.edu", "E-9").await;
        test_support::enroll(&storage, alumno.id, comision.id).await;

        apply_create(storage.as_ref(), evaluacion("2025-06-15", comision.id))
            .await
            .unwrap();

        let mensajes = test_support::notificaciones_de(&storage, alumno.id).await;
        assert_eq!(
            mensajes,
            vec![
                "Nueva evaluación programada para la materia Estructuras (Comisión: E1) \
                 el 2025-06-15. Temas: Árboles y grafos"
                    .to_string()
            ]
        );
    }
}
