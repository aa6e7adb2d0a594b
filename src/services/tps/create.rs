use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TpService;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    tps::{entities::Tp, requests::CreateTpRequest},
};
use crate::services::comisiones::ensure_comision_exists;
use crate::services::notificaciones::notifier;
use crate::storage::Storage;
use crate::utils::validate::validate_required;

pub(crate) async fn apply_create(storage: &dyn Storage, req: CreateTpRequest) -> Result<Tp> {
    validate_required("consigna", &req.consigna)?;
    ensure_comision_exists(storage, req.comision_id).await?;

    let tp = storage.create_tp(req).await?;
    notifier::best_effort("tp created", notifier::on_tp_created(storage, &tp)).await;

    Ok(tp)
}

pub async fn create_tp(
    service: &TpService,
    req: CreateTpRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_create(storage.as_ref(), req).await {
        Ok(tp) => {
            tracing::info!("TP {} created for comision {}", tp.id, tp.comision_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                tp,
                "Trabajo práctico creado correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use chrono::{Duration, Utc};

    #[actix_web::test]
    async fn test_create_fans_out_to_comision() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Sistemas Operativos").await;
        let comision = test_support::seed_comision(&storage, materia.id, "S2").await;
        let otra = test_support::seed_comision(&storage, materia.id, "S3").await;
        let ana = test_support::seed_alumno(&storage, "ana@uni.edu", "A-1").await;
        let beto = test_support::seed_alumno(&storage, "beto@uni.edu", "B-1").await;
        test_support::enroll(&storage, ana.id, comision.id).await;
        test_support::enroll(&storage, beto.id, otra.id).await;

        let tp = apply_create(
            storage.as_ref(),
            CreateTpRequest {
                consigna: "Implementar un scheduler".into(),
                fecha_entrega: Utc::now() + Duration::days(7),
                vigente: None,
                comision_id: comision.id,
            },
        )
        .await
        .unwrap();
        assert!(tp.vigente);

        let mensajes = test_support::notificaciones_de(&storage, ana.id).await;
        assert_eq!(mensajes.len(), 1);
        assert!(
            mensajes[0].starts_with("Nuevo trabajo práctico disponible para Sistemas Operativos")
        );
        assert!(test_support::notificaciones_de(&storage, beto.id).await.is_empty());
    }

    #[actix_web::test]
    async fn test_blank_consigna_rejected() {
        let storage = test_support::storage().await;
        let err = apply_create(
            storage.as_ref(),
            CreateTpRequest {
                consigna: " ".into(),
                fecha_entrega: Utc::now(),
                vigente: Some(true),
                comision_id: 1,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), "el campo consigna es obligatorio");
    }
}
