use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{NotificacionService, fanout};
use crate::errors::{Result, TrackError};
use crate::models::ApiResponse;
use crate::models::notificaciones::{
    requests::{NotifyComisionRequest, NotifyMateriaRequest},
    responses::NotifyResponse,
};
use crate::storage::Storage;
use crate::utils::validate::validate_required;

pub(crate) async fn apply_notify_materia(
    storage: &dyn Storage,
    req: &NotifyMateriaRequest,
) -> Result<u64> {
    validate_required("mensaje", &req.mensaje)?;
    if storage.get_materia_by_id(req.materia_id).await?.is_none() {
        return Err(TrackError::not_found("materia no encontrada"));
    }
    fanout::notify_by_materia(storage, req.materia_id, &req.mensaje).await
}

pub(crate) async fn apply_notify_comision(
    storage: &dyn Storage,
    req: &NotifyComisionRequest,
) -> Result<u64> {
    validate_required("mensaje", &req.mensaje)?;
    if storage.get_comision_by_id(req.comision_id).await?.is_none() {
        return Err(TrackError::not_found("comisión no encontrada"));
    }
    fanout::notify_by_comision(storage, req.comision_id, &req.mensaje).await
}

pub async fn notify_materia(
    service: &NotificacionService,
    request: &HttpRequest,
    req: NotifyMateriaRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_notify_materia(storage.as_ref(), &req).await {
        Ok(alumnos_notificados) => {
            info!(
                "Materia {} broadcast reached {} alumno(s)",
                req.materia_id, alumnos_notificados
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                NotifyResponse {
                    alumnos_notificados,
                },
                "Notificaciones enviadas correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn notify_comision(
    service: &NotificacionService,
    request: &HttpRequest,
    req: NotifyComisionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_notify_comision(storage.as_ref(), &req).await {
        Ok(alumnos_notificados) => {
            info!(
                "Comision {} broadcast reached {} alumno(s)",
                req.comision_id, alumnos_notificados
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                NotifyResponse {
                    alumnos_notificados,
                },
                "Notificaciones enviadas correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_unknown_target_is_not_found() {
        let storage = test_support::storage().await;
        let err = apply_notify_materia(
            storage.as_ref(),
            &NotifyMateriaRequest {
                materia_id: 77,
                mensaje: "Hola".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_comision_broadcast_counts_enrolled() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Física I").await;
        let comision = test_support::seed_comision(&storage, materia.id, "F1").await;
        for i in 0..2 {
            let alumno =
                test_support::seed_alumno(&storage, &format!("f{i}@uni.edu"), &format!("F-{i}"))
                    .await;
            test_support::enroll(&storage, alumno.id, comision.id).await;
        }

        let count = apply_notify_comision(
            storage.as_ref(),
            &NotifyComisionRequest {
                comision_id: comision.id,
                mensaje: "Parcial reprogramado".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(count, 2);
    }
}
