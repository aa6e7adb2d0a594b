use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::{NotificacionService, fanout};
use crate::errors::{Result, TrackError};
use crate::models::ApiResponse;
use crate::models::notificaciones::{
    entities::{NewNotificacion, Notificacion},
    requests::{CreateNotificacionRequest, UpdateNotificacionRequest},
    responses::MarkAllReadResponse,
};
use crate::services::usuarios::ensure_alumno_exists;
use crate::storage::Storage;
use crate::utils::validate::validate_required;

pub async fn list_notificaciones(
    service: &NotificacionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match fanout::list_details(storage.as_ref(), None, None).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Notificaciones obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_notificacion(
    service: &NotificacionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let detail = match fanout::get_notificacion(storage.as_ref(), id).await {
        Ok(notificacion) => fanout::load_detail(storage.as_ref(), notificacion).await,
        Err(e) => Err(e),
    };

    match detail {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Notificación obtenida correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

/// 管理员直接创建：leida 固定为 false，fecha_hora 默认为当前时间
pub(crate) async fn apply_create(
    storage: &dyn Storage,
    req: CreateNotificacionRequest,
) -> Result<Notificacion> {
    validate_required("mensaje", &req.mensaje)?;

    ensure_alumno_exists(storage, req.alumno_id).await?;

    storage
        .create_notificacion(NewNotificacion {
            alumno_id: req.alumno_id,
            mensaje: req.mensaje,
            fecha_hora: req.fecha_hora.unwrap_or_else(Utc::now),
        })
        .await
}

pub async fn create_notificacion(
    service: &NotificacionService,
    request: &HttpRequest,
    req: CreateNotificacionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_create(storage.as_ref(), req).await {
        Ok(notificacion) => {
            info!(
                "Notification {} created for alumno {}",
                notificacion.id, notificacion.alumno_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                notificacion,
                "Notificación creada correctamente",
            )))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

pub(crate) async fn apply_update(
    storage: &dyn Storage,
    id: i64,
    update: UpdateNotificacionRequest,
) -> Result<Notificacion> {
    if let Some(mensaje) = &update.mensaje {
        validate_required("mensaje", mensaje)?;
    }
    if let Some(alumno_id) = update.alumno_id {
        ensure_alumno_exists(storage, alumno_id).await?;
    }

    storage
        .update_notificacion(id, update)
        .await?
        .ok_or_else(|| TrackError::not_found("notificación no encontrada"))
}

pub async fn update_notificacion(
    service: &NotificacionService,
    request: &HttpRequest,
    id: i64,
    update: UpdateNotificacionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_update(storage.as_ref(), id, update).await {
        Ok(notificacion) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notificacion,
            "Notificación actualizada correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn delete_notificacion(
    service: &NotificacionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_notificacion(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Notificación eliminada correctamente",
        ))),
        Ok(false) => Ok(TrackError::not_found("notificación no encontrada").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn mark_read(
    service: &NotificacionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match fanout::mark_read(storage.as_ref(), id).await {
        Ok(notificacion) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notificacion,
            "Notificación marcada como leída",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_by_alumno(
    service: &NotificacionService,
    request: &HttpRequest,
    alumno_id: i64,
    leida: Option<bool>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match fanout::list_details(storage.as_ref(), Some(alumno_id), leida).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Notificaciones obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn mark_all_read_by_alumno(
    service: &NotificacionService,
    request: &HttpRequest,
    alumno_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.mark_all_notificaciones_read(alumno_id).await {
        Ok(actualizadas) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { actualizadas },
            "Notificaciones marcadas como leídas",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_admin_create_forces_unread() {
        let storage = test_support::storage().await;
        let ana = test_support::seed_alumno(&storage, "ana@uni.edu", "A-1").await;

        let n = apply_create(
            storage.as_ref(),
            CreateNotificacionRequest {
                alumno_id: ana.id,
                mensaje: "Reunión informativa".into(),
                fecha_hora: None,
            },
        )
        .await
        .unwrap();
        assert!(!n.leida);

        let err = apply_create(
            storage.as_ref(),
            CreateNotificacionRequest {
                alumno_id: ana.id + 50,
                mensaje: "x".into(),
                fecha_hora: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), "el alumno especificado no existe");

        let err = apply_create(
            storage.as_ref(),
            CreateNotificacionRequest {
                alumno_id: ana.id,
                mensaje: "   ".into(),
                fecha_hora: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_update_missing_is_not_found() {
        let storage = test_support::storage().await;
        let err = apply_update(
            storage.as_ref(),
            404,
            UpdateNotificacionRequest {
                leida: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
