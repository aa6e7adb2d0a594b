use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TpService;
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    tps::{entities::Tp, requests::UpdateTpRequest},
};
use crate::services::comisiones::ensure_comision_exists;
use crate::services::notificaciones::notifier;
use crate::storage::Storage;
use crate::utils::validate::validate_required;

/// 部分更新 TP，写入成功后按前后差异通知学生
pub(crate) async fn apply_update(
    storage: &dyn Storage,
    id: i64,
    update: UpdateTpRequest,
) -> Result<Tp> {
    if let Some(consigna) = &update.consigna {
        validate_required("consigna", consigna)?;
    }
    if let Some(comision_id) = update.comision_id {
        ensure_comision_exists(storage, comision_id).await?;
    }

    let before = storage
        .get_tp_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("trabajo práctico no encontrado"))?;

    let after = storage
        .update_tp(id, update)
        .await?
        .ok_or_else(|| TrackError::not_found("trabajo práctico no encontrado"))?;

    notifier::best_effort("tp updated", notifier::on_tp_updated(storage, &before, &after)).await;

    Ok(after)
}

pub async fn update_tp(
    service: &TpService,
    id: i64,
    update: UpdateTpRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_update(storage.as_ref(), id, update).await {
        Ok(tp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            tp,
            "Trabajo práctico actualizado correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tps::requests::CreateTpRequest;
    use crate::services::notificaciones::notifier::TP_REASIGNADO;
    use crate::test_support::{self, FailingNotificaciones};
    use chrono::{Duration, Utc};

    #[actix_web::test]
    async fn test_reassignment_notifies_both_comisiones() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Redes").await;
        let a = test_support::seed_comision(&storage, materia.id, "A").await;
        let b = test_support::seed_comision(&storage, materia.id, "B").await;

        let mut en_a = Vec::new();
        for i in 0..3 {
            let alumno =
                test_support::seed_alumno(&storage, &format!("a{i}@uni.edu"), &format!("RA-{i}"))
                    .await;
            test_support::enroll(&storage, alumno.id, a.id).await;
            en_a.push(alumno.id);
        }
        let mut en_b = Vec::new();
        for i in 0..2 {
            let alumno =
                test_support::seed_alumno(&storage, &format!("b{i}@uni.edu"), &format!("RB-{i}"))
                    .await;
            test_support::enroll(&storage, alumno.id, b.id).await;
            en_b.push(alumno.id);
        }

        // 直接经由存储层创建，避免创建通知干扰计数
        let tp = storage
            .create_tp(CreateTpRequest {
                consigna: "Sockets".into(),
                fecha_entrega: Utc::now() + Duration::days(3),
                vigente: Some(true),
                comision_id: a.id,
            })
            .await
            .unwrap();

        let moved = apply_update(
            storage.as_ref(),
            tp.id,
            UpdateTpRequest {
                comision_id: Some(b.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(moved.comision_id, b.id);

        let mut total = 0;
        for id in &en_a {
            let mensajes = test_support::notificaciones_de(&storage, *id).await;
            assert_eq!(mensajes, vec![TP_REASIGNADO.to_string()]);
            total += mensajes.len();
        }
        for id in &en_b {
            let mensajes = test_support::notificaciones_de(&storage, *id).await;
            assert_eq!(mensajes.len(), 1);
            assert!(
                mensajes[0]
                    .starts_with("Actualización de trabajo práctico para Redes (Comisión: B)")
            );
            total += mensajes.len();
        }
        assert_eq!(total, 5);
    }

    #[actix_web::test]
    async fn test_unchanged_content_is_silent() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Redes").await;
        let comision = test_support::seed_comision(&storage, materia.id, "A").await;
        let alumno = test_support::seed_alumno(&storage, "x@uni.edu", "X-1").await;
        test_support::enroll(&storage, alumno.id, comision.id).await;

        let tp = storage
            .create_tp(CreateTpRequest {
                consigna: "Sockets".into(),
                fecha_entrega: Utc::now() + Duration::days(3),
                vigente: Some(true),
                comision_id: comision.id,
            })
            .await
            .unwrap();

        apply_update(
            storage.as_ref(),
            tp.id,
            UpdateTpRequest {
                consigna: Some("Sockets".into()),
                comision_id: Some(comision.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(test_support::notificaciones_de(&storage, alumno.id).await.is_empty());

        apply_update(
            storage.as_ref(),
            tp.id,
            UpdateTpRequest {
                vigente: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(test_support::notificaciones_de(&storage, alumno.id).await.len(), 1);
    }

    #[actix_web::test]
    async fn test_update_succeeds_when_notifications_fail() {
        let base = test_support::storage().await;
        let materia = test_support::seed_materia(&base, "Redes").await;
        let comision = test_support::seed_comision(&base, materia.id, "A").await;
        let alumno = test_support::seed_alumno(&base, "x@uni.edu", "X-1").await;
        test_support::enroll(&base, alumno.id, comision.id).await;

        let tp = base
            .create_tp(CreateTpRequest {
                consigna: "Sockets".into(),
                fecha_entrega: Utc::now() + Duration::days(3),
                vigente: Some(true),
                comision_id: comision.id,
            })
            .await
            .unwrap();

        let storage = FailingNotificaciones::wrap(base.clone(), usize::MAX);
        let updated = apply_update(
            storage.as_ref(),
            tp.id,
            UpdateTpRequest {
                consigna: Some("Sockets UDP".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.consigna, "Sockets UDP");

        let stored = base.get_tp_by_id(tp.id).await.unwrap().unwrap();
        assert_eq!(stored.consigna, "Sockets UDP");
        assert!(test_support::notificaciones_de(&base, alumno.id).await.is_empty());
    }
}
