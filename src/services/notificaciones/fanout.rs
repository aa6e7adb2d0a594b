//! 通知群发
//!
//! 把学生集合展开为通知行并一次性批量写入；同时提供已读状态与归属校验。

use std::collections::BTreeSet;

use chrono::Utc;

use crate::errors::{Result, TrackError};
use crate::models::auth::Identity;
use crate::models::notificaciones::{
    entities::{NewNotificacion, Notificacion},
    responses::NotificacionDetailResponse,
};
use crate::storage::Storage;

/// 给一组学生各发一条通知，重复 ID 只写一次，返回写入条数
pub(crate) async fn notify_students(
    storage: &dyn Storage,
    alumno_ids: &[i64],
    mensaje: &str,
) -> Result<u64> {
    let unique: BTreeSet<i64> = alumno_ids.iter().copied().collect();
    if unique.is_empty() {
        return Ok(0);
    }

    let fecha_hora = Utc::now();
    let rows = unique
        .into_iter()
        .map(|alumno_id| NewNotificacion {
            alumno_id,
            mensaje: mensaje.to_string(),
            fecha_hora,
        })
        .collect();

    storage.create_notificaciones(rows).await
}

/// 给单个学生发通知
pub(crate) async fn notify_student(
    storage: &dyn Storage,
    alumno_id: i64,
    mensaje: &str,
) -> Result<Notificacion> {
    storage
        .create_notificacion(NewNotificacion {
            alumno_id,
            mensaje: mensaje.to_string(),
            fecha_hora: Utc::now(),
        })
        .await
}

/// 通知选修该课程任一分组的全部学生
pub(crate) async fn notify_by_materia(
    storage: &dyn Storage,
    materia_id: i64,
    mensaje: &str,
) -> Result<u64> {
    let alumno_ids = storage.list_alumno_ids_by_materia(materia_id).await?;
    notify_students(storage, &alumno_ids, mensaje).await
}

/// 通知选修该分组的全部学生
pub(crate) async fn notify_by_comision(
    storage: &dyn Storage,
    comision_id: i64,
    mensaje: &str,
) -> Result<u64> {
    let alumno_ids = storage.list_alumno_ids_by_comision(comision_id).await?;
    notify_students(storage, &alumno_ids, mensaje).await
}

pub(crate) async fn get_notificacion(storage: &dyn Storage, id: i64) -> Result<Notificacion> {
    storage
        .get_notificacion_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("notificación no encontrada"))
}

/// 标记已读；已读的通知直接视为成功
pub(crate) async fn mark_read(storage: &dyn Storage, id: i64) -> Result<Notificacion> {
    storage.mark_notificacion_read(id).await?;
    get_notificacion(storage, id).await
}

/// 读取通知并校验调用方是否为其所属学生
pub(crate) async fn get_owned(
    storage: &dyn Storage,
    identity: &Identity,
    id: i64,
) -> Result<Notificacion> {
    let notificacion = get_notificacion(storage, id).await?;
    identity.ensure_owns(notificacion.alumno_id, "esta notificación")?;
    Ok(notificacion)
}

/// 通知连同所属学生
pub(crate) async fn load_detail(
    storage: &dyn Storage,
    notificacion: Notificacion,
) -> Result<NotificacionDetailResponse> {
    storage
        .load_notificacion_details(vec![notificacion])
        .await?
        .pop()
        .ok_or_else(|| TrackError::not_found("notificación no encontrada"))
}

// alumno_id 为 None 时列出全部；leida 只在按学生列出时生效
pub(crate) async fn list_details(
    storage: &dyn Storage,
    alumno_id: Option<i64>,
    leida: Option<bool>,
) -> Result<Vec<NotificacionDetailResponse>> {
    let notificaciones = match alumno_id {
        Some(alumno_id) => storage.list_notificaciones_by_alumno(alumno_id, leida).await?,
        None => storage.list_notificaciones().await?,
    };
    storage.load_notificacion_details(notificaciones).await
}

pub(crate) async fn mark_read_owned(
    storage: &dyn Storage,
    identity: &Identity,
    id: i64,
) -> Result<Notificacion> {
    get_owned(storage, identity, id).await?;
    mark_read(storage, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;
    use crate::test_support;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_materia_fanout_counts_each_student_once() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Sistemas Operativos").await;
        let c1 = test_support::seed_comision(&storage, materia.id, "S1").await;
        let c2 = test_support::seed_comision(&storage, materia.id, "S2").await;

        let mut alumnos = Vec::new();
        for i in 0..3 {
            let alumno =
                test_support::seed_alumno(&storage, &format!("a{i}@uni.edu"), &format!("L{i}"))
                    .await;
            test_support::enroll(&storage, alumno.id, c1.id).await;
            alumnos.push(alumno);
        }
        // 同一学生也在第二个分组
        test_support::enroll(&storage, alumnos[0].id, c2.id).await;

        let count = notify_by_materia(storage.as_ref(), materia.id, "Clase suspendida")
            .await
            .unwrap();
        assert_eq!(count, 3);

        for alumno in &alumnos {
            let rows = storage
                .list_notificaciones_by_alumno(alumno.id, Some(false))
                .await
                .unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].mensaje, "Clase suspendida");
        }
    }

    #[actix_web::test]
    async fn test_empty_comision_notifies_nobody() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Redes").await;
        let vacia = test_support::seed_comision(&storage, materia.id, "R9").await;

        let count = notify_by_comision(storage.as_ref(), vacia.id, "Hola")
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert!(storage.list_notificaciones().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_duplicate_ids_are_collapsed() {
        let storage = test_support::storage().await;
        let ana = test_support::seed_alumno(&storage, "ana@uni.edu", "A-1").await;

        let count = notify_students(storage.as_ref(), &[ana.id, ana.id], "Aviso")
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(notify_students(storage.as_ref(), &[], "Aviso").await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_mark_read_twice_succeeds() {
        let storage = test_support::storage().await;
        let ana = test_support::seed_alumno(&storage, "ana@uni.edu", "A-1").await;
        let n = notify_student(storage.as_ref(), ana.id, "Aviso").await.unwrap();

        assert!(mark_read(storage.as_ref(), n.id).await.unwrap().leida);
        assert!(mark_read(storage.as_ref(), n.id).await.unwrap().leida);

        let rows = storage.list_notificaciones_by_alumno(ana.id, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].leida);

        let err = mark_read(storage.as_ref(), n.id + 100).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_foreign_notification_is_forbidden() {
        let storage = test_support::storage().await;
        let ana = test_support::seed_alumno(&storage, "ana@uni.edu", "A-1").await;
        let luis = test_support::seed_alumno(&storage, "luis@uni.edu", "A-2").await;
        let n = notify_student(storage.as_ref(), ana.id, "Privado").await.unwrap();

        let intruso = Identity::new(luis.id, Role::Alumno);
        let err = get_owned(storage.as_ref(), &intruso, n.id).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        let err = mark_read_owned(storage.as_ref(), &intruso, n.id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        // 未被他人改为已读
        assert!(!get_notificacion(storage.as_ref(), n.id).await.unwrap().leida);

        let duena = Identity::new(ana.id, Role::Alumno);
        assert_eq!(
            get_owned(storage.as_ref(), &duena, n.id).await.unwrap().mensaje,
            "Privado"
        );
    }

    #[actix_web::test]
    async fn test_details_carry_alumno() {
        let storage = test_support::storage().await;
        let ana = test_support::seed_alumno(&storage, "ana@uni.edu", "A-1").await;
        let luis = test_support::seed_alumno(&storage, "luis@uni.edu", "A-2").await;
        let n = notify_student(storage.as_ref(), ana.id, "Aviso").await.unwrap();
        notify_student(storage.as_ref(), luis.id, "Otro").await.unwrap();

        let detail = load_detail(storage.as_ref(), n).await.unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["mensaje"], "Aviso");
        assert_eq!(json["alumno"]["email"], "ana@uni.edu");
        assert_eq!(json["alumno"]["legajo"], "A-1");

        let todas = list_details(storage.as_ref(), None, None).await.unwrap();
        assert_eq!(todas.len(), 2);
        assert!(todas.iter().all(|d| d.alumno.is_some()));

        let de_luis = list_details(storage.as_ref(), Some(luis.id), Some(false))
            .await
            .unwrap();
        assert_eq!(de_luis.len(), 1);
        assert_eq!(de_luis[0].alumno.as_ref().unwrap().email, "luis@uni.edu");
    }
}
