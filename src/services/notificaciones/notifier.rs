//! 变更触发的通知
//!
//! 在写操作成功后比较前后两个版本，只有被跟踪的字段发生变化时才通知学生。
//! 通知失败不会影响已经完成的写操作，由 [`best_effort`] 记录日志后吞掉。

use std::future::Future;

use tracing::{debug, warn};

use super::fanout::{notify_by_comision, notify_student};
use crate::errors::{Result, TrackError};
use crate::models::comisiones::entities::ComisionContext;
use crate::models::entregas::entities::Entrega;
use crate::models::evaluaciones::entities::Evaluacion;
use crate::models::resultados::entities::ResultadoEvaluacion;
use crate::models::tps::entities::Tp;
use crate::storage::Storage;

const FECHA_ENTREGA_FORMAT: &str = "%d/%m/%Y %H:%M";

pub(crate) const TP_REASIGNADO: &str = "Un trabajo práctico ha sido reasignado a otra comisión";
pub(crate) const EVALUACION_REASIGNADA: &str = "Una evaluación ha sido reasignada a otra comisión";

/// 执行通知并吞掉错误，返回实际写入的条数
pub(crate) async fn best_effort<F>(evento: &str, notificar: F) -> u64
where
    F: Future<Output = Result<u64>>,
{
    match notificar.await {
        Ok(count) => {
            debug!("{evento}: {count} notification(s) created");
            count
        }
        Err(e) => {
            warn!("{evento}: notification fan-out failed: {e}");
            0
        }
    }
}

/// 改派时两个分组的通知互不阻断，全部尝试后再汇总结果
fn merge_reassignment(previos: Result<u64>, nuevos: Result<u64>) -> Result<u64> {
    match (previos, nuevos) {
        (Ok(previos), Ok(nuevos)) => Ok(previos + nuevos),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(previos), Err(nuevos)) => Err(TrackError::database_operation(format!(
            "comisión anterior: {previos}; comisión nueva: {nuevos}"
        ))),
    }
}

/// 分数是否变化（比较到小数点后两位，与通知展示一致）
fn nota_changed(before: Option<f64>, after: Option<f64>) -> bool {
    match (before, after) {
        (Some(a), Some(b)) => (a * 100.0).round() != (b * 100.0).round(),
        (None, None) => false,
        _ => true,
    }
}

/// 评语是否变化，清空评语不通知
fn devolucion_changed(before: Option<&str>, after: Option<&str>) -> bool {
    match after {
        Some(text) if !text.trim().is_empty() => before != after,
        _ => false,
    }
}

async fn comision_context(storage: &dyn Storage, comision_id: i64) -> Result<ComisionContext> {
    storage
        .get_comision_context(comision_id)
        .await?
        .ok_or_else(|| TrackError::not_found(format!("comisión {comision_id} no encontrada")))
}

async fn tp_context(storage: &dyn Storage, tp_id: i64) -> Result<ComisionContext> {
    let tp = storage
        .get_tp_by_id(tp_id)
        .await?
        .ok_or_else(|| TrackError::not_found(format!("TP {tp_id} no encontrado")))?;
    comision_context(storage, tp.comision_id).await
}

async fn evaluacion_context(storage: &dyn Storage, evaluacion_id: i64) -> Result<ComisionContext> {
    let evaluacion = storage
        .get_evaluacion_by_id(evaluacion_id)
        .await?
        .ok_or_else(|| TrackError::not_found(format!("evaluación {evaluacion_id} no encontrada")))?;
    comision_context(storage, evaluacion.comision_id).await
}

// 文案

fn mensaje_entrega_registrada(ctx: &ComisionContext) -> String {
    format!(
        "Tu entrega para el trabajo práctico de {} (Comisión: {}) ha sido registrada correctamente",
        ctx.materia_nombre, ctx.comision_nombre
    )
}

fn mensaje_entrega_calificada(ctx: &ComisionContext, nota: f64) -> String {
    format!(
        "Tu entrega de TP para {} (Comisión: {}) ha sido calificada - Nota: {:.2}",
        ctx.materia_nombre, ctx.comision_nombre, nota
    )
}

fn mensaje_entrega_devolucion(ctx: &ComisionContext) -> String {
    format!(
        "Nueva devolución disponible para tu entrega de TP de {} (Comisión: {})",
        ctx.materia_nombre, ctx.comision_nombre
    )
}

fn mensaje_tp_nuevo(ctx: &ComisionContext, tp: &Tp) -> String {
    format!(
        "Nuevo trabajo práctico disponible para {} (Comisión: {}). Fecha de entrega: {}",
        ctx.materia_nombre,
        ctx.comision_nombre,
        tp.fecha_entrega.format(FECHA_ENTREGA_FORMAT)
    )
}

fn mensaje_tp_actualizado(ctx: &ComisionContext, tp: &Tp) -> String {
    format!(
        "Actualización de trabajo práctico para {} (Comisión: {}). Fecha de entrega: {}",
        ctx.materia_nombre,
        ctx.comision_nombre,
        tp.fecha_entrega.format(FECHA_ENTREGA_FORMAT)
    )
}

fn mensaje_evaluacion_nueva(ctx: &ComisionContext, evaluacion: &Evaluacion) -> String {
    format!(
        "Nueva evaluación programada para la materia {} (Comisión: {}) el {}. Temas: {}",
        ctx.materia_nombre, ctx.comision_nombre, evaluacion.fecha_evaluacion, evaluacion.temas
    )
}

fn mensaje_evaluacion_actualizada(ctx: &ComisionContext, evaluacion: &Evaluacion) -> String {
    format!(
        "Actualización de evaluación para {} (Comisión: {}) - Fecha: {}. Temas: {}",
        ctx.materia_nombre, ctx.comision_nombre, evaluacion.fecha_evaluacion, evaluacion.temas
    )
}

fn mensaje_resultado_nuevo(ctx: &ComisionContext, nota: f64) -> String {
    format!(
        "Resultado de evaluación disponible para {} - Nota: {:.2}",
        ctx.materia_nombre, nota
    )
}

fn mensaje_resultado_actualizado(ctx: &ComisionContext, nota: f64) -> String {
    format!(
        "Actualización de resultado de evaluación para {} - Nota: {:.2}",
        ctx.materia_nombre, nota
    )
}

fn mensaje_resultado_devolucion(ctx: &ComisionContext) -> String {
    format!(
        "Nueva devolución disponible para tu evaluación de {}",
        ctx.materia_nombre
    )
}

// 提交

pub(crate) async fn on_entrega_created(storage: &dyn Storage, entrega: &Entrega) -> Result<u64> {
    let ctx = tp_context(storage, entrega.tp_id).await?;
    notify_student(storage, entrega.alumno_id, &mensaje_entrega_registrada(&ctx)).await?;
    Ok(1)
}

/// 评分与评语各自独立：两者都变化时发送两条通知
pub(crate) async fn on_entrega_updated(
    storage: &dyn Storage,
    before: &Entrega,
    after: &Entrega,
) -> Result<u64> {
    let nota = after
        .nota
        .filter(|_| nota_changed(before.nota, after.nota));
    let devolucion = devolucion_changed(before.devolucion.as_deref(), after.devolucion.as_deref());

    if nota.is_none() && !devolucion {
        return Ok(0);
    }

    let ctx = tp_context(storage, after.tp_id).await?;
    let mut count = 0;

    if let Some(nota) = nota {
        notify_student(storage, after.alumno_id, &mensaje_entrega_calificada(&ctx, nota)).await?;
        count += 1;
    }
    if devolucion {
        notify_student(storage, after.alumno_id, &mensaje_entrega_devolucion(&ctx)).await?;
        count += 1;
    }

    Ok(count)
}

// TP

pub(crate) async fn on_tp_created(storage: &dyn Storage, tp: &Tp) -> Result<u64> {
    let ctx = comision_context(storage, tp.comision_id).await?;
    notify_by_comision(storage, tp.comision_id, &mensaje_tp_nuevo(&ctx, tp)).await
}

fn tp_content_changed(before: &Tp, after: &Tp) -> bool {
    before.consigna != after.consigna
        || before.fecha_entrega != after.fecha_entrega
        || before.vigente != after.vigente
}

async fn notify_tp_actualizado(storage: &dyn Storage, tp: &Tp) -> Result<u64> {
    let ctx = comision_context(storage, tp.comision_id).await?;
    notify_by_comision(storage, tp.comision_id, &mensaje_tp_actualizado(&ctx, tp)).await
}

/// 分组变化时：原分组收到通用的改派通知，新分组无条件收到完整内容
pub(crate) async fn on_tp_updated(storage: &dyn Storage, before: &Tp, after: &Tp) -> Result<u64> {
    if before.comision_id != after.comision_id {
        let previos = notify_by_comision(storage, before.comision_id, TP_REASIGNADO).await;
        let nuevos = notify_tp_actualizado(storage, after).await;
        return merge_reassignment(previos, nuevos);
    }

    if !tp_content_changed(before, after) {
        return Ok(0);
    }

    notify_tp_actualizado(storage, after).await
}

// 评估

pub(crate) async fn on_evaluacion_created(
    storage: &dyn Storage,
    evaluacion: &Evaluacion,
) -> Result<u64> {
    let ctx = comision_context(storage, evaluacion.comision_id).await?;
    notify_by_comision(
        storage,
        evaluacion.comision_id,
        &mensaje_evaluacion_nueva(&ctx, evaluacion),
    )
    .await
}

fn evaluacion_content_changed(before: &Evaluacion, after: &Evaluacion) -> bool {
    before.fecha_evaluacion != after.fecha_evaluacion
        || before.temas != after.temas
        || before.observaciones != after.observaciones
}

async fn notify_evaluacion_actualizada(
    storage: &dyn Storage,
    evaluacion: &Evaluacion,
) -> Result<u64> {
    let ctx = comision_context(storage, evaluacion.comision_id).await?;
    notify_by_comision(
        storage,
        evaluacion.comision_id,
        &mensaje_evaluacion_actualizada(&ctx, evaluacion),
    )
    .await
}

pub(crate) async fn on_evaluacion_updated(
    storage: &dyn Storage,
    before: &Evaluacion,
    after: &Evaluacion,
) -> Result<u64> {
    if before.comision_id != after.comision_id {
        let previos =
            notify_by_comision(storage, before.comision_id, EVALUACION_REASIGNADA).await;
        let nuevos = notify_evaluacion_actualizada(storage, after).await;
        return merge_reassignment(previos, nuevos);
    }

    if !evaluacion_content_changed(before, after) {
        return Ok(0);
    }

    notify_evaluacion_actualizada(storage, after).await
}

// 评估结果

pub(crate) async fn on_resultado_created(
    storage: &dyn Storage,
    resultado: &ResultadoEvaluacion,
) -> Result<u64> {
    let ctx = evaluacion_context(storage, resultado.evaluacion_id).await?;
    notify_student(
        storage,
        resultado.alumno_id,
        &mensaje_resultado_nuevo(&ctx, resultado.nota),
    )
    .await?;
    Ok(1)
}

pub(crate) async fn on_resultado_updated(
    storage: &dyn Storage,
    before: &ResultadoEvaluacion,
    after: &ResultadoEvaluacion,
) -> Result<u64> {
    let nota = nota_changed(Some(before.nota), Some(after.nota));
    let devolucion = devolucion_changed(before.devolucion.as_deref(), after.devolucion.as_deref());

    if !nota && !devolucion {
        return Ok(0);
    }

    let ctx = evaluacion_context(storage, after.evaluacion_id).await?;
    let mut count = 0;

    if nota {
        notify_student(
            storage,
            after.alumno_id,
            &mensaje_resultado_actualizado(&ctx, after.nota),
        )
        .await?;
        count += 1;
    }
    if devolucion {
        notify_student(storage, after.alumno_id, &mensaje_resultado_devolucion(&ctx)).await?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluaciones::requests::CreateEvaluacionRequest;
    use crate::models::tps::requests::CreateTpRequest;
    use crate::test_support::{self, FailingNotificaciones};
    use chrono::{TimeZone, Utc};

    fn entrega(nota: Option<f64>, devolucion: Option<&str>) -> Entrega {
        let now = Utc::now();
        Entrega {
            id: 1,
            alumno_id: 1,
            tp_id: 1,
            fecha_hora: now,
            nota,
            devolucion: devolucion.map(Into::into),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_nota_change_detection() {
        assert!(nota_changed(Some(7.0), Some(8.0)));
        assert!(nota_changed(None, Some(8.0)));
        assert!(!nota_changed(Some(8.0), Some(8.0)));
        assert!(!nota_changed(Some(8.001), Some(8.0)));
        assert!(!nota_changed(None, None));
    }

    #[test]
    fn test_devolucion_change_detection() {
        assert!(devolucion_changed(None, Some("Bien")));
        assert!(devolucion_changed(Some("Bien"), Some("Muy bien")));
        assert!(!devolucion_changed(Some("Bien"), Some("Bien")));
        assert!(!devolucion_changed(Some("Bien"), None));
        assert!(!devolucion_changed(None, Some("  ")));
    }

    #[test]
    fn test_message_wording() {
        let ctx = ComisionContext {
            comision_id: 2,
            comision_nombre: "K1001".into(),
            materia_id: 1,
            materia_nombre: "Algoritmos".into(),
        };
        assert_eq!(
            mensaje_entrega_calificada(&ctx, 8.0),
            "Tu entrega de TP para Algoritmos (Comisión: K1001) ha sido calificada - Nota: 8.00"
        );

        let now = Utc::now();
        let tp = Tp {
            id: 1,
            consigna: "Pilas".into(),
            fecha_entrega: Utc.with_ymd_and_hms(2025, 5, 9, 23, 59, 0).unwrap(),
            vigente: true,
            comision_id: 2,
            created_at: now,
            updated_at: now,
        };
        assert!(mensaje_tp_nuevo(&ctx, &tp).ends_with("Fecha de entrega: 09/05/2025 23:59"));
        assert_eq!(
            mensaje_resultado_nuevo(&ctx, 9.5),
            "Resultado de evaluación disponible para Algoritmos - Nota: 9.50"
        );
    }

    #[actix_web::test]
    async fn test_unrelated_entrega_fields_do_not_notify() {
        // 无需访问存储：没有被跟踪字段变化时直接返回
        let storage = crate::test_support::storage().await;
        let before = entrega(Some(7.0), Some("Ok"));
        let mut after = before.clone();
        after.fecha_hora = Utc::now() + chrono::Duration::hours(1);
        after.tp_id = 99;

        let count = on_entrega_updated(storage.as_ref(), &before, &after)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[actix_web::test]
    async fn test_best_effort_swallows_errors() {
        let fallo = async { Err(TrackError::database_operation("boom")) };
        let count = best_effort("test", fallo).await;
        assert_eq!(count, 0);
        let count = best_effort("test", async { Ok(4) }).await;
        assert_eq!(count, 4);
    }

    #[test]
    fn test_reassignment_results_are_merged() {
        assert_eq!(merge_reassignment(Ok(2), Ok(3)).unwrap(), 5);

        let err = merge_reassignment(Err(TrackError::database_operation("a")), Ok(3)).unwrap_err();
        assert_eq!(err.message(), "a");

        let err = merge_reassignment(
            Err(TrackError::database_operation("a")),
            Err(TrackError::database_operation("b")),
        )
        .unwrap_err();
        assert!(err.message().contains("comisión anterior"));
        assert!(err.message().contains("comisión nueva"));
    }

    #[actix_web::test]
    async fn test_failed_old_comision_still_notifies_new_tp_comision() {
        let base = test_support::storage().await;
        let materia = test_support::seed_materia(&base, "Redes").await;
        let a = test_support::seed_comision(&base, materia.id, "A").await;
        let b = test_support::seed_comision(&base, materia.id, "B").await;
        let en_a = test_support::seed_alumno(&base, "a@uni.edu", "RA-1").await;
        let en_b = test_support::seed_alumno(&base, "b@uni.edu", "RB-1").await;
        test_support::enroll(&base, en_a.id, a.id).await;
        test_support::enroll(&base, en_b.id, b.id).await;

        let tp = base
            .create_tp(CreateTpRequest {
                consigna: "Sockets".into(),
                fecha_entrega: Utc::now(),
                vigente: Some(true),
                comision_id: a.id,
            })
            .await
            .unwrap();
        let mut moved = tp.clone();
        moved.comision_id = b.id;

        // 第一次批量写入（原分组）失败
        let storage = FailingNotificaciones::wrap(base.clone(), 1);
        let err = on_tp_updated(storage.as_ref(), &tp, &moved).await.unwrap_err();
        assert_eq!(err.message(), "notificaciones no disponibles");

        assert!(test_support::notificaciones_de(&base, en_a.id).await.is_empty());
        let mensajes = test_support::notificaciones_de(&base, en_b.id).await;
        assert_eq!(mensajes.len(), 1);
        assert!(
            mensajes[0].starts_with("Actualización de trabajo práctico para Redes (Comisión: B)")
        );
    }

    #[actix_web::test]
    async fn test_failed_old_comision_still_notifies_new_evaluacion_comision() {
        let base = test_support::storage().await;
        let materia = test_support::seed_materia(&base, "Redes").await;
        let a = test_support::seed_comision(&base, materia.id, "A").await;
        let b = test_support::seed_comision(&base, materia.id, "B").await;
        let en_a = test_support::seed_alumno(&base, "a@uni.edu", "RA-1").await;
        let en_b = test_support::seed_alumno(&base, "b@uni.edu", "RB-1").await;
        test_support::enroll(&base, en_a.id, a.id).await;
        test_support::enroll(&base, en_b.id, b.id).await;

        let evaluacion = base
            .create_evaluacion(CreateEvaluacionRequest {
                fecha_evaluacion: "2025-06-10".into(),
                temas: "TCP/IP".into(),
                observaciones: None,
                comision_id: a.id,
            })
            .await
            .unwrap();
        let mut moved = evaluacion.clone();
        moved.comision_id = b.id;

        let storage = FailingNotificaciones::wrap(base.clone(), 1);
        assert!(on_evaluacion_updated(storage.as_ref(), &evaluacion, &moved).await.is_err());

        assert!(test_support::notificaciones_de(&base, en_a.id).await.is_empty());
        let mensajes = test_support::notificaciones_de(&base, en_b.id).await;
        assert_eq!(mensajes.len(), 1);
        assert!(mensajes[0].starts_with("Actualización de evaluación para Redes (Comisión: B)"));
    }
}
