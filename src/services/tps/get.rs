use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TpService;
use crate::errors::{Result, TrackError};
use crate::models::{ApiResponse, tps::responses::TpDetailResponse};
use crate::services::require_identity;
use crate::storage::Storage;

/// TP 连同分组与课程
pub(crate) async fn load_tp_detail(storage: &dyn Storage, id: i64) -> Result<TpDetailResponse> {
    let tp = storage
        .get_tp_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("trabajo práctico no encontrado"))?;

    storage
        .load_tp_details(vec![tp])
        .await?
        .pop()
        .ok_or_else(|| TrackError::not_found("trabajo práctico no encontrado"))
}

// alumno_id 为 Some 时只列出该学生分组中仍有效的 TP
pub(crate) async fn list_tp_details(
    storage: &dyn Storage,
    alumno_id: Option<i64>,
) -> Result<Vec<TpDetailResponse>> {
    let tps = match alumno_id {
        Some(alumno_id) => storage.list_vigentes_tps_by_alumno(alumno_id).await?,
        None => storage.list_tps().await?,
    };
    storage.load_tp_details(tps).await
}

pub async fn list_tps(service: &TpService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match list_tp_details(storage.as_ref(), None).await {
        Ok(tps) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            tps,
            "Trabajos prácticos obtenidos correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_mine(service: &TpService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(e) => return Ok(e.to_http_response()),
    };
    let storage = service.get_storage(request);

    match list_tp_details(storage.as_ref(), Some(identity.subject_id)).await {
        Ok(tps) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            tps,
            "Trabajos prácticos obtenidos correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_tp(
    service: &TpService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_tp_detail(storage.as_ref(), id).await {
        Ok(tp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            tp,
            "Trabajo práctico obtenido correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tps::requests::CreateTpRequest;
    use crate::test_support;
    use chrono::{Duration, Utc};

    #[actix_web::test]
    async fn test_tp_detail_includes_comision_and_materia() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Redes").await;
        let comision = test_support::seed_comision(&storage, materia.id, "Noche").await;
        let tp = storage
            .create_tp(CreateTpRequest {
                consigna: "Sockets".into(),
                fecha_entrega: Utc::now() + Duration::days(3),
                vigente: Some(true),
                comision_id: comision.id,
            })
            .await
            .unwrap();

        let detail = load_tp_detail(storage.as_ref(), tp.id).await.unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["consigna"], "Sockets");
        assert_eq!(json["comision"]["nombre"], "Noche");
        assert_eq!(json["comision"]["materia"]["nombre"], "Redes");

        let missing = load_tp_detail(storage.as_ref(), tp.id + 100).await;
        assert!(matches!(missing, Err(TrackError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_student_list_carries_relations() {
        let storage = test_support::storage().await;
        let redes = test_support::seed_materia(&storage, "Redes").await;
        let sistemas = test_support::seed_materia(&storage, "Sistemas Operativos").await;
        let a = test_support::seed_comision(&storage, redes.id, "A").await;
        let b = test_support::seed_comision(&storage, sistemas.id, "B").await;
        let alumno = test_support::seed_alumno(&storage, "x@uni.edu", "X-1").await;
        test_support::enroll(&storage, alumno.id, a.id).await;

        for comision_id in [a.id, b.id] {
            storage
                .create_tp(CreateTpRequest {
                    consigna: format!("TP {comision_id}"),
                    fecha_entrega: Utc::now() + Duration::days(3),
                    vigente: Some(true),
                    comision_id,
                })
                .await
                .unwrap();
        }

        let mine = list_tp_details(storage.as_ref(), Some(alumno.id)).await.unwrap();
        assert_eq!(mine.len(), 1);
        let comision = mine[0].comision.as_ref().unwrap();
        assert_eq!(comision.nombre, "A");
        assert_eq!(comision.materia.as_ref().unwrap().nombre, "Redes");

        let all = list_tp_details(storage.as_ref(), None).await.unwrap();
        let materias: Vec<_> = all
            .iter()
            .filter_map(|d| d.comision.as_ref()?.materia.as_ref())
            .map(|m| m.nombre.as_str())
            .collect();
        assert!(materias.contains(&"Redes"));
        assert!(materias.contains(&"Sistemas Operativos"));
    }
}
