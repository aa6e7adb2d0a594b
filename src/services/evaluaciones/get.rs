use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluacionService;
use crate::errors::{Result, TrackError};
use crate::models::{ApiResponse, evaluaciones::responses::EvaluacionDetailResponse};
use crate::storage::Storage;

pub(crate) async fn list_evaluacion_details(
    storage: &dyn Storage,
    comision_id: Option<i64>,
) -> Result<Vec<EvaluacionDetailResponse>> {
    let evaluaciones = match comision_id {
        Some(comision_id) => storage.list_evaluaciones_by_comision(comision_id).await?,
        None => storage.list_evaluaciones().await?,
    };
    storage.load_evaluacion_details(evaluaciones).await
}

pub(crate) async fn load_evaluacion_detail(
    storage: &dyn Storage,
    id: i64,
) -> Result<EvaluacionDetailResponse> {
    let evaluacion = storage
        .get_evaluacion_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("evaluación no encontrada"))?;

    storage
        .load_evaluacion_details(vec![evaluacion])
        .await?
        .pop()
        .ok_or_else(|| TrackError::not_found("evaluación no encontrada"))
}

pub async fn list_evaluaciones(
    service: &EvaluacionService,
    comision_id: Option<i64>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match list_evaluacion_details(storage.as_ref(), comision_id).await {
        Ok(evaluaciones) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluaciones,
            "Evaluaciones obtenidas correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_evaluacion(
    service: &EvaluacionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_evaluacion_detail(storage.as_ref(), id).await {
        Ok(evaluacion) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluacion,
            "Evaluación obtenida correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluaciones::requests::CreateEvaluacionRequest;
    use crate::test_support;

    #[actix_web::test]
    async fn test_evaluacion_detail_includes_comision_and_materia() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Redes").await;
        let comision = test_support::seed_comision(&storage, materia.id, "Noche").await;
        let evaluacion = storage
            .create_evaluacion(CreateEvaluacionRequest {
                fecha_evaluacion: "2025-06-10".into(),
                temas: "TCP/IP".into(),
                observaciones: None,
                comision_id: comision.id,
            })
            .await
            .unwrap();

        let detail = load_evaluacion_detail(storage.as_ref(), evaluacion.id).await.unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["temas"], "TCP/IP");
        assert_eq!(json["comision"]["materia"]["nombre"], "Redes");

        let listed = list_evaluacion_details(storage.as_ref(), Some(comision.id)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].comision.as_ref().unwrap().nombre, "Noche");
    }
}
