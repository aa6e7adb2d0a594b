use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResultadoFilter, ResultadoService};
use crate::errors::{Result, TrackError};
use crate::models::{
    ApiResponse,
    resultados::{entities::ResultadoEvaluacion, responses::ResultadoDetailResponse},
};
use crate::storage::Storage;

pub(crate) async fn load_resultado(storage: &dyn Storage, id: i64) -> Result<ResultadoEvaluacion> {
    storage
        .get_resultado_by_id(id)
        .await?
        .ok_or_else(|| TrackError::not_found("resultado no encontrado"))
}

/// 结果连同学生与评估（含分组、课程）
pub(crate) async fn load_detail(
    storage: &dyn Storage,
    resultado: ResultadoEvaluacion,
) -> Result<ResultadoDetailResponse> {
    storage
        .load_resultado_details(vec![resultado])
        .await?
        .pop()
        .ok_or_else(|| TrackError::not_found("resultado no encontrado"))
}

pub(crate) async fn list_resultado_details(
    storage: &dyn Storage,
    filter: ResultadoFilter,
) -> Result<Vec<ResultadoDetailResponse>> {
    let resultados = match filter {
        ResultadoFilter::Todos => storage.list_resultados().await?,
        ResultadoFilter::Alumno(alumno_id) => storage.list_resultados_by_alumno(alumno_id).await?,
        ResultadoFilter::Evaluacion(evaluacion_id) => {
            storage.list_resultados_by_evaluacion(evaluacion_id).await?
        }
    };
    storage.load_resultado_details(resultados).await
}

pub async fn list_resultados(
    service: &ResultadoService,
    filter: ResultadoFilter,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match list_resultado_details(storage.as_ref(), filter).await {
        Ok(resultados) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resultados,
            "Resultados obtenidos correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_resultado(
    service: &ResultadoService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let detail = match load_resultado(storage.as_ref(), id).await {
        Ok(resultado) => load_detail(storage.as_ref(), resultado).await,
        Err(e) => Err(e),
    };

    match detail {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Resultado obtenido correctamente",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluaciones::requests::CreateEvaluacionRequest;
    use crate::models::resultados::requests::CreateResultadoRequest;
    use crate::test_support;

    #[actix_web::test]
    async fn test_resultado_detail_includes_alumno_and_evaluacion() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Redes").await;
        let comision = test_support::seed_comision(&storage, materia.id, "Noche").await;
        let alumno = test_support::seed_alumno(&storage, "ana@uni.edu", "L-100").await;
        let evaluacion = storage
            .create_evaluacion(CreateEvaluacionRequest {
                fecha_evaluacion: "2025-06-10".into(),
                temas: "TCP/IP".into(),
                observaciones: None,
                comision_id: comision.id,
            })
            .await
            .unwrap();
        let resultado = storage
            .create_resultado(CreateResultadoRequest {
                nota: 8.5,
                devolucion: None,
                alumno_id: alumno.id,
                evaluacion_id: evaluacion.id,
            })
            .await
            .unwrap();

        let detail = load_detail(storage.as_ref(), resultado).await.unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["nota"], 8.5);
        assert_eq!(json["alumno"]["email"], "ana@uni.edu");
        assert_eq!(json["evaluacion"]["temas"], "TCP/IP");
        assert_eq!(json["evaluacion"]["comision"]["nombre"], "Noche");
        assert_eq!(json["evaluacion"]["comision"]["materia"]["nombre"], "Redes");

        let by_evaluacion =
            list_resultado_details(storage.as_ref(), ResultadoFilter::Evaluacion(evaluacion.id))
                .await
                .unwrap();
        assert_eq!(by_evaluacion.len(), 1);
        assert_eq!(by_evaluacion[0].alumno.as_ref().unwrap().legajo, "L-100");
    }
}
