use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CursadaService, validate_notas};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    cursadas::{entities::Cursada, requests::CreateCursadaRequest},
};
use crate::services::comisiones::ensure_comision_exists;
use crate::services::usuarios::ensure_alumno_exists;
use crate::storage::Storage;

/// 创建选课：学生与分组必须存在
pub(crate) async fn apply_create(
    storage: &dyn Storage,
    req: CreateCursadaRequest,
) -> Result<Cursada> {
    validate_notas(req.nota_final, req.nota_conceptual)?;
    ensure_alumno_exists(storage, req.alumno_id).await?;
    ensure_comision_exists(storage, req.comision_id).await?;
    storage.create_cursada(req).await
}

pub async fn create_cursada(
    service: &CursadaService,
    req: CreateCursadaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_create(storage.as_ref(), req).await {
        Ok(cursada) => {
            tracing::info!(
                "Alumno {} enrolled in comision {}",
                cursada.alumno_id,
                cursada.comision_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(cursada, "Cursada creada correctamente")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn cursada(alumno_id: i64, comision_id: i64) -> CreateCursadaRequest {
        CreateCursadaRequest {
            alumno_id,
            comision_id,
            ano_lectivo: 2025,
            nota_final: None,
            nota_conceptual: None,
            feedback: None,
        }
    }

    #[actix_web::test]
    async fn test_references_must_exist() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Química").await;
        let comision = test_support::seed_comision(&storage, materia.id, "Q1").await;
        let alumno = test_support::seed_alumno(&storage, "q@uni.edu", "Q-1").await;

        let err = apply_create(storage.as_ref(), cursada(alumno.id + 1, comision.id))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "el alumno especificado no existe");

        let err = apply_create(storage.as_ref(), cursada(alumno.id, comision.id + 1))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "la comisión especificada no existe");

        let created = apply_create(storage.as_ref(), cursada(alumno.id, comision.id))
            .await
            .unwrap();
        assert_eq!(created.ano_lectivo, 2025);
    }

    #[actix_web::test]
    async fn test_nota_out_of_range_rejected() {
        let storage = test_support::storage().await;
        let err = apply_create(
            storage.as_ref(),
            CreateCursadaRequest {
                nota_final: Some(11.0),
                ..cursada(1, 1)
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), "la nota debe estar entre 0 y 10");
    }
}
