use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ComisionService, ensure_materia_exists};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    comisiones::{entities::Comision, requests::CreateComisionRequest},
};
use crate::storage::Storage;
use crate::utils::validate::validate_required;

pub(crate) async fn apply_create(
    storage: &dyn Storage,
    req: CreateComisionRequest,
) -> Result<Comision> {
    validate_required("nombre", &req.nombre)?;
    ensure_materia_exists(storage, req.materia_id).await?;
    storage.create_comision(req).await
}

pub async fn create_comision(
    service: &ComisionService,
    req: CreateComisionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_create(storage.as_ref(), req).await {
        Ok(comision) => {
            tracing::info!("Comision {} created", comision.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(comision, "Comisión creada correctamente")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[actix_web::test]
    async fn test_create_requires_existing_materia() {
        let storage = test_support::storage().await;
        let err = apply_create(
            storage.as_ref(),
            CreateComisionRequest {
                nombre: "K1021".into(),
                materia_id: 42,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), "la materia especificada no existe");

        let materia = test_support::seed_materia(&storage, "Álgebra").await;
        let comision = apply_create(
            storage.as_ref(),
            CreateComisionRequest {
                nombre: "K1021".into(),
                materia_id: materia.id,
            },
        )
        .await
        .unwrap();
        assert_eq!(comision.materia_id, materia.id);
    }
}
