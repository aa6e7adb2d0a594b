use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EntregaService, ensure_tp_exists};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    entregas::{entities::Entrega, requests::CreateEntregaRequest},
};
use crate::services::notificaciones::notifier;
use crate::services::usuarios::ensure_alumno_exists;
use crate::storage::Storage;
use crate::utils::validate::validate_nota;

pub(crate) async fn apply_create(
    storage: &dyn Storage,
    req: CreateEntregaRequest,
) -> Result<Entrega> {
    if let Some(nota) = req.nota {
        validate_nota(nota)?;
    }
    ensure_alumno_exists(storage, req.alumno_id).await?;
    ensure_tp_exists(storage, req.tp_id).await?;

    let entrega = storage.create_entrega(req).await?;
    notifier::best_effort(
        "entrega created",
        notifier::on_entrega_created(storage, &entrega),
    )
    .await;

    Ok(entrega)
}

pub async fn create_entrega(
    service: &EntregaService,
    req: CreateEntregaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_create(storage.as_ref(), req).await {
        Ok(entrega) => {
            tracing::info!(
                "Entrega {} created for alumno {} on TP {}",
                entrega.id,
                entrega.alumno_id,
                entrega.tp_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(entrega, "Entrega creada correctamente")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
