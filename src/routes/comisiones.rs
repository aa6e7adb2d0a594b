use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::comisiones::requests::{CreateComisionRequest, UpdateComisionRequest};
use crate::services::ComisionService;
use crate::utils::{SafeIDI64, SafeMateriaIdI64};

static COMISION_SERVICE: Lazy<ComisionService> = Lazy::new(ComisionService::new_lazy);

pub async fn list_comisiones(req: HttpRequest) -> ActixResult<HttpResponse> {
    COMISION_SERVICE.list_comisiones(&req).await
}

pub async fn list_comisiones_by_materia(
    req: HttpRequest,
    materia_id: SafeMateriaIdI64,
) -> ActixResult<HttpResponse> {
    COMISION_SERVICE
        .list_comisiones_by_materia(materia_id.0, &req)
        .await
}

pub async fn create_comision(
    req: HttpRequest,
    comision_data: web::Json<CreateComisionRequest>,
) -> ActixResult<HttpResponse> {
    COMISION_SERVICE
        .create_comision(comision_data.into_inner(), &req)
        .await
}

pub async fn get_comision(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMISION_SERVICE.get_comision(id.0, &req).await
}

pub async fn update_comision(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateComisionRequest>,
) -> ActixResult<HttpResponse> {
    COMISION_SERVICE
        .update_comision(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_comision(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMISION_SERVICE.delete_comision(id.0, &req).await
}

// 配置路由：分组管理仅限管理员
pub fn configure_comisiones_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/comisiones")
            .wrap(middlewares::RequireRole::new_any(Role::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_comisiones))
                    .route(web::post().to(create_comision)),
            )
            .route(
                "/materia/{materia_id}",
                web::get().to(list_comisiones_by_materia),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_comision))
                    .route(web::patch().to(update_comision))
                    .route(web::delete().to(delete_comision)),
            ),
    );
}
