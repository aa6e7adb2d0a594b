use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::tps::requests::{CreateTpRequest, UpdateTpRequest};
use crate::services::TpService;
use crate::utils::SafeIDI64;

static TP_SERVICE: Lazy<TpService> = Lazy::new(TpService::new_lazy);

pub async fn list_tps(req: HttpRequest) -> ActixResult<HttpResponse> {
    TP_SERVICE.list_tps(&req).await
}

pub async fn list_my_tps(req: HttpRequest) -> ActixResult<HttpResponse> {
    TP_SERVICE.list_mine(&req).await
}

pub async fn create_tp(
    req: HttpRequest,
    tp_data: web::Json<CreateTpRequest>,
) -> ActixResult<HttpResponse> {
    TP_SERVICE.create_tp(tp_data.into_inner(), &req).await
}

pub async fn get_tp(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TP_SERVICE.get_tp(id.0, &req).await
}

pub async fn update_tp(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateTpRequest>,
) -> ActixResult<HttpResponse> {
    TP_SERVICE.update_tp(id.0, update_data.into_inner(), &req).await
}

pub async fn delete_tp(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TP_SERVICE.delete_tp(id.0, &req).await
}

// 配置路由
pub fn configure_tps_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tps")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_tps)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_tp)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    ),
            )
            .route(
                "/me",
                web::get()
                    .to(list_my_tps)
                    .wrap(middlewares::RequireRole::new_any(Role::alumno_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_tp)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_tp)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_tp)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
    );
}
