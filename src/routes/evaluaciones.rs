use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::evaluaciones::requests::{CreateEvaluacionRequest, UpdateEvaluacionRequest};
use crate::services::EvaluacionService;
use crate::utils::{SafeComisionIdI64, SafeIDI64};

static EVALUACION_SERVICE: Lazy<EvaluacionService> = Lazy::new(EvaluacionService::new_lazy);

pub async fn list_evaluaciones(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVALUACION_SERVICE.list_evaluaciones(&req).await
}

pub async fn list_evaluaciones_by_comision(
    req: HttpRequest,
    comision_id: SafeComisionIdI64,
) -> ActixResult<HttpResponse> {
    EVALUACION_SERVICE
        .list_evaluaciones_by_comision(comision_id.0, &req)
        .await
}

pub async fn create_evaluacion(
    req: HttpRequest,
    evaluacion_data: web::Json<CreateEvaluacionRequest>,
) -> ActixResult<HttpResponse> {
    EVALUACION_SERVICE
        .create_evaluacion(evaluacion_data.into_inner(), &req)
        .await
}

pub async fn get_evaluacion(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUACION_SERVICE.get_evaluacion(id.0, &req).await
}

pub async fn update_evaluacion(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateEvaluacionRequest>,
) -> ActixResult<HttpResponse> {
    EVALUACION_SERVICE
        .update_evaluacion(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_evaluacion(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUACION_SERVICE.delete_evaluacion(id.0, &req).await
}

// 配置路由
pub fn configure_evaluaciones_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluaciones")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_evaluaciones)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_evaluacion)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    ),
            )
            .route(
                "/comision/{comision_id}",
                web::get()
                    .to(list_evaluaciones_by_comision)
                    .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_evaluacion)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_evaluacion)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_evaluacion)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
    );
}
