use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::resultados::requests::{CreateResultadoRequest, UpdateResultadoRequest};
use crate::services::ResultadoService;
use crate::services::resultados::ResultadoFilter;
use crate::utils::{SafeAlumnoIdI64, SafeEvaluacionIdI64, SafeIDI64};

static RESULTADO_SERVICE: Lazy<ResultadoService> = Lazy::new(ResultadoService::new_lazy);

pub async fn list_resultados(req: HttpRequest) -> ActixResult<HttpResponse> {
    RESULTADO_SERVICE
        .list_resultados(ResultadoFilter::Todos, &req)
        .await
}

pub async fn list_resultados_by_alumno(
    req: HttpRequest,
    alumno_id: SafeAlumnoIdI64,
) -> ActixResult<HttpResponse> {
    RESULTADO_SERVICE
        .list_resultados(ResultadoFilter::Alumno(alumno_id.0), &req)
        .await
}

pub async fn list_resultados_by_evaluacion(
    req: HttpRequest,
    evaluacion_id: SafeEvaluacionIdI64,
) -> ActixResult<HttpResponse> {
    RESULTADO_SERVICE
        .list_resultados(ResultadoFilter::Evaluacion(evaluacion_id.0), &req)
        .await
}

pub async fn create_resultado(
    req: HttpRequest,
    resultado_data: web::Json<CreateResultadoRequest>,
) -> ActixResult<HttpResponse> {
    RESULTADO_SERVICE
        .create_resultado(resultado_data.into_inner(), &req)
        .await
}

pub async fn get_resultado(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULTADO_SERVICE.get_resultado(id.0, &req).await
}

pub async fn update_resultado(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateResultadoRequest>,
) -> ActixResult<HttpResponse> {
    RESULTADO_SERVICE
        .update_resultado(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_resultado(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULTADO_SERVICE.delete_resultado(id.0, &req).await
}

pub async fn list_mis_resultados(req: HttpRequest) -> ActixResult<HttpResponse> {
    RESULTADO_SERVICE.list_mine(&req).await
}

pub async fn get_mi_resultado(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULTADO_SERVICE.get_mine(id.0, &req).await
}

// 配置路由
pub fn configure_resultados_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/resultados")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_resultados)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_resultado)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    ),
            )
            .route(
                "/alumno/{alumno_id}",
                web::get()
                    .to(list_resultados_by_alumno)
                    .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
            )
            .route(
                "/evaluacion/{evaluacion_id}",
                web::get()
                    .to(list_resultados_by_evaluacion)
                    .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_resultado)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::put()
                            .to(update_resultado)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_resultado)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/mis-resultados")
            .wrap(middlewares::RequireRole::new_any(Role::alumno_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_mis_resultados))
            .route("/{id}", web::get().to(get_mi_resultado)),
    );
}
