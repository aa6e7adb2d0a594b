use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::cursadas::requests::{CreateCursadaRequest, UpdateCursadaRequest};
use crate::services::CursadaService;
use crate::utils::{SafeAlumnoIdI64, SafeIDI64};

static CURSADA_SERVICE: Lazy<CursadaService> = Lazy::new(CursadaService::new_lazy);

pub async fn list_cursadas(req: HttpRequest) -> ActixResult<HttpResponse> {
    CURSADA_SERVICE.list_cursadas(&req).await
}

pub async fn list_cursadas_by_alumno(
    req: HttpRequest,
    alumno_id: SafeAlumnoIdI64,
) -> ActixResult<HttpResponse> {
    CURSADA_SERVICE
        .list_cursadas_by_alumno(alumno_id.0, &req)
        .await
}

pub async fn list_my_cursadas(req: HttpRequest) -> ActixResult<HttpResponse> {
    CURSADA_SERVICE.list_mine(&req).await
}

pub async fn create_cursada(
    req: HttpRequest,
    cursada_data: web::Json<CreateCursadaRequest>,
) -> ActixResult<HttpResponse> {
    CURSADA_SERVICE
        .create_cursada(cursada_data.into_inner(), &req)
        .await
}

pub async fn get_cursada(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CURSADA_SERVICE.get_cursada(id.0, &req).await
}

pub async fn update_cursada(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateCursadaRequest>,
) -> ActixResult<HttpResponse> {
    CURSADA_SERVICE
        .update_cursada(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_cursada(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CURSADA_SERVICE.delete_cursada(id.0, &req).await
}

// 配置路由
pub fn configure_cursadas_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/cursadas")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_cursadas)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_cursada)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    ),
            )
            // 学生查看自己的选课，须在 /{id} 之前注册
            .route(
                "/me",
                web::get()
                    .to(list_my_cursadas)
                    .wrap(middlewares::RequireRole::new_any(Role::alumno_roles())),
            )
            .route(
                "/alumno/{alumno_id}",
                web::get()
                    .to(list_cursadas_by_alumno)
                    .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_cursada)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_cursada)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_cursada)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
    );
}
