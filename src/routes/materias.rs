use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::materias::requests::{CreateMateriaRequest, UpdateMateriaRequest};
use crate::services::MateriaService;
use crate::utils::SafeIDI64;

static MATERIA_SERVICE: Lazy<MateriaService> = Lazy::new(MateriaService::new_lazy);

pub async fn list_materias(req: HttpRequest) -> ActixResult<HttpResponse> {
    MATERIA_SERVICE.list_materias(&req).await
}

pub async fn create_materia(
    req: HttpRequest,
    materia_data: web::Json<CreateMateriaRequest>,
) -> ActixResult<HttpResponse> {
    MATERIA_SERVICE
        .create_materia(materia_data.into_inner(), &req)
        .await
}

pub async fn get_materia(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIA_SERVICE.get_materia(id.0, &req).await
}

pub async fn update_materia(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateMateriaRequest>,
) -> ActixResult<HttpResponse> {
    MATERIA_SERVICE
        .update_materia(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_materia(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIA_SERVICE.delete_materia(id.0, &req).await
}

// 配置路由
pub fn configure_materias_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/materias")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_materias)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_materia)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_materia)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_materia)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_materia)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
    );
}
