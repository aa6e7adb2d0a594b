use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::entregas::requests::{CreateEntregaRequest, UpdateEntregaRequest};
use crate::services::EntregaService;
use crate::utils::{SafeAlumnoIdI64, SafeIDI64, SafeTpIdI64};

static ENTREGA_SERVICE: Lazy<EntregaService> = Lazy::new(EntregaService::new_lazy);

pub async fn list_entregas(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE.list_entregas(&req).await
}

pub async fn list_entregas_by_alumno(
    req: HttpRequest,
    alumno_id: SafeAlumnoIdI64,
) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE
        .list_entregas_by_alumno(alumno_id.0, &req)
        .await
}

pub async fn create_entrega(
    req: HttpRequest,
    entrega_data: web::Json<CreateEntregaRequest>,
) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE
        .create_entrega(entrega_data.into_inner(), &req)
        .await
}

pub async fn get_entrega(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE.get_entrega(id.0, &req).await
}

pub async fn list_archivos(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE.list_archivos(id.0, &req).await
}

pub async fn update_entrega(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateEntregaRequest>,
) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE
        .update_entrega(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_entrega(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE.delete_entrega(id.0, &req).await
}

pub async fn list_my_entregas(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE.list_mine(&req).await
}

pub async fn get_my_entrega(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE.get_mine(id.0, &req).await
}

pub async fn upload_entrega(
    req: HttpRequest,
    tp_id: SafeTpIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    ENTREGA_SERVICE.upload(tp_id.0, &req, payload).await
}

// 配置路由
pub fn configure_entregas_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/entregas")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_entregas)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_entrega)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    ),
            )
            // 学生自助接口，须在 /{id} 之前注册
            .service(
                web::scope("/me")
                    .wrap(middlewares::RequireRole::new_any(Role::alumno_roles()))
                    .route("", web::get().to(list_my_entregas))
                    .route(
                        "/tp/{tp_id}",
                        web::post()
                            .to(upload_entrega)
                            .wrap(middlewares::RateLimit::file_upload()),
                    )
                    .route("/{id}", web::get().to(get_my_entrega)),
            )
            .route(
                "/alumno/{alumno_id}",
                web::get()
                    .to(list_entregas_by_alumno)
                    .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
            )
            .route(
                "/{id}/archivos",
                web::get()
                    .to(list_archivos)
                    .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_entrega)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_entrega)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_entrega)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
    );
}
