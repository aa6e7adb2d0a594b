use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::notificaciones::requests::{
    CreateNotificacionRequest, NotifyComisionRequest, NotifyMateriaRequest,
    UpdateNotificacionRequest,
};
use crate::services::NotificacionService;
use crate::utils::{SafeAlumnoIdI64, SafeIDI64};

static NOTIFICACION_SERVICE: Lazy<NotificacionService> =
    Lazy::new(NotificacionService::new_lazy);

// 管理员

pub async fn list_notificaciones(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.list_notificaciones(&req).await
}

pub async fn create_notificacion(
    req: HttpRequest,
    data: web::Json<CreateNotificacionRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE
        .create_notificacion(&req, data.into_inner())
        .await
}

pub async fn get_notificacion(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.get_notificacion(&req, id.0).await
}

pub async fn update_notificacion(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateNotificacionRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE
        .update_notificacion(&req, id.0, data.into_inner())
        .await
}

pub async fn delete_notificacion(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.delete_notificacion(&req, id.0).await
}

pub async fn mark_read(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.mark_read(&req, id.0).await
}

pub async fn list_by_alumno(
    req: HttpRequest,
    alumno_id: SafeAlumnoIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE
        .list_by_alumno(&req, alumno_id.0, None)
        .await
}

pub async fn list_read_by_alumno(
    req: HttpRequest,
    alumno_id: SafeAlumnoIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE
        .list_by_alumno(&req, alumno_id.0, Some(true))
        .await
}

pub async fn list_unread_by_alumno(
    req: HttpRequest,
    alumno_id: SafeAlumnoIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE
        .list_by_alumno(&req, alumno_id.0, Some(false))
        .await
}

pub async fn mark_all_read_by_alumno(
    req: HttpRequest,
    alumno_id: SafeAlumnoIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE
        .mark_all_read_by_alumno(&req, alumno_id.0)
        .await
}

// 教师与管理员

pub async fn notify_materia(
    req: HttpRequest,
    data: web::Json<NotifyMateriaRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE
        .notify_materia(&req, data.into_inner())
        .await
}

pub async fn notify_comision(
    req: HttpRequest,
    data: web::Json<NotifyComisionRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE
        .notify_comision(&req, data.into_inner())
        .await
}

// 学生

pub async fn list_mine(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.list_mine(&req, None).await
}

pub async fn list_mine_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.list_mine(&req, Some(true)).await
}

pub async fn list_mine_unread(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.list_mine(&req, Some(false)).await
}

pub async fn get_mine(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.get_mine(&req, id.0).await
}

pub async fn mark_mine_read(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.mark_mine_read(&req, id.0).await
}

pub async fn mark_all_mine_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICACION_SERVICE.mark_all_mine_read(&req).await
}

// 配置路由
pub fn configure_notificaciones_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notificaciones")
            .wrap(middlewares::RequireJWT)
            // 学生自助接口；固定路径须在 /{id} 之前注册
            .service(
                web::scope("/me")
                    .wrap(middlewares::RequireRole::new_any(Role::alumno_roles()))
                    .route("", web::get().to(list_mine))
                    .route("/read", web::get().to(list_mine_read))
                    .route("/unread", web::get().to(list_mine_unread))
                    .route("/mark-all-read", web::patch().to(mark_all_mine_read))
                    .route("/{id}", web::get().to(get_mine))
                    .route("/{id}/mark-read", web::patch().to(mark_mine_read)),
            )
            .route(
                "/notify-materia",
                web::post()
                    .to(notify_materia)
                    .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
            )
            .route(
                "/notify-comision",
                web::post()
                    .to(notify_comision)
                    .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(Role::admin_roles()))
                    .service(
                        web::resource("")
                            .route(web::get().to(list_notificaciones))
                            .route(web::post().to(create_notificacion)),
                    )
                    .route("/alumnos/{alumno_id}", web::get().to(list_by_alumno))
                    .route("/alumnos/{alumno_id}/read", web::get().to(list_read_by_alumno))
                    .route(
                        "/alumnos/{alumno_id}/unread",
                        web::get().to(list_unread_by_alumno),
                    )
                    .route(
                        "/alumnos/{alumno_id}/mark-all-read",
                        web::patch().to(mark_all_read_by_alumno),
                    )
                    .route("/{id}/mark-read", web::patch().to(mark_read))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(get_notificacion))
                            .route(web::patch().to(update_notificacion))
                            .route(web::delete().to(delete_notificacion)),
                    ),
            ),
    );
}
