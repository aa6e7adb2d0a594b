use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::models::usuarios::requests::{CreateUsuarioRequest, UpdateUsuarioRequest};
use crate::services::UsuarioService;
use crate::utils::SafeIDI64;

static USUARIO_SERVICE: Lazy<UsuarioService> = Lazy::new(UsuarioService::new_lazy);

// 角色来自所在 scope 的 app_data
pub async fn list_usuarios(req: HttpRequest, role: web::Data<Role>) -> ActixResult<HttpResponse> {
    USUARIO_SERVICE.list_usuarios(**role, &req).await
}

pub async fn create_usuario(
    req: HttpRequest,
    role: web::Data<Role>,
    usuario_data: web::Json<CreateUsuarioRequest>,
) -> ActixResult<HttpResponse> {
    USUARIO_SERVICE
        .create_usuario(**role, usuario_data.into_inner(), &req)
        .await
}

pub async fn get_usuario(
    req: HttpRequest,
    role: web::Data<Role>,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    USUARIO_SERVICE.get_usuario(**role, id.0, &req).await
}

pub async fn update_usuario(
    req: HttpRequest,
    role: web::Data<Role>,
    id: SafeIDI64,
    update_data: web::Json<UpdateUsuarioRequest>,
) -> ActixResult<HttpResponse> {
    USUARIO_SERVICE
        .update_usuario(**role, id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_usuario(
    req: HttpRequest,
    role: web::Data<Role>,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    USUARIO_SERVICE.delete_usuario(**role, id.0, &req).await
}

fn configure_usuario_scope(cfg: &mut web::ServiceConfig, path: &str, role: Role) {
    // 账号管理仅限管理员
    cfg.service(
        web::scope(path)
            .wrap(middlewares::RequireRole::new_any(Role::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .app_data(web::Data::new(role))
            .service(
                web::resource("")
                    .route(web::get().to(list_usuarios))
                    .route(web::post().to(create_usuario)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_usuario))
                    .route(web::patch().to(update_usuario))
                    .route(web::delete().to(delete_usuario)),
            ),
    );
}

// 配置路由
pub fn configure_usuarios_routes(cfg: &mut web::ServiceConfig) {
    configure_usuario_scope(cfg, "/api/v1/admins", Role::Admin);
    configure_usuario_scope(cfg, "/api/v1/profesores", Role::Profesor);
    configure_usuario_scope(cfg, "/api/v1/alumnos", Role::Alumno);
}
