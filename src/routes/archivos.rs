use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::Role;
use crate::services::ArchivoService;
use crate::utils::SafeIDI64;

static ARCHIVO_SERVICE: Lazy<ArchivoService> = Lazy::new(ArchivoService::new_lazy);

pub async fn download_archivo(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ARCHIVO_SERVICE.download(id.0, &req).await
}

pub async fn delete_archivo(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ARCHIVO_SERVICE.delete(id.0, &req).await
}

// 配置路由
pub fn configure_archivos_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/archivos")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    // 学生的归属检查在服务层完成
                    .route(
                        web::get()
                            .to(download_archivo)
                            .wrap(middlewares::RequireRole::new_any(Role::all_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_archivo)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
    );
}
