/*!
 * 基于角色的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。角色不在允许集合中返回 403，
 * 请求中没有身份信息（未经过 RequireJWT）返回 401。
 *
 * ```rust,ignore
 * web::resource("")
 *     .route(web::post().to(create_materia))
 *     .wrap(RequireRole::new_any(Role::admin_roles()))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::{
    middlewares::RequireJWT,
    models::{ErrorCode, auth::Role},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Vec<Role>,
}

impl RequireRole {
    /// 允许集合中的任一角色
    pub fn new_any(roles: &[Role]) -> Self {
        Self {
            allowed_roles: roles.to_vec(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<Role>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            match RequireJWT::extract_identity(req.request()) {
                Some(identity) if identity.has_any_role(&allowed_roles) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(identity) => {
                    info!(
                        "Access denied for {} {}. Allowed roles: {:?}",
                        identity.role, identity.subject_id, allowed_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no identity in request. \
                         Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, HttpResponse, http::header, test, web};

    fn bearer(subject_id: i64, role: Role) -> (header::HeaderName, String) {
        let token = JwtUtils::generate_access_token(subject_id, role).unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_role_gate_statuses() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api/v1/materias")
                    .wrap(RequireJWT)
                    .service(
                        web::resource("")
                            .route(web::post().to(|| async { HttpResponse::Created().finish() }))
                            .wrap(RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
        )
        .await;

        // 没有令牌：401
        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/v1/materias").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 令牌有效但角色不对：403
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/materias")
                .insert_header(bearer(5, Role::Alumno))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/materias")
                .insert_header(bearer(1, Role::Admin))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // 伪造的令牌：401
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/materias")
                .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_missing_identity_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::resource("/sin-jwt")
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() }))
                    .wrap(RequireRole::new_any(Role::admin_roles())),
            ),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/sin-jwt").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
