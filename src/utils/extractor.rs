//! 路径参数提取器
//!
//! 将 `{id}` 一类的路径参数解析为正整数 ID，失败时直接返回 400。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter '{param}': {raw}"),
            ));
            Err(InternalError::from_response("invalid path id", response).into())
        }
    }
}

macro_rules! define_safe_id_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeIDI64 => "id",
    SafeAlumnoIdI64 => "alumno_id",
    SafeComisionIdI64 => "comision_id",
    SafeMateriaIdI64 => "materia_id",
    SafeEvaluacionIdI64 => "evaluacion_id",
    SafeTpIdI64 => "tp_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_positive_ids_only() {
        let (req, mut payload) = TestRequest::default()
            .param("alumno_id", "12")
            .to_http_parts();
        let SafeAlumnoIdI64(id) = SafeAlumnoIdI64::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(id, 12);

        for bad in ["0", "-3", "abc"] {
            let (req, mut payload) = TestRequest::default().param("id", bad).to_http_parts();
            let err = SafeIDI64::from_request(&req, &mut payload).await.unwrap_err();
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::BAD_REQUEST
            );
        }
    }
}
