use crate::config::AppConfig;
use crate::errors::{Result, TrackError};
use crate::models::auth::{Identity, Role};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 账号 ID
    pub role: Role,         // 账号所在的表
    pub token_type: String, // 目前只签发 "access"
    pub exp: usize,         // 过期时间戳
    pub iat: usize,         // 签发时间
}

const ACCESS_TOKEN_TYPE: &str = "access";

impl Claims {
    /// 转换为请求身份
    pub fn identity(&self) -> Result<Identity> {
        let subject_id = self
            .sub
            .parse::<i64>()
            .map_err(|_| TrackError::authentication("Invalid token subject"))?;
        Ok(Identity::new(subject_id, self.role))
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// 访问令牌有效期（秒）
    pub fn access_token_ttl_secs() -> i64 {
        AppConfig::get().jwt.access_token_expiry * 60
    }

    // 生成 Access Token
    pub fn generate_access_token(subject_id: i64, role: Role) -> Result<String> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            subject_id,
            role,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
            &Self::get_secret(),
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        subject_id: i64,
        role: Role,
        expiry_duration: chrono::Duration,
        secret: &str,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: subject_id.to_string(),
            role,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| TrackError::authentication(format!("Token 生成失败: {e}")))
    }

    // 验证 JWT token
    pub fn verify_token(token: &str) -> Result<Claims> {
        Self::verify_token_with_secret(token, &Self::get_secret())
    }

    pub fn verify_token_with_secret(token: &str, secret: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        let claims = decode::<Claims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| TrackError::authentication("Invalid or expired token"))?;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TrackError::authentication("Invalid token type"));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_carries_role_and_subject() {
        let expiry = chrono::Duration::minutes(5);
        let token = JwtUtils::generate_token_with_expiry(42, Role::Profesor, expiry, "s3cret")
            .unwrap();
        let identity = JwtUtils::verify_token_with_secret(&token, "s3cret")
            .unwrap()
            .identity()
            .unwrap();
        assert_eq!(identity, Identity::new(42, Role::Profesor));
    }

    #[test]
    fn test_rejects_wrong_secret_and_expired() {
        let token =
            JwtUtils::generate_token_with_expiry(1, Role::Alumno, chrono::Duration::minutes(5), "a")
                .unwrap();
        assert!(JwtUtils::verify_token_with_secret(&token, "b").is_err());

        let expired =
            JwtUtils::generate_token_with_expiry(1, Role::Alumno, chrono::Duration::hours(-2), "a")
                .unwrap();
        let err = JwtUtils::verify_token_with_secret(&expired, "a").unwrap_err();
        assert_eq!(err.code(), "E009");
    }
}
