use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::auth::Role;
use crate::models::usuarios::requests::CreateUsuarioRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ADMIN_EMAIL: &str = "admin@linsitrack.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
///
/// 仅在管理员表为空时执行，返回是否创建了账号。
pub(crate) async fn seed_admin(
    storage: &dyn Storage,
    email: Option<String>,
    password: Option<String>,
) -> Result<bool> {
    let count = storage.count_usuarios(Role::Admin).await?;
    if count > 0 {
        debug!("Found {} admin account(s), skipping admin seed", count);
        return Ok(false);
    }
    info!("No admin accounts found, creating default admin account...");

    let email = email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());

    // 优先使用环境变量中的密码，否则生成随机密码并只打印一次
    let password = password.filter(|p| !p.is_empty()).unwrap_or_else(|| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Admin email: {}", email);
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let admin = storage
        .create_usuario(
            Role::Admin,
            CreateUsuarioRequest {
                nombre: "Administrador".to_string(),
                apellido: "LINSITrack".to_string(),
                email,
                legajo: None,
                password: hash_password(&password)?,
            },
        )
        .await?;

    info!(
        "Default admin account created (ID: {}, email: {})",
        admin.id, admin.email
    );
    Ok(true)
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();
    if config.uses_default_jwt_secret() {
        warn!("JWT_SECRET is not set, using the built-in development secret");
        if config.is_production() {
            warn!("Running in production with the development JWT secret is insecure");
        }
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    if let Err(e) = seed_admin(
        storage.as_ref(),
        std::env::var("ADMIN_EMAIL").ok(),
        std::env::var("ADMIN_PASSWORD").ok(),
    )
    .await
    {
        warn!("Failed to seed admin account: {}", e);
    }

    StartupContext { storage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[actix_web::test]
    async fn test_seed_admin_only_once() {
        let storage = test_support::storage().await;

        let created = seed_admin(
            storage.as_ref(),
            Some(" Root@Uni.EDU ".into()),
            Some("secreto-123".into()),
        )
        .await
        .unwrap();
        assert!(created);

        let admin = storage
            .find_usuario_by_email("root@uni.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);

        let again = seed_admin(storage.as_ref(), None, None).await.unwrap();
        assert!(!again);
        assert_eq!(storage.count_usuarios(Role::Admin).await.unwrap(), 1);
    }

    #[test]
    fn test_generated_password_length() {
        assert_eq!(generate_random_password(16).chars().count(), 16);
    }
}
