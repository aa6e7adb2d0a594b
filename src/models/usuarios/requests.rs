use serde::Deserialize;

// 创建账号请求
//
// 存储层收到时 password 已经是 argon2 哈希。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUsuarioRequest {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub legajo: Option<String>,
    pub password: String,
}

// 更新账号请求（部分更新）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUsuarioRequest {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub email: Option<String>,
    pub legajo: Option<String>,
    pub password: Option<String>,
}
