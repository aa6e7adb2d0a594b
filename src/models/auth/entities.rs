use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackError};

// 账号角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,    // 管理员
    Profesor, // 教师
    Alumno,   // 学生
}

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const PROFESOR: &'static str = "profesor";
    pub const ALUMNO: &'static str = "alumno";

    pub fn admin_roles() -> &'static [Role] {
        &[Self::Admin]
    }
    pub fn staff_roles() -> &'static [Role] {
        &[Self::Admin, Self::Profesor]
    }
    pub fn alumno_roles() -> &'static [Role] {
        &[Self::Alumno]
    }
    pub fn all_roles() -> &'static [Role] {
        &[Self::Admin, Self::Profesor, Self::Alumno]
    }

    /// 教师与学生需要学号/工号
    pub fn requires_legajo(&self) -> bool {
        matches!(self, Role::Profesor | Role::Alumno)
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Role>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的角色: '{s}'. 支持的角色: admin, profesor, alumno"
            ))
        })
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "{}", Role::ADMIN),
            Role::Profesor => write!(f, "{}", Role::PROFESOR),
            Role::Alumno => write!(f, "{}", Role::ALUMNO),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Role::ADMIN => Ok(Role::Admin),
            Role::PROFESOR => Ok(Role::Profesor),
            Role::ALUMNO => Ok(Role::Alumno),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

/// 经过 JWT 解码后的调用方身份
///
/// 由 RequireJWT 在请求入口处一次性解析并放入请求扩展。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub subject_id: i64,
    pub role: Role,
}

impl Identity {
    pub fn new(subject_id: i64, role: Role) -> Self {
        Self { subject_id, role }
    }

    /// 角色是否在允许集合中
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// 校验资源归属：学生只能访问属于自己的记录
    pub fn ensure_owns(&self, owner_alumno_id: i64, recurso: &str) -> Result<()> {
        if self.role == Role::Alumno && self.subject_id != owner_alumno_id {
            return Err(TrackError::authorization(format!(
                "No tienes permiso para acceder a {recurso}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("profesor".parse::<Role>(), Ok(Role::Profesor));
        assert_eq!(Role::Alumno.to_string(), "alumno");
        assert!("teacher".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_membership() {
        let profesor = Identity::new(7, Role::Profesor);
        assert!(profesor.has_any_role(Role::staff_roles()));
        assert!(!profesor.has_any_role(Role::admin_roles()));
    }

    #[test]
    fn test_ownership_check() {
        let alumno = Identity::new(3, Role::Alumno);
        assert!(alumno.ensure_owns(3, "esta notificación").is_ok());

        let err = alumno.ensure_owns(4, "esta notificación").unwrap_err();
        assert_eq!(err.status_code(), actix_web::http::StatusCode::FORBIDDEN);

        // 管理员不受归属限制
        let admin = Identity::new(1, Role::Admin);
        assert!(admin.ensure_owns(4, "esta notificación").is_ok());
    }
}
