//! 账号存储操作
//!
//! 管理员、教师与学生分别存放在三张表中，按 Role 分派。

use super::SeaOrmStorage;
use crate::entity::prelude::{AdminActiveModel, AlumnoActiveModel, ProfesorActiveModel};
use crate::errors::{Result, TrackError};
use crate::models::{
    auth::Role,
    usuarios::{
        entities::Usuario,
        requests::{CreateUsuarioRequest, UpdateUsuarioRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// 按角色选择实体模块，`$m` 在分支内指向对应的 entity 模块
macro_rules! dispatch_role {
    ($role:expr, $m:ident => $body:block) => {
        match $role {
            Role::Admin => {
                use crate::entity::admins as $m;
                $body
            }
            Role::Profesor => {
                use crate::entity::profesores as $m;
                $body
            }
            Role::Alumno => {
                use crate::entity::alumnos as $m;
                $body
            }
        }
    };
}

/// 三张表共有字段的部分更新
macro_rules! apply_common_update {
    ($model:ident, $update:ident) => {
        if let Some(nombre) = $update.nombre {
            $model.nombre = Set(nombre);
        }
        if let Some(apellido) = $update.apellido {
            $model.apellido = Set(apellido);
        }
        if let Some(email) = $update.email {
            $model.email = Set(email);
        }
        if let Some(password_hash) = $update.password {
            $model.password_hash = Set(password_hash);
        }
    };
}

impl SeaOrmStorage {
    /// 创建账号
    pub async fn create_usuario_impl(
        &self,
        role: Role,
        req: CreateUsuarioRequest,
    ) -> Result<Usuario> {
        let now = chrono::Utc::now().timestamp();

        let usuario = match role {
            Role::Admin => AdminActiveModel {
                nombre: Set(req.nombre),
                apellido: Set(req.apellido),
                email: Set(req.email),
                password_hash: Set(req.password),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map(|m| m.into_usuario()),
            Role::Profesor => ProfesorActiveModel {
                nombre: Set(req.nombre),
                apellido: Set(req.apellido),
                email: Set(req.email),
                legajo: Set(required_legajo(req.legajo)?),
                password_hash: Set(req.password),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map(|m| m.into_usuario()),
            Role::Alumno => AlumnoActiveModel {
                nombre: Set(req.nombre),
                apellido: Set(req.apellido),
                email: Set(req.email),
                legajo: Set(required_legajo(req.legajo)?),
                password_hash: Set(req.password),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map(|m| m.into_usuario()),
        };

        usuario.map_err(|e| TrackError::database_operation(format!("创建{role}账号失败: {e}")))
    }

    /// 通过 ID 获取账号
    pub async fn get_usuario_by_id_impl(&self, role: Role, id: i64) -> Result<Option<Usuario>> {
        let result = dispatch_role!(role, m => {
            m::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map(|r| r.map(|m| m.into_usuario()))
        });

        result.map_err(|e| TrackError::database_operation(format!("查询{role}账号失败: {e}")))
    }

    /// 列出某一角色的全部账号
    pub async fn list_usuarios_impl(&self, role: Role) -> Result<Vec<Usuario>> {
        let result = dispatch_role!(role, m => {
            m::Entity::find()
                .order_by_asc(m::Column::Id)
                .all(&self.db)
                .await
                .map(|rows| rows.into_iter().map(|m| m.into_usuario()).collect())
        });

        result.map_err(|e| TrackError::database_operation(format!("查询{role}列表失败: {e}")))
    }

    /// 更新账号
    pub async fn update_usuario_impl(
        &self,
        role: Role,
        id: i64,
        update: UpdateUsuarioRequest,
    ) -> Result<Option<Usuario>> {
        // 先检查账号是否存在
        if self.get_usuario_by_id_impl(role, id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let result = match role {
            Role::Admin => {
                let mut model = AdminActiveModel {
                    id: Set(id),
                    updated_at: Set(now),
                    ..Default::default()
                };
                apply_common_update!(model, update);
                model.update(&self.db).await.map(|_| ())
            }
            Role::Profesor => {
                let mut model = ProfesorActiveModel {
                    id: Set(id),
                    updated_at: Set(now),
                    ..Default::default()
                };
                if let Some(legajo) = update.legajo.clone() {
                    model.legajo = Set(legajo);
                }
                apply_common_update!(model, update);
                model.update(&self.db).await.map(|_| ())
            }
            Role::Alumno => {
                let mut model = AlumnoActiveModel {
                    id: Set(id),
                    updated_at: Set(now),
                    ..Default::default()
                };
                if let Some(legajo) = update.legajo.clone() {
                    model.legajo = Set(legajo);
                }
                apply_common_update!(model, update);
                model.update(&self.db).await.map(|_| ())
            }
        };

        result.map_err(|e| TrackError::database_operation(format!("更新{role}账号失败: {e}")))?;

        self.get_usuario_by_id_impl(role, id).await
    }

    /// 删除账号
    pub async fn delete_usuario_impl(&self, role: Role, id: i64) -> Result<bool> {
        let result = dispatch_role!(role, m => {
            m::Entity::delete_by_id(id).exec(&self.db).await
        });

        let result = result
            .map_err(|e| TrackError::database_operation(format!("删除{role}账号失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 依次在管理员、教师、学生表中按邮箱查找
    pub async fn find_usuario_by_email_impl(&self, email: &str) -> Result<Option<Usuario>> {
        for role in Role::all_roles() {
            let found = dispatch_role!(role, m => {
                m::Entity::find()
                    .filter(m::Column::Email.eq(email))
                    .one(&self.db)
                    .await
                    .map(|r| r.map(|m| m.into_usuario()))
            })
            .map_err(|e| TrackError::database_operation(format!("按邮箱查询账号失败: {e}")))?;

            if found.is_some() {
                return Ok(found);
            }
        }

        Ok(None)
    }

    /// 邮箱在三张账号表中是否已被占用
    pub async fn email_in_use_impl(
        &self,
        email: &str,
        exclude: Option<(Role, i64)>,
    ) -> Result<bool> {
        for role in Role::all_roles() {
            let ids: Vec<i64> = dispatch_role!(role, m => {
                m::Entity::find()
                    .filter(m::Column::Email.eq(email))
                    .all(&self.db)
                    .await
                    .map(|rows| rows.into_iter().map(|m| m.id).collect())
            })
            .map_err(|e| TrackError::database_operation(format!("检查邮箱失败: {e}")))?;

            if ids.iter().any(|id| exclude != Some((*role, *id))) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// 学号/工号在教师与学生表中是否已被占用
    pub async fn legajo_in_use_impl(
        &self,
        legajo: &str,
        exclude: Option<(Role, i64)>,
    ) -> Result<bool> {
        use crate::entity::{alumnos, profesores};

        let profesor_ids: Vec<i64> = profesores::Entity::find()
            .filter(profesores::Column::Legajo.eq(legajo))
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("检查学号失败: {e}")))?
            .into_iter()
            .map(|m| m.id)
            .collect();

        let alumno_ids: Vec<i64> = alumnos::Entity::find()
            .filter(alumnos::Column::Legajo.eq(legajo))
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("检查学号失败: {e}")))?
            .into_iter()
            .map(|m| m.id)
            .collect();

        let taken = profesor_ids
            .into_iter()
            .map(|id| (Role::Profesor, id))
            .chain(alumno_ids.into_iter().map(|id| (Role::Alumno, id)))
            .any(|owner| exclude != Some(owner));

        Ok(taken)
    }

    /// 统计某一角色账号数量
    pub async fn count_usuarios_impl(&self, role: Role) -> Result<u64> {
        let result = dispatch_role!(role, m => {
            m::Entity::find().count(&self.db).await
        });

        result.map_err(|e| TrackError::database_operation(format!("统计{role}账号失败: {e}")))
    }
}

fn required_legajo(legajo: Option<String>) -> Result<String> {
    legajo
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| TrackError::validation("el legajo es obligatorio"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nuevo(email: &str, legajo: Option<&str>) -> CreateUsuarioRequest {
        CreateUsuarioRequest {
            nombre: "Ana".into(),
            apellido: "García".into(),
            email: email.into(),
            legajo: legajo.map(Into::into),
            password: "hash".into(),
        }
    }

    #[actix_web::test]
    async fn test_email_lookup_spans_all_tables() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_usuario_impl(Role::Admin, nuevo("admin@uni.edu", None))
            .await
            .unwrap();
        let alumno = storage
            .create_usuario_impl(Role::Alumno, nuevo("ana@uni.edu", Some("A-001")))
            .await
            .unwrap();

        let found = storage
            .find_usuario_by_email_impl("ana@uni.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.role, Role::Alumno);
        assert_eq!(found.id, alumno.id);

        assert!(storage.email_in_use_impl("admin@uni.edu", None).await.unwrap());
        // 更新自身时不算冲突
        assert!(
            !storage
                .email_in_use_impl("ana@uni.edu", Some((Role::Alumno, alumno.id)))
                .await
                .unwrap()
        );
        assert!(
            storage
                .legajo_in_use_impl("A-001", Some((Role::Profesor, alumno.id)))
                .await
                .unwrap()
        );
    }

    #[actix_web::test]
    async fn test_update_and_delete_usuario() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let profesor = storage
            .create_usuario_impl(Role::Profesor, nuevo("p@uni.edu", Some("P-9")))
            .await
            .unwrap();

        let updated = storage
            .update_usuario_impl(
                Role::Profesor,
                profesor.id,
                UpdateUsuarioRequest {
                    apellido: Some("López".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.apellido, "López");
        assert_eq!(updated.legajo.as_deref(), Some("P-9"));

        assert_eq!(storage.count_usuarios_impl(Role::Profesor).await.unwrap(), 1);
        assert!(storage.delete_usuario_impl(Role::Profesor, profesor.id).await.unwrap());
        assert!(
            storage
                .get_usuario_by_id_impl(Role::Profesor, profesor.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn test_legajo_required_for_alumno() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = storage
            .create_usuario_impl(Role::Alumno, nuevo("x@uni.edu", None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }
}
