//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::materias::{ActiveModel, Column, Entity as Materias};
use crate::errors::{Result, TrackError};
use crate::models::materias::{
    entities::Materia,
    requests::{CreateMateriaRequest, UpdateMateriaRequest},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_materia_impl(&self, req: CreateMateriaRequest) -> Result<Materia> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            nombre: Set(req.nombre),
            descripcion: Set(req.descripcion),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_materia())
    }

    /// 通过 ID 获取课程
    pub async fn get_materia_by_id_impl(&self, id: i64) -> Result<Option<Materia>> {
        let result = Materias::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_materia()))
    }

    /// 列出全部课程
    pub async fn list_materias_impl(&self) -> Result<Vec<Materia>> {
        let result = Materias::find()
            .order_by_asc(Column::Nombre)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_materia()).collect())
    }

    /// 更新课程
    pub async fn update_materia_impl(
        &self,
        id: i64,
        update: UpdateMateriaRequest,
    ) -> Result<Option<Materia>> {
        if self.get_materia_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(nombre) = update.nombre {
            model.nombre = Set(nombre);
        }

        if let Some(descripcion) = update.descripcion {
            model.descripcion = Set(Some(descripcion));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_materia_by_id_impl(id).await
    }

    /// 删除课程（分组、选课等级联删除）
    pub async fn delete_materia_impl(&self, id: i64) -> Result<bool> {
        let result = Materias::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
