//! 分组存储操作

use super::SeaOrmStorage;
use crate::entity::comisiones::{ActiveModel, Column, Entity as Comisiones};
use crate::entity::materias::Entity as Materias;
use crate::errors::{Result, TrackError};
use crate::models::comisiones::{
    entities::{Comision, ComisionContext},
    requests::{CreateComisionRequest, UpdateComisionRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建分组
    pub async fn create_comision_impl(&self, req: CreateComisionRequest) -> Result<Comision> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            nombre: Set(req.nombre),
            materia_id: Set(req.materia_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("创建分组失败: {e}")))?;

        Ok(result.into_comision())
    }

    /// 通过 ID 获取分组
    pub async fn get_comision_by_id_impl(&self, id: i64) -> Result<Option<Comision>> {
        let result = Comisiones::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询分组失败: {e}")))?;

        Ok(result.map(|m| m.into_comision()))
    }

    /// 列出分组，可按课程筛选
    pub async fn list_comisiones_impl(&self, materia_id: Option<i64>) -> Result<Vec<Comision>> {
        let mut select = Comisiones::find();

        if let Some(materia_id) = materia_id {
            select = select.filter(Column::MateriaId.eq(materia_id));
        }

        let result = select
            .order_by_asc(Column::Nombre)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询分组列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_comision()).collect())
    }

    /// 更新分组
    pub async fn update_comision_impl(
        &self,
        id: i64,
        update: UpdateComisionRequest,
    ) -> Result<Option<Comision>> {
        if self.get_comision_by_id_impl(id).await?.is_none() {
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

        if let Some(materia_id) = update.materia_id {
            model.materia_id = Set(materia_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("更新分组失败: {e}")))?;

        self.get_comision_by_id_impl(id).await
    }

    /// 删除分组
    pub async fn delete_comision_impl(&self, id: i64) -> Result<bool> {
        let result = Comisiones::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("删除分组失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 获取分组及所属课程的名称
    pub async fn get_comision_context_impl(
        &self,
        comision_id: i64,
    ) -> Result<Option<ComisionContext>> {
        let result = Comisiones::find_by_id(comision_id)
            .find_also_related(Materias)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询分组信息失败: {e}")))?;

        Ok(result.and_then(|(comision, materia)| {
            materia.map(|materia| ComisionContext {
                comision_id: comision.id,
                comision_nombre: comision.nombre,
                materia_id: materia.id,
                materia_nombre: materia.nombre,
            })
        }))
    }
}
