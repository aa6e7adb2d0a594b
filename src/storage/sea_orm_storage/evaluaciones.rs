//! 评估存储操作

use super::SeaOrmStorage;
use crate::entity::evaluaciones::{ActiveModel, Column, Entity as Evaluaciones};
use crate::errors::{Result, TrackError};
use crate::models::evaluaciones::{
    entities::Evaluacion,
    requests::{CreateEvaluacionRequest, UpdateEvaluacionRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建评估
    pub async fn create_evaluacion_impl(
        &self,
        req: CreateEvaluacionRequest,
    ) -> Result<Evaluacion> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            fecha_evaluacion: Set(req.fecha_evaluacion),
            temas: Set(req.temas),
            observaciones: Set(req.observaciones),
            comision_id: Set(req.comision_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("创建评估失败: {e}")))?;

        Ok(result.into_evaluacion())
    }

    /// 通过 ID 获取评估
    pub async fn get_evaluacion_by_id_impl(&self, id: i64) -> Result<Option<Evaluacion>> {
        let result = Evaluaciones::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询评估失败: {e}")))?;

        Ok(result.map(|m| m.into_evaluacion()))
    }

    /// 列出评估，可按分组筛选；日期为 YYYY-MM-DD，字符串排序即时间排序
    pub async fn list_evaluaciones_impl(
        &self,
        comision_id: Option<i64>,
    ) -> Result<Vec<Evaluacion>> {
        let mut select = Evaluaciones::find();

        if let Some(comision_id) = comision_id {
            select = select.filter(Column::ComisionId.eq(comision_id));
        }

        let result = select
            .order_by_asc(Column::FechaEvaluacion)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询评估列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_evaluacion()).collect())
    }

    /// 更新评估
    pub async fn update_evaluacion_impl(
        &self,
        id: i64,
        update: UpdateEvaluacionRequest,
    ) -> Result<Option<Evaluacion>> {
        if self.get_evaluacion_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(fecha_evaluacion) = update.fecha_evaluacion {
            model.fecha_evaluacion = Set(fecha_evaluacion);
        }
        if let Some(temas) = update.temas {
            model.temas = Set(temas);
        }
        if let Some(observaciones) = update.observaciones {
            model.observaciones = Set(Some(observaciones));
        }
        if let Some(comision_id) = update.comision_id {
            model.comision_id = Set(comision_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("更新评估失败: {e}")))?;

        self.get_evaluacion_by_id_impl(id).await
    }

    /// 删除评估
    pub async fn delete_evaluacion_impl(&self, id: i64) -> Result<bool> {
        let result = Evaluaciones::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("删除评估失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
