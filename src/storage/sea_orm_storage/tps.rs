//! TP 存储操作

use super::SeaOrmStorage;
use crate::entity::cursadas;
use crate::entity::tps::{ActiveModel, Column, Entity as Tps};
use crate::errors::{Result, TrackError};
use crate::models::tps::{
    entities::Tp,
    requests::{CreateTpRequest, UpdateTpRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建 TP，vigente 默认为 true
    pub async fn create_tp_impl(&self, req: CreateTpRequest) -> Result<Tp> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            consigna: Set(req.consigna),
            fecha_entrega: Set(req.fecha_entrega.timestamp()),
            vigente: Set(req.vigente.unwrap_or(true)),
            comision_id: Set(req.comision_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("创建 TP 失败: {e}")))?;

        Ok(result.into_tp())
    }

    /// 通过 ID 获取 TP
    pub async fn get_tp_by_id_impl(&self, id: i64) -> Result<Option<Tp>> {
        let result = Tps::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询 TP 失败: {e}")))?;

        Ok(result.map(|m| m.into_tp()))
    }

    /// 列出全部 TP
    pub async fn list_tps_impl(&self) -> Result<Vec<Tp>> {
        let result = Tps::find()
            .order_by_desc(Column::FechaEntrega)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询 TP 列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_tp()).collect())
    }

    /// 学生所在分组中仍有效的 TP，截止时间倒序
    pub async fn list_vigentes_tps_by_alumno_impl(&self, alumno_id: i64) -> Result<Vec<Tp>> {
        let comision_ids: Vec<i64> = cursadas::Entity::find()
            .select_only()
            .column(cursadas::Column::ComisionId)
            .distinct()
            .filter(cursadas::Column::AlumnoId.eq(alumno_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询学生分组失败: {e}")))?;

        if comision_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Tps::find()
            .filter(Column::ComisionId.is_in(comision_ids))
            .filter(Column::Vigente.eq(true))
            .order_by_desc(Column::FechaEntrega)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询学生 TP 失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_tp()).collect())
    }

    /// 更新 TP
    pub async fn update_tp_impl(&self, id: i64, update: UpdateTpRequest) -> Result<Option<Tp>> {
        if self.get_tp_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(consigna) = update.consigna {
            model.consigna = Set(consigna);
        }
        if let Some(fecha_entrega) = update.fecha_entrega {
            model.fecha_entrega = Set(fecha_entrega.timestamp());
        }
        if let Some(vigente) = update.vigente {
            model.vigente = Set(vigente);
        }
        if let Some(comision_id) = update.comision_id {
            model.comision_id = Set(comision_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("更新 TP 失败: {e}")))?;

        self.get_tp_by_id_impl(id).await
    }

    /// 删除 TP
    pub async fn delete_tp_impl(&self, id: i64) -> Result<bool> {
        let result = Tps::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("删除 TP 失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
