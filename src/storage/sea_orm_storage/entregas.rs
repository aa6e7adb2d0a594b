//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::entregas::{ActiveModel, Column, Entity as Entregas};
use crate::errors::{Result, TrackError};
use crate::models::entregas::{
    entities::Entrega,
    requests::{CreateEntregaRequest, UpdateEntregaRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建提交，未给出时间时使用当前时间
    pub async fn create_entrega_impl(&self, req: CreateEntregaRequest) -> Result<Entrega> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            alumno_id: Set(req.alumno_id),
            tp_id: Set(req.tp_id),
            fecha_hora: Set(req.fecha_hora.map(|t| t.timestamp()).unwrap_or(now)),
            nota: Set(req.nota),
            devolucion: Set(req.devolucion),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_entrega())
    }

    /// 通过 ID 获取提交
    pub async fn get_entrega_by_id_impl(&self, id: i64) -> Result<Option<Entrega>> {
        let result = Entregas::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_entrega()))
    }

    /// 列出提交，可按学生筛选，最新的在前
    pub async fn list_entregas_impl(&self, alumno_id: Option<i64>) -> Result<Vec<Entrega>> {
        let mut select = Entregas::find();

        if let Some(alumno_id) = alumno_id {
            select = select.filter(Column::AlumnoId.eq(alumno_id));
        }

        let result = select
            .order_by_desc(Column::FechaHora)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_entrega()).collect())
    }

    /// 学生针对某个 TP 的最新提交
    pub async fn get_entrega_by_alumno_and_tp_impl(
        &self,
        alumno_id: i64,
        tp_id: i64,
    ) -> Result<Option<Entrega>> {
        let result = Entregas::find()
            .filter(Column::AlumnoId.eq(alumno_id))
            .filter(Column::TpId.eq(tp_id))
            .order_by_desc(Column::FechaHora)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_entrega()))
    }

    /// 更新提交
    pub async fn update_entrega_impl(
        &self,
        id: i64,
        update: UpdateEntregaRequest,
    ) -> Result<Option<Entrega>> {
        if self.get_entrega_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(fecha_hora) = update.fecha_hora {
            model.fecha_hora = Set(fecha_hora.timestamp());
        }
        if let Some(nota) = update.nota {
            model.nota = Set(Some(nota));
        }
        if let Some(devolucion) = update.devolucion {
            model.devolucion = Set(Some(devolucion));
        }
        if let Some(alumno_id) = update.alumno_id {
            model.alumno_id = Set(alumno_id);
        }
        if let Some(tp_id) = update.tp_id {
            model.tp_id = Set(tp_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("更新提交失败: {e}")))?;

        self.get_entrega_by_id_impl(id).await
    }

    /// 删除提交（附件记录级联删除，物理文件由服务层处理）
    pub async fn delete_entrega_impl(&self, id: i64) -> Result<bool> {
        let result = Entregas::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
