//! 评估结果存储操作

use super::SeaOrmStorage;
use crate::entity::resultados_evaluacion::{ActiveModel, Column, Entity as Resultados};
use crate::errors::{Result, TrackError};
use crate::models::resultados::{
    entities::ResultadoEvaluacion,
    requests::{CreateResultadoRequest, UpdateResultadoRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建评估结果
    pub async fn create_resultado_impl(
        &self,
        req: CreateResultadoRequest,
    ) -> Result<ResultadoEvaluacion> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            nota: Set(req.nota),
            devolucion: Set(req.devolucion),
            alumno_id: Set(req.alumno_id),
            evaluacion_id: Set(req.evaluacion_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("创建评估结果失败: {e}")))?;

        Ok(result.into_resultado())
    }

    /// 通过 ID 获取评估结果
    pub async fn get_resultado_by_id_impl(&self, id: i64) -> Result<Option<ResultadoEvaluacion>> {
        let result = Resultados::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询评估结果失败: {e}")))?;

        Ok(result.map(|m| m.into_resultado()))
    }

    /// 列出评估结果，可按学生或评估筛选
    pub async fn list_resultados_impl(
        &self,
        alumno_id: Option<i64>,
        evaluacion_id: Option<i64>,
    ) -> Result<Vec<ResultadoEvaluacion>> {
        let mut select = Resultados::find();

        if let Some(alumno_id) = alumno_id {
            select = select.filter(Column::AlumnoId.eq(alumno_id));
        }

        if let Some(evaluacion_id) = evaluacion_id {
            select = select.filter(Column::EvaluacionId.eq(evaluacion_id));
        }

        let result = select
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询评估结果列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_resultado()).collect())
    }

    /// 更新评估结果
    pub async fn update_resultado_impl(
        &self,
        id: i64,
        update: UpdateResultadoRequest,
    ) -> Result<Option<ResultadoEvaluacion>> {
        if self.get_resultado_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(nota) = update.nota {
            model.nota = Set(nota);
        }
        if let Some(devolucion) = update.devolucion {
            model.devolucion = Set(Some(devolucion));
        }
        if let Some(alumno_id) = update.alumno_id {
            model.alumno_id = Set(alumno_id);
        }
        if let Some(evaluacion_id) = update.evaluacion_id {
            model.evaluacion_id = Set(evaluacion_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("更新评估结果失败: {e}")))?;

        self.get_resultado_by_id_impl(id).await
    }

    /// 删除评估结果
    pub async fn delete_resultado_impl(&self, id: i64) -> Result<bool> {
        let result = Resultados::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("删除评估结果失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
