//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::cursadas::{ActiveModel, Column, Entity as Cursadas};
use crate::errors::{Result, TrackError};
use crate::models::cursadas::{
    entities::Cursada,
    requests::{CreateCursadaRequest, UpdateCursadaRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建选课记录
    pub async fn create_cursada_impl(&self, req: CreateCursadaRequest) -> Result<Cursada> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            alumno_id: Set(req.alumno_id),
            comision_id: Set(req.comision_id),
            ano_lectivo: Set(req.ano_lectivo),
            nota_final: Set(req.nota_final),
            nota_conceptual: Set(req.nota_conceptual),
            feedback: Set(req.feedback),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("创建选课记录失败: {e}")))?;

        Ok(result.into_cursada())
    }

    /// 通过 ID 获取选课记录
    pub async fn get_cursada_by_id_impl(&self, id: i64) -> Result<Option<Cursada>> {
        let result = Cursadas::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_cursada()))
    }

    /// 列出选课记录，可按学生筛选
    pub async fn list_cursadas_impl(&self, alumno_id: Option<i64>) -> Result<Vec<Cursada>> {
        let mut select = Cursadas::find();

        if let Some(alumno_id) = alumno_id {
            select = select.filter(Column::AlumnoId.eq(alumno_id));
        }

        let result = select
            .order_by_desc(Column::AnoLectivo)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_cursada()).collect())
    }

    /// 更新选课记录
    pub async fn update_cursada_impl(
        &self,
        id: i64,
        update: UpdateCursadaRequest,
    ) -> Result<Option<Cursada>> {
        if self.get_cursada_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(ano_lectivo) = update.ano_lectivo {
            model.ano_lectivo = Set(ano_lectivo);
        }
        if let Some(nota_final) = update.nota_final {
            model.nota_final = Set(Some(nota_final));
        }
        if let Some(nota_conceptual) = update.nota_conceptual {
            model.nota_conceptual = Set(Some(nota_conceptual));
        }
        if let Some(feedback) = update.feedback {
            model.feedback = Set(Some(feedback));
        }
        if let Some(alumno_id) = update.alumno_id {
            model.alumno_id = Set(alumno_id);
        }
        if let Some(comision_id) = update.comision_id {
            model.comision_id = Set(comision_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("更新选课记录失败: {e}")))?;

        self.get_cursada_by_id_impl(id).await
    }

    /// 删除选课记录
    pub async fn delete_cursada_impl(&self, id: i64) -> Result<bool> {
        let result = Cursadas::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("删除选课记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
