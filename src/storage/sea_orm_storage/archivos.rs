//! 附件存储操作

use super::SeaOrmStorage;
use crate::entity::archivos::{ActiveModel, Column, Entity as Archivos};
use crate::errors::{Result, TrackError};
use crate::models::entregas::{entities::Archivo, requests::NewArchivo};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 记录已落盘的附件
    pub async fn create_archivo_impl(&self, archivo: NewArchivo) -> Result<Archivo> {
        let model = ActiveModel {
            entrega_id: Set(archivo.entrega_id),
            filename: Set(archivo.filename),
            original_name: Set(archivo.original_name),
            file_path: Set(archivo.file_path),
            content_type: Set(archivo.content_type),
            size: Set(archivo.size),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("创建附件记录失败: {e}")))?;

        Ok(result.into_archivo())
    }

    /// 通过 ID 获取附件
    pub async fn get_archivo_by_id_impl(&self, id: i64) -> Result<Option<Archivo>> {
        let result = Archivos::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询附件失败: {e}")))?;

        Ok(result.map(|m| m.into_archivo()))
    }

    /// 列出某次提交的附件
    pub async fn list_archivos_by_entrega_impl(&self, entrega_id: i64) -> Result<Vec<Archivo>> {
        let result = Archivos::find()
            .filter(Column::EntregaId.eq(entrega_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询附件列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_archivo()).collect())
    }

    /// 删除附件记录
    pub async fn delete_archivo_impl(&self, id: i64) -> Result<bool> {
        let result = Archivos::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("删除附件记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
