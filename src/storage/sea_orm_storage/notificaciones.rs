//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notificaciones::{ActiveModel, Column, Entity as Notificaciones};
use crate::errors::{Result, TrackError};
use crate::models::notificaciones::{
    entities::{NewNotificacion, Notificacion},
    requests::UpdateNotificacionRequest,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建单条通知
    pub async fn create_notificacion_impl(
        &self,
        notificacion: NewNotificacion,
    ) -> Result<Notificacion> {
        let result = to_active_model(notificacion)
            .insert(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("创建通知失败: {e}")))?;

        Ok(result.into_notificacion())
    }

    /// 批量创建通知，单条 INSERT 写入
    pub async fn create_notificaciones_impl(
        &self,
        notificaciones: Vec<NewNotificacion>,
    ) -> Result<u64> {
        if notificaciones.is_empty() {
            return Ok(0);
        }

        let count = notificaciones.len() as u64;
        let models: Vec<ActiveModel> = notificaciones.into_iter().map(to_active_model).collect();

        Notificaciones::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("批量创建通知失败: {e}")))?;

        Ok(count)
    }

    /// 通过 ID 获取通知
    pub async fn get_notificacion_by_id_impl(&self, id: i64) -> Result<Option<Notificacion>> {
        let result = Notificaciones::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询通知失败: {e}")))?;

        Ok(result.map(|m| m.into_notificacion()))
    }

    /// 列出全部通知，最新的在前
    pub async fn list_notificaciones_impl(&self) -> Result<Vec<Notificacion>> {
        let result = Notificaciones::find()
            .order_by_desc(Column::FechaHora)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_notificacion()).collect())
    }

    /// 列出学生的通知，可按已读状态筛选
    pub async fn list_notificaciones_by_alumno_impl(
        &self,
        alumno_id: i64,
        leida: Option<bool>,
    ) -> Result<Vec<Notificacion>> {
        let mut select = Notificaciones::find().filter(Column::AlumnoId.eq(alumno_id));

        if let Some(leida) = leida {
            select = select.filter(Column::Leida.eq(leida));
        }

        let result = select
            .order_by_desc(Column::FechaHora)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询学生通知失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_notificacion()).collect())
    }

    /// 更新通知
    pub async fn update_notificacion_impl(
        &self,
        id: i64,
        update: UpdateNotificacionRequest,
    ) -> Result<Option<Notificacion>> {
        if self.get_notificacion_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };

        if let Some(mensaje) = update.mensaje {
            model.mensaje = Set(mensaje);
        }
        if let Some(fecha_hora) = update.fecha_hora {
            model.fecha_hora = Set(fecha_hora.timestamp());
        }
        if let Some(leida) = update.leida {
            model.leida = Set(leida);
        }
        if let Some(alumno_id) = update.alumno_id {
            model.alumno_id = Set(alumno_id);
        }

        // 没有任何字段需要更新时直接返回现有记录
        if model.is_changed() {
            model
                .update(&self.db)
                .await
                .map_err(|e| TrackError::database_operation(format!("更新通知失败: {e}")))?;
        }

        self.get_notificacion_by_id_impl(id).await
    }

    /// 标记通知为已读，已读的通知不会再次写入
    pub async fn mark_notificacion_read_impl(&self, id: i64) -> Result<bool> {
        let result = Notificaciones::update_many()
            .col_expr(Column::Leida, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::Leida.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 标记学生所有未读通知为已读
    pub async fn mark_all_notificaciones_read_impl(&self, alumno_id: i64) -> Result<u64> {
        let result = Notificaciones::update_many()
            .col_expr(Column::Leida, sea_orm::sea_query::Expr::value(true))
            .filter(Column::AlumnoId.eq(alumno_id))
            .filter(Column::Leida.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| {
                TrackError::database_operation(format!("标记全部通知已读失败: {e}"))
            })?;

        Ok(result.rows_affected)
    }

    /// 删除通知
    pub async fn delete_notificacion_impl(&self, id: i64) -> Result<bool> {
        let result = Notificaciones::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("删除通知失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

fn to_active_model(notificacion: NewNotificacion) -> ActiveModel {
    ActiveModel {
        alumno_id: Set(notificacion.alumno_id),
        mensaje: Set(notificacion.mensaje),
        fecha_hora: Set(notificacion.fecha_hora.timestamp()),
        leida: Set(false),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Storage;
    use crate::test_support;

    #[actix_web::test]
    async fn test_bulk_insert_and_read_state() {
        let storage = test_support::storage().await;
        let ana = test_support::seed_alumno(&storage, "ana@uni.edu", "A-1").await;

        let batch = (0..3)
            .map(|i| test_support::new_notificacion(ana.id, &format!("aviso {i}")))
            .collect();
        assert_eq!(storage.create_notificaciones(batch).await.unwrap(), 3);
        assert_eq!(storage.create_notificaciones(Vec::new()).await.unwrap(), 0);

        let unread = storage
            .list_notificaciones_by_alumno(ana.id, Some(false))
            .await
            .unwrap();
        assert_eq!(unread.len(), 3);

        // 第二次标记不产生写入
        assert!(storage.mark_notificacion_read(unread[0].id).await.unwrap());
        assert!(!storage.mark_notificacion_read(unread[0].id).await.unwrap());

        assert_eq!(storage.mark_all_notificaciones_read(ana.id).await.unwrap(), 2);
        assert_eq!(storage.mark_all_notificaciones_read(ana.id).await.unwrap(), 0);
        assert!(
            storage
                .list_notificaciones_by_alumno(ana.id, Some(false))
                .await
                .unwrap()
                .is_empty()
        );
    }
}
