//! 选课解析
//!
//! 把课程或分组解析为去重后的学生 ID 列表，供通知群发使用。

use super::SeaOrmStorage;
use crate::entity::{comisiones, cursadas};
use crate::errors::{Result, TrackError};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 选修了该课程任一分组的学生（去重）
    pub async fn list_alumno_ids_by_materia_impl(&self, materia_id: i64) -> Result<Vec<i64>> {
        cursadas::Entity::find()
            .select_only()
            .column(cursadas::Column::AlumnoId)
            .distinct()
            .inner_join(comisiones::Entity)
            .filter(comisiones::Column::MateriaId.eq(materia_id))
            .order_by_asc(cursadas::Column::AlumnoId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("解析课程学生失败: {e}")))
    }

    /// 选修了该分组的学生（去重）
    pub async fn list_alumno_ids_by_comision_impl(&self, comision_id: i64) -> Result<Vec<i64>> {
        cursadas::Entity::find()
            .select_only()
            .column(cursadas::Column::AlumnoId)
            .distinct()
            .filter(cursadas::Column::ComisionId.eq(comision_id))
            .order_by_asc(cursadas::Column::AlumnoId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("解析分组学生失败: {e}")))
    }

    /// 学生是否选修了该分组
    pub async fn alumno_enrolled_in_comision_impl(
        &self,
        alumno_id: i64,
        comision_id: i64,
    ) -> Result<bool> {
        let count = cursadas::Entity::find()
            .filter(cursadas::Column::AlumnoId.eq(alumno_id))
            .filter(cursadas::Column::ComisionId.eq(comision_id))
            .count(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询选课关系失败: {e}")))?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Storage;
    use crate::test_support;

    #[actix_web::test]
    async fn test_materia_resolution_is_distinct() {
        let storage = test_support::storage().await;
        let materia = test_support::seed_materia(&storage, "Algoritmos").await;
        let c1 = test_support::seed_comision(&storage, materia.id, "K1001").await;
        let c2 = test_support::seed_comision(&storage, materia.id, "K1002").await;
        let ana = test_support::seed_alumno(&storage, "ana@uni.edu", "A-1").await;
        let luis = test_support::seed_alumno(&storage, "luis@uni.edu", "A-2").await;

        // Ana cursa en ambas comisiones
        test_support::enroll(&storage, ana.id, c1.id).await;
        test_support::enroll(&storage, ana.id, c2.id).await;
        test_support::enroll(&storage, luis.id, c2.id).await;

        let ids = storage.list_alumno_ids_by_materia(materia.id).await.unwrap();
        assert_eq!(ids, vec![ana.id, luis.id]);

        let ids = storage.list_alumno_ids_by_comision(c1.id).await.unwrap();
        assert_eq!(ids, vec![ana.id]);

        assert!(storage.alumno_enrolled_in_comision(luis.id, c2.id).await.unwrap());
        assert!(!storage.alumno_enrolled_in_comision(luis.id, c1.id).await.unwrap());

        let vacia = test_support::seed_materia(&storage, "Sin inscriptos").await;
        assert!(storage.list_alumno_ids_by_materia(vacia.id).await.unwrap().is_empty());
    }
}
