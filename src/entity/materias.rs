//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materias")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub descripcion: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comisiones::Entity")]
    Comisiones,
}

impl Related<super::comisiones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comisiones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_materia(self) -> crate::models::materias::entities::Materia {
        crate::models::materias::entities::Materia {
            id: self.id,
            nombre: self.nombre,
            descripcion: self.descripcion,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
