//! 分组实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comisiones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    pub materia_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::materias::Entity",
        from = "Column::MateriaId",
        to = "super::materias::Column::Id"
    )]
    Materia,
    #[sea_orm(has_many = "super::cursadas::Entity")]
    Cursadas,
    #[sea_orm(has_many = "super::tps::Entity")]
    Tps,
    #[sea_orm(has_many = "super::evaluaciones::Entity")]
    Evaluaciones,
}

impl Related<super::materias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materia.def()
    }
}

impl Related<super::cursadas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cursadas.def()
    }
}

impl Related<super::tps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tps.def()
    }
}

impl Related<super::evaluaciones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluaciones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_comision(self) -> crate::models::comisiones::entities::Comision {
        crate::models::comisiones::entities::Comision {
            id: self.id,
            nombre: self.nombre,
            materia_id: self.materia_id,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
