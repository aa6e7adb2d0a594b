//! 作业（TP）实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub consigna: String,
    pub fecha_entrega: i64,
    pub vigente: bool,
    pub comision_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::comisiones::Entity",
        from = "Column::ComisionId",
        to = "super::comisiones::Column::Id"
    )]
    Comision,
    #[sea_orm(has_many = "super::entregas::Entity")]
    Entregas,
}

impl Related<super::comisiones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comision.def()
    }
}

impl Related<super::entregas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entregas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_tp(self) -> crate::models::tps::entities::Tp {
        crate::models::tps::entities::Tp {
            id: self.id,
            consigna: self.consigna,
            fecha_entrega: super::ts_to_datetime(self.fecha_entrega),
            vigente: self.vigente,
            comision_id: self.comision_id,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
