//! 评估实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluaciones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub fecha_evaluacion: String,
    #[sea_orm(column_type = "Text")]
    pub temas: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub observaciones: Option<String>,
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
    #[sea_orm(has_many = "super::resultados_evaluacion::Entity")]
    ResultadosEvaluacion,
}

impl Related<super::comisiones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comision.def()
    }
}

impl Related<super::resultados_evaluacion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResultadosEvaluacion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_evaluacion(self) -> crate::models::evaluaciones::entities::Evaluacion {
        crate::models::evaluaciones::entities::Evaluacion {
            id: self.id,
            fecha_evaluacion: self.fecha_evaluacion,
            temas: self.temas,
            observaciones: self.observaciones,
            comision_id: self.comision_id,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
