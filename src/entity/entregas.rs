//! 作业提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entregas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub alumno_id: i64,
    pub tp_id: i64,
    pub fecha_hora: i64,
    pub nota: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub devolucion: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::alumnos::Entity",
        from = "Column::AlumnoId",
        to = "super::alumnos::Column::Id"
    )]
    Alumno,
    #[sea_orm(
        belongs_to = "super::tps::Entity",
        from = "Column::TpId",
        to = "super::tps::Column::Id"
    )]
    Tp,
    #[sea_orm(has_many = "super::archivos::Entity")]
    Archivos,
}

impl Related<super::alumnos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alumno.def()
    }
}

impl Related<super::tps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tp.def()
    }
}

impl Related<super::archivos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Archivos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_entrega(self) -> crate::models::entregas::entities::Entrega {
        crate::models::entregas::entities::Entrega {
            id: self.id,
            alumno_id: self.alumno_id,
            tp_id: self.tp_id,
            fecha_hora: super::ts_to_datetime(self.fecha_hora),
            nota: self.nota,
            devolucion: self.devolucion,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
