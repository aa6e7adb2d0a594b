//! 选课实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cursadas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub alumno_id: i64,
    pub comision_id: i64,
    pub ano_lectivo: i32,
    pub nota_final: Option<f64>,
    pub nota_conceptual: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
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
        belongs_to = "super::comisiones::Entity",
        from = "Column::ComisionId",
        to = "super::comisiones::Column::Id"
    )]
    Comision,
}

impl Related<super::alumnos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alumno.def()
    }
}

impl Related<super::comisiones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comision.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_cursada(self) -> crate::models::cursadas::entities::Cursada {
        crate::models::cursadas::entities::Cursada {
            id: self.id,
            alumno_id: self.alumno_id,
            comision_id: self.comision_id,
            ano_lectivo: self.ano_lectivo,
            nota_final: self.nota_final,
            nota_conceptual: self.nota_conceptual,
            feedback: self.feedback,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
