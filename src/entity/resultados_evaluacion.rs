//! 评估结果实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resultados_evaluacion")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nota: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub devolucion: Option<String>,
    pub alumno_id: i64,
    pub evaluacion_id: i64,
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
        belongs_to = "super::evaluaciones::Entity",
        from = "Column::EvaluacionId",
        to = "super::evaluaciones::Column::Id"
    )]
    Evaluacion,
}

impl Related<super::alumnos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alumno.def()
    }
}

impl Related<super::evaluaciones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluacion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_resultado(self) -> crate::models::resultados::entities::ResultadoEvaluacion {
        crate::models::resultados::entities::ResultadoEvaluacion {
            id: self.id,
            nota: self.nota,
            devolucion: self.devolucion,
            alumno_id: self.alumno_id,
            evaluacion_id: self.evaluacion_id,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
