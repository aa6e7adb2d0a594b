//! 通知实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notificaciones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub alumno_id: i64,
    #[sea_orm(column_type = "Text")]
    pub mensaje: String,
    pub fecha_hora: i64,
    pub leida: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::alumnos::Entity",
        from = "Column::AlumnoId",
        to = "super::alumnos::Column::Id"
    )]
    Alumno,
}

impl Related<super::alumnos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alumno.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notificacion(self) -> crate::models::notificaciones::entities::Notificacion {
        crate::models::notificaciones::entities::Notificacion {
            id: self.id,
            alumno_id: self.alumno_id,
            mensaje: self.mensaje,
            fecha_hora: super::ts_to_datetime(self.fecha_hora),
            leida: self.leida,
        }
    }
}
