//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alumnos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub legajo: String,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cursadas::Entity")]
    Cursadas,
    #[sea_orm(has_many = "super::entregas::Entity")]
    Entregas,
    #[sea_orm(has_many = "super::notificaciones::Entity")]
    Notificaciones,
    #[sea_orm(has_many = "super::resultados_evaluacion::Entity")]
    ResultadosEvaluacion,
}

impl Related<super::cursadas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cursadas.def()
    }
}

impl Related<super::entregas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entregas.def()
    }
}

impl Related<super::notificaciones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notificaciones.def()
    }
}

impl Related<super::resultados_evaluacion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResultadosEvaluacion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_usuario(self) -> crate::models::usuarios::entities::Usuario {
        use crate::models::{auth::Role, usuarios::entities::Usuario};

        Usuario {
            id: self.id,
            role: Role::Alumno,
            nombre: self.nombre,
            apellido: self.apellido,
            email: self.email,
            legajo: Some(self.legajo),
            password_hash: self.password_hash,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
