//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profesores")]
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
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_usuario(self) -> crate::models::usuarios::entities::Usuario {
        use crate::models::{auth::Role, usuarios::entities::Usuario};

        Usuario {
            id: self.id,
            role: Role::Profesor,
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
