//! 提交附件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "archivos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub entrega_id: i64,
    pub filename: String,
    pub original_name: String,
    pub file_path: String,
    pub content_type: String,
    pub size: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::entregas::Entity",
        from = "Column::EntregaId",
        to = "super::entregas::Column::Id"
    )]
    Entrega,
}

impl Related<super::entregas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entrega.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_archivo(self) -> crate::models::entregas::entities::Archivo {
        crate::models::entregas::entities::Archivo {
            id: self.id,
            entrega_id: self.entrega_id,
            filename: self.filename,
            original_name: self.original_name,
            file_path: self.file_path,
            content_type: self.content_type,
            size: self.size,
            created_at: super::ts_to_datetime(self.created_at),
        }
    }
}
