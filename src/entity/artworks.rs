use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::ArtworkStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "artworks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub artist_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub dimensions: Option<String>,
    pub materials: Option<String>,
    /// Ordered JSON array of image URLs; the first one is the cover.
    pub images: Json,
    pub status: ArtworkStatus,
    pub views: i32,
    pub likes: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artists::Entity",
        from = "Column::ArtistId",
        to = "super::artists::Column::Id"
    )]
    Artists,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::artists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artists.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
