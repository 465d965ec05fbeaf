use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{ArtistStatus, SubscriptionTier};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub status: ArtistStatus,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub commission_rate: i32,
    pub total_sales: i64,
    pub verified: bool,
    pub featured: bool,
    pub rejection_reason: Option<String>,
    pub can_reapply_at: Option<DateTimeWithTimeZone>,
    pub notes_admin: Option<String>,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::artist_samples::Entity")]
    ArtistSamples,
    #[sea_orm(has_many = "super::artworks::Entity")]
    Artworks,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::artist_samples::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtistSamples.def()
    }
}

impl Related<super::artworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artworks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
