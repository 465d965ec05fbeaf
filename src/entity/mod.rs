pub mod artist_samples;
pub mod artists;
pub mod artworks;
pub mod audit_logs;
pub mod orders;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;

pub use artist_samples::Entity as ArtistSamples;
pub use artists::Entity as Artists;
pub use artworks::Entity as Artworks;
pub use audit_logs::Entity as AuditLogs;
pub use orders::Entity as Orders;
pub use transactions::Entity as Transactions;
pub use users::Entity as Users;
