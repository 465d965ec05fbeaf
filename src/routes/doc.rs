use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::commission::CommissionSplit,
    dto::{
        admin::{
            AdminArtworkList, AdminOrderList, ApproveArtistRequest, ArtistReview,
            ArtistReviewList, ArtworkStats, DashboardStats, OrderStats, RejectArtistRequest,
            UpdateArtworkStatusRequest,
        },
        artists::{ArtistRegisterRequest, ArtistRegistrationResponse, ArtistStatusView, SampleInput},
        artworks::{ArtworkList, Category, CreateArtworkRequest, UpdateArtworkRequest},
        auth::{LoginRequest, LoginResponse, MeResponse, RegisterRequest},
        orders::{CreateOrderRequest, OrderDetail, OrderList, ShipOrderRequest},
    },
    entity::sea_orm_active_enums::{
        ArtistStatus, ArtworkStatus, PaymentMethod, PaymentStatus, ShippingStatus,
        SubscriptionTier, TransactionStatus, UserRole,
    },
    error::ErrorResponse,
    models::{ArtistProfile, ArtistSample, ArtistSummary, Artwork, Order, Transaction, User},
    response::{ApiResponse, Meta},
    routes::{admin, artist, artists, artworks, auth, health, orders, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::current_user,
        artists::register_artist,
        artists::application_status,
        artworks::list_artworks,
        artworks::featured_artworks,
        artworks::categories,
        artworks::search_by_artist,
        artworks::show_artwork,
        artist::list_own_artworks,
        artist::create_artwork,
        artist::show_own_artwork,
        artist::update_own_artwork,
        artist::delete_own_artwork,
        artist::list_orders,
        artist::show_order,
        artist::ship_order,
        artist::deliver_order,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        admin::dashboard,
        admin::pending_artists,
        admin::artist_detail,
        admin::approve_artist,
        admin::reject_artist,
        admin::list_artworks,
        admin::artwork_detail,
        admin::update_artwork_status,
        admin::list_orders,
        admin::order_detail,
        admin::ship_order,
        admin::deliver_order
    ),
    components(
        schemas(
            User,
            ArtistProfile,
            ArtistSample,
            ArtistSummary,
            Artwork,
            Order,
            Transaction,
            UserRole,
            ArtistStatus,
            SubscriptionTier,
            ArtworkStatus,
            PaymentMethod,
            PaymentStatus,
            ShippingStatus,
            TransactionStatus,
            CommissionSplit,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            MeResponse,
            SampleInput,
            ArtistRegisterRequest,
            ArtistRegistrationResponse,
            ArtistStatusView,
            CreateArtworkRequest,
            UpdateArtworkRequest,
            ArtworkList,
            Category,
            CreateOrderRequest,
            ShipOrderRequest,
            OrderDetail,
            OrderList,
            ApproveArtistRequest,
            RejectArtistRequest,
            UpdateArtworkStatusRequest,
            ArtistReview,
            ArtistReviewList,
            DashboardStats,
            ArtworkStats,
            AdminArtworkList,
            OrderStats,
            AdminOrderList,
            params::Pagination,
            params::ArtworkSort,
            params::AdminArtworkSort,
            params::AdminOrderSort,
            ErrorResponse,
            Meta,
            ApiResponse<Artwork>,
            ApiResponse<ArtworkList>,
            ApiResponse<OrderDetail>,
            ApiResponse<OrderList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Artists", description = "Artist onboarding"),
        (name = "Artworks", description = "Public catalog"),
        (name = "Artist", description = "Approved artist catalog and fulfillment"),
        (name = "Orders", description = "Buyer orders"),
        (name = "Admin", description = "Admin review surface"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
