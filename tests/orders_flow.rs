use artmarket_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::{
        admin::{ApproveArtistRequest, RejectArtistRequest},
        artists::{ArtistRegisterRequest, ArtistStatusView, SampleInput},
        artworks::CreateArtworkRequest,
        orders::{CreateOrderRequest, ShipOrderRequest},
    },
    entity::{
        Artists, Artworks, AuditLogs, Orders, Transactions, audit_logs,
        orders::{ActiveModel as OrderActive, Column as OrderCol},
        transactions::Column as TransactionCol,
        sea_orm_active_enums::{
            ArtistStatus, ArtworkStatus, PaymentMethod, PaymentStatus, ShippingStatus,
            TransactionStatus, UserRole,
        },
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::Artwork,
    routes::params::ArtistOrderQuery,
    services::{admin_service, artist_service, artwork_service, order_service},
    state::AppState,
};
use chrono::{Duration, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

// Artist applies, admin approves, artist lists a piece, buyer orders it,
// artist ships and delivers, the payout is settled.
#[tokio::test]
async fn purchase_ship_and_deliver_flow() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let admin = create_user(&state, UserRole::Admin, "admin").await?;
    let buyer = create_user(&state, UserRole::Buyer, "buyer").await?;

    let registration = artist_service::register_artist(&state, artist_request(&unique_email("nora")))
        .await?
        .data
        .expect("registration");
    assert_eq!(registration.artist.status, ArtistStatus::Pending);
    assert_eq!(registration.artist.commission_rate, 25);
    assert_eq!(registration.samples.len(), 3);

    let artist = AuthUser {
        user_id: registration.user.id,
        role: UserRole::Artist,
    };

    // Pending artists cannot list work yet.
    let err = artwork_service::create_artwork(&state, &artist, artwork_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let approved = admin_service::approve_artist(
        &state,
        &admin,
        registration.artist.id,
        ApproveArtistRequest {
            commission_rate: Some(20),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("approved artist");
    assert_eq!(approved.status, ArtistStatus::Approved);
    assert_eq!(approved.commission_rate, 20);
    assert_eq!(approved.approved_by, Some(admin.user_id));

    // A second decision on the same application is refused.
    let err = admin_service::approve_artist(
        &state,
        &admin,
        registration.artist.id,
        ApproveArtistRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let artwork = artwork_service::create_artwork(&state, &artist, artwork_request())
        .await?
        .data
        .expect("artwork");
    assert_eq!(artwork.status, ArtworkStatus::Available);
    assert_eq!(artwork.main_image.as_deref(), Some("https://img.example.com/dunes-1.jpg"));

    let first = artwork_service::show_artwork(&state, artwork.id).await?.data.expect("view");
    let second = artwork_service::show_artwork(&state, artwork.id).await?.data.expect("view");
    assert_eq!(first.views, 1);
    assert_eq!(second.views, 2);
    assert!(second.artist.is_some());

    let order = order_service::create_order(&state, &buyer, order_request(artwork.id))
        .await?
        .data
        .expect("order");
    assert_eq!(order.order.total_amount, 1500);
    assert_eq!(order.order.commission, 300);
    assert_eq!(order.order.artist_earnings, 1200);
    assert_eq!(order.order.payment_status, PaymentStatus::Completed);
    assert_eq!(order.order.shipping_status, ShippingStatus::Pending);
    assert!(order.order.payment_id.as_deref().is_some_and(|id| id.starts_with("PAY_")));
    assert!(order.can_ship);
    assert!(!order.can_deliver);
    let settlement = order.transaction.as_ref().expect("pending transaction");
    assert_eq!(settlement.status, TransactionStatus::Pending);
    assert_eq!(settlement.net_amount, 1200);

    let sold = Artworks::find_by_id(artwork.id).one(&state.orm).await?.expect("artwork row");
    assert_eq!(sold.status, ArtworkStatus::Sold);
    let profile = Artists::find_by_id(approved.id).one(&state.orm).await?.expect("artist row");
    assert_eq!(profile.total_sales, 1500);

    // Sold work is gone from the catalog and cannot be bought twice.
    let err = order_service::create_order(&state, &buyer, order_request(artwork.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    let err = artwork_service::show_artwork(&state, artwork.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Delivery before shipping is a state error.
    let err = order_service::deliver_order(&state, &artist, order.order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let listed = order_service::list_managed_orders(
        &state,
        &artist,
        ArtistOrderQuery {
            page: None,
            per_page: None,
            shipping_status: Some(ShippingStatus::Pending),
        },
    )
    .await?;
    assert_eq!(listed.data.expect("orders").items.len(), 1);

    let shipped = order_service::ship_order(
        &state,
        &artist,
        order.order.id,
        ShipOrderRequest {
            tracking_number: "TRK1".into(),
        },
    )
    .await?
    .data
    .expect("shipped");
    assert_eq!(shipped.order.shipping_status, ShippingStatus::Shipped);
    assert_eq!(shipped.order.tracking_number.as_deref(), Some("TRK1"));
    assert!(shipped.can_deliver);

    let err = order_service::ship_order(
        &state,
        &artist,
        order.order.id,
        ShipOrderRequest {
            tracking_number: "TRK2".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // Buyers only see their own orders.
    let stranger = create_user(&state, UserRole::Buyer, "stranger").await?;
    let err = order_service::buyer_order(&state, &stranger, order.order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let delivered = order_service::deliver_order(&state, &artist, order.order.id)
        .await?
        .data
        .expect("delivered");
    assert_eq!(delivered.order.shipping_status, ShippingStatus::Delivered);
    assert!(delivered.order.delivered_at.is_some());
    assert!(!delivered.can_ship);
    assert!(!delivered.can_deliver);
    let settlement = delivered.transaction.expect("settled transaction");
    assert_eq!(settlement.status, TransactionStatus::Completed);
    assert!(settlement.transfer_date.is_some());
    assert_eq!(settlement.amount, 1500);
    assert_eq!(settlement.commission, 300);

    let seen = order_service::buyer_order(&state, &buyer, order.order.id)
        .await?
        .data
        .expect("buyer order");
    assert_eq!(seen.order.shipping_status, ShippingStatus::Delivered);

    let trail: Vec<String> = AuditLogs::find()
        .filter(audit_logs::Column::UserId.eq(artist.user_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    for action in ["artist_register", "artwork_create", "order_ship", "order_deliver"] {
        assert!(trail.iter().any(|a| a == action), "missing audit action {action}");
    }

    Ok(())
}

#[tokio::test]
async fn rejected_artist_waits_thirty_days() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let admin = create_user(&state, UserRole::Admin, "reviewer").await?;
    let registration = artist_service::register_artist(&state, artist_request(&unique_email("applicant")))
        .await?
        .data
        .expect("registration");

    let before = Utc::now();
    let rejected = admin_service::reject_artist(
        &state,
        &admin,
        registration.artist.id,
        RejectArtistRequest {
            reason: "Portfolio too small".into(),
            notes_admin: None,
        },
    )
    .await?
    .data
    .expect("rejected artist");
    let after = Utc::now();

    assert_eq!(rejected.status, ArtistStatus::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("Portfolio too small"));
    let reapply = rejected.can_reapply_at.expect("reapply date");
    assert!(reapply >= before + Duration::days(30));
    assert!(reapply <= after + Duration::days(30));

    let artist = AuthUser {
        user_id: registration.user.id,
        role: UserRole::Artist,
    };
    let view = artist_service::application_status(&state, &artist)
        .await?
        .data
        .expect("status view");
    match view {
        ArtistStatusView::Rejected { can_reapply_now, .. } => assert!(!can_reapply_now),
        other => panic!("expected rejected view, got {other:?}"),
    }

    let err = artwork_service::create_artwork(&state, &artist, artwork_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    Ok(())
}

// A failing settlement insert must undo the order, the sale and the sales total.
#[tokio::test]
async fn failed_order_leaves_no_trace() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let admin = create_user(&state, UserRole::Admin, "admin").await?;
    let buyer = create_user(&state, UserRole::Buyer, "buyer").await?;
    let (_, artist_id, artwork) = listed_artwork(&state, &admin).await?;

    // Reject settlement rows for this artist only, so parallel tests are unaffected.
    let guard = format!("block_settlement_{}", artist_id.simple());
    sqlx::query(&format!(
        "CREATE FUNCTION {guard}() RETURNS trigger AS $$ \
         BEGIN RAISE EXCEPTION 'settlement insert blocked'; END; \
         $$ LANGUAGE plpgsql"
    ))
    .execute(&state.pool)
    .await?;
    sqlx::query(&format!(
        "CREATE TRIGGER {guard} BEFORE INSERT ON transactions FOR EACH ROW \
         WHEN (NEW.artist_id = '{artist_id}') EXECUTE FUNCTION {guard}()"
    ))
    .execute(&state.pool)
    .await?;

    let result = order_service::create_order(&state, &buyer, order_request(artwork.id)).await;

    sqlx::query(&format!("DROP TRIGGER {guard} ON transactions"))
        .execute(&state.pool)
        .await?;
    sqlx::query(&format!("DROP FUNCTION {guard}()"))
        .execute(&state.pool)
        .await?;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::OrmError(_)), "unexpected error {err:?}");

    let orders = Orders::find()
        .filter(OrderCol::ArtworkId.eq(artwork.id))
        .count(&state.orm)
        .await?;
    assert_eq!(orders, 0);
    let settlements = Transactions::find()
        .filter(TransactionCol::ArtistId.eq(artist_id))
        .count(&state.orm)
        .await?;
    assert_eq!(settlements, 0);
    let stored = Artworks::find_by_id(artwork.id).one(&state.orm).await?.expect("artwork row");
    assert_eq!(stored.status, ArtworkStatus::Available);
    let profile = Artists::find_by_id(artist_id).one(&state.orm).await?.expect("artist row");
    assert_eq!(profile.total_sales, 0);

    // With the trigger gone the same purchase goes through.
    let order = order_service::create_order(&state, &buyer, order_request(artwork.id))
        .await?
        .data
        .expect("order");
    assert_eq!(order.order.artwork_id, artwork.id);

    Ok(())
}

#[tokio::test]
async fn unpaid_order_cannot_ship() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let admin = create_user(&state, UserRole::Admin, "admin").await?;
    let buyer = create_user(&state, UserRole::Buyer, "buyer").await?;
    let (artist, _, artwork) = listed_artwork(&state, &admin).await?;

    let order = order_service::create_order(&state, &buyer, order_request(artwork.id))
        .await?
        .data
        .expect("order")
        .order;

    let stored = Orders::find_by_id(order.id).one(&state.orm).await?.expect("order row");
    let mut active: OrderActive = stored.into();
    active.payment_status = Set(PaymentStatus::Pending);
    active.update(&state.orm).await?;

    let err = order_service::ship_order(
        &state,
        &artist,
        order.id,
        ShipOrderRequest {
            tracking_number: "TRK9".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let stored = Orders::find_by_id(order.id).one(&state.orm).await?.expect("order row");
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
    assert_eq!(stored.shipping_status, ShippingStatus::Pending);
    assert_eq!(stored.tracking_number, None);

    Ok(())
}

/// Registers and approves a fresh artist, then lists one artwork for them.
async fn listed_artwork(
    state: &AppState,
    admin: &AuthUser,
) -> anyhow::Result<(AuthUser, Uuid, Artwork)> {
    let registration = artist_service::register_artist(state, artist_request(&unique_email("artist")))
        .await?
        .data
        .expect("registration");
    admin_service::approve_artist(
        state,
        admin,
        registration.artist.id,
        ApproveArtistRequest::default(),
    )
    .await?;

    let artist = AuthUser {
        user_id: registration.user.id,
        role: UserRole::Artist,
    };
    let artwork = artwork_service::create_artwork(state, &artist, artwork_request())
        .await?
        .data
        .expect("artwork");
    Ok((artist, registration.artist.id, artwork))
}

/// Connects to TEST_DATABASE_URL (or DATABASE_URL); `None` skips the test.
/// Fixtures use fresh emails so tests can share the database.
async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let Ok(database_url) =
        std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL"))
    else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests.");
        return Ok(None);
    };

    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;

    let config = AppConfig {
        database_url,
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "flow-test-secret".into(),
        token_ttl_hours: 1,
        debug: true,
    };
    Ok(Some(AppState::new(pool, &config)))
}

fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4().simple())
}

async fn create_user(state: &AppState, role: UserRole, prefix: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(format!("{role:?} user")),
        email: Set(unique_email(prefix)),
        password_hash: Set("not-a-real-hash".into()),
        role: Set(role),
        email_verified: Set(true),
        avatar_url: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role,
    })
}

fn artist_request(email: &str) -> ArtistRegisterRequest {
    ArtistRegisterRequest {
        name: "Nora Alharbi".into(),
        email: email.into(),
        password: "dunes-and-ink".into(),
        phone: "0551234567".into(),
        city: "Riyadh".into(),
        bio: "Ink and watercolour studies of the Najd desert.".into(),
        samples: (1..=3)
            .map(|n| SampleInput {
                title: format!("Study {n}"),
                description: None,
                image_url: format!("https://img.example.com/sample-{n}.jpg"),
            })
            .collect(),
    }
}

fn artwork_request() -> CreateArtworkRequest {
    CreateArtworkRequest {
        title: "Dunes at Dusk".into(),
        description: "Watercolour on cotton paper.".into(),
        price: 1500,
        category: "painting".into(),
        dimensions: Some("50x70 cm".into()),
        materials: None,
        images: vec![
            "https://img.example.com/dunes-1.jpg".into(),
            "https://img.example.com/dunes-2.jpg".into(),
        ],
    }
}

fn order_request(artwork_id: Uuid) -> CreateOrderRequest {
    CreateOrderRequest {
        artwork_id,
        payment_method: PaymentMethod::ApplePay,
        buyer_name: "Huda".into(),
        buyer_phone: "0559876543".into(),
        shipping_address: "Olaya St, Riyadh".into(),
    }
}
