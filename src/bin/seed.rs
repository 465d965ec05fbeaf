use artmarket_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_user(&pool, "Platform Admin", "admin@example.com", "admin12345", "admin").await?;
    let artist_user_id =
        ensure_user(&pool, "Demo Artist", "artist@example.com", "artist12345", "artist").await?;
    let buyer_id = ensure_user(&pool, "Demo Buyer", "buyer@example.com", "buyer12345", "buyer").await?;

    let artist_id = ensure_approved_artist(&pool, artist_user_id, admin_id).await?;
    seed_artworks(&pool, artist_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, Artist ID: {artist_id}, Buyer ID: {buyer_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, email_verified)
        VALUES ($1, $2, $3, $4, $5, TRUE)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn ensure_approved_artist(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    admin_id: Uuid,
) -> anyhow::Result<Uuid> {
    let (artist_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO artists (id, user_id, status, bio, phone, city, featured, verified, approved_by)
        VALUES ($1, $2, 'approved', $3, '0551234567', 'Riyadh', TRUE, TRUE, $4)
        ON CONFLICT (user_id) DO UPDATE SET status = 'approved'
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind("Contemporary calligraphy and desert landscapes")
    .bind(admin_id)
    .fetch_one(pool)
    .await?;

    println!("Ensured approved artist {artist_id}");
    Ok(artist_id)
}

async fn seed_artworks(pool: &sqlx::PgPool, artist_id: Uuid) -> anyhow::Result<()> {
    let artworks = [
        ("Dunes at Dusk", "Oil on canvas, warm evening palette", 2500_i64, "painting"),
        ("Thuluth Study", "Ink calligraphy on handmade paper", 1800, "calligraphy"),
        ("Old Diriyah", "Archival print of mud-brick walls", 900, "photography"),
        ("Palm Geometry", "Mixed media relief with palm fronds", 4200, "mixed_media"),
    ];

    for (title, description, price, category) in artworks {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM artworks WHERE artist_id = $1 AND title = $2)",
        )
        .bind(artist_id)
        .bind(title)
        .fetch_one(pool)
        .await?;
        if exists {
            continue;
        }

        let slug = title.to_lowercase().replace(' ', "-");
        sqlx::query(
            r#"
            INSERT INTO artworks (id, artist_id, title, description, price, category, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(artist_id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(serde_json::json!([format!("https://images.example.com/{slug}.jpg")]))
        .execute(pool)
        .await?;
    }

    println!("Seeded artworks");
    Ok(())
}
