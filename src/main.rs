use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vendor_market::{
    config::{database, settings},
    core::{report, seed},
    errors::Result,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load settings and seed data
    let settings = settings::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(policy = ?settings.audit.policy, "Loaded configuration");

    // 4. Connect and create the schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Seed an empty database
    seed::apply_seed(&db, &settings.seed)
        .await
        .inspect_err(|e| error!("Failed to seed database: {}", e))?;

    // 6. Print the listings
    println!("== Log");
    for row in report::show_log(&db).await? {
        println!("{}", report::render_log_entry(&row));
    }
    println!("== Locations");
    for row in report::show_location(&db).await? {
        println!("{}", report::render_location(&row));
    }
    println!("== Orders");
    for row in report::show_order(&db).await? {
        println!("{}", report::render_order(&row));
    }
    println!("== Menu");
    for row in report::show_menu(&db).await? {
        println!("{}", report::render_menu(&row));
    }

    Ok(())
}
