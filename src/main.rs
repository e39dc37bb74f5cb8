use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::Database;

use booknest::api::{AuthApi, HealthApi};
use booknest::app_data::AppData;
use booknest::config::{init_logging, SecretManager, Settings};
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env();
    let secrets = SecretManager::init().expect("Failed to load secrets");

    let db = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!(database_url = %settings.database_url, "connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("database migrations completed");

    let app_data = AppData::build(db, &settings, &secrets);

    let auth_api = AuthApi::new(
        app_data.auth_service.clone(),
        app_data.token_service.clone(),
    );

    let api_service = OpenApiService::new((HealthApi, auth_api), "booknest", "0.3.0")
        .server(format!("http://{}/api", settings.bind_addr));
    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!(bind_addr = %settings.bind_addr, "starting server");

    Server::new(TcpListener::bind(settings.bind_addr))
        .run(app)
        .await
}
