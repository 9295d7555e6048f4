use sea_orm::Database;
use tracing::info;

use vivexa_core::config::Config;
use vivexa_core::tracing::init_tracing;
use vivexa_session::config::SessionConfig;
use vivexa_session::infra::identity::HttpIdentityProvider;
use vivexa_session::router::build_router;
use vivexa_session::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    // .env is optional; real environment variables take precedence.
    let _ = dotenvy::dotenv();
    let config = SessionConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let identity_provider = HttpIdentityProvider::new(config.identity_signout_url.clone())
        .expect("failed to build identity provider client");

    let state = AppState::new(&config, db, identity_provider);
    info!(
        super_admins = state.authorizer.authorize.allow_list.len(),
        staff_accounts = config.staff_accounts,
        "session authorization configured"
    );

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.session_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("session service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
