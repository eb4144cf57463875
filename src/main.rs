mod model;
mod server;

use tokio::net::TcpListener;

use crate::server::{
    app::{build_application, ApplicationOptions},
    config::{resolve_settings, Settings},
    error::AppError,
    lifecycle::DEFAULT_BLOCKING_POOL_SIZE,
    router,
    session::make_session_factory,
    startup::{self, PoolOptions},
    state::AppState,
};

fn main() -> Result<(), AppError> {
    startup::init_tracing();

    let settings = resolve_settings()?;

    let runtime = startup::build_runtime(DEFAULT_BLOCKING_POOL_SIZE)?;

    runtime.block_on(run(settings))
}

async fn run(settings: Settings) -> Result<(), AppError> {
    tracing::info!(
        "Starting {} {} in the {} environment",
        settings.app.name,
        settings.app.version,
        settings.environment.environment
    );

    let engine =
        startup::build_engine(&settings.database, PoolOptions::single_connection()).await?;
    let sessions = make_session_factory(engine.clone());

    let routes = router::router().with_state(AppState::new(engine.clone(), sessions));

    // Tables are created by the lifespan while the application starts.
    let app = build_application(
        routes,
        &settings,
        ApplicationOptions::default()
            .create_tables_on_start(true)
            .blocking_pool_size(DEFAULT_BLOCKING_POOL_SIZE)
            .with_engine(engine),
    );

    let listener = TcpListener::bind(settings.server.address()).await?;

    app.serve(listener, startup::shutdown_signal()).await
}
