//! Application factory.
//!
//! [`build_application`] turns a set of business routes and a settings value
//! into a ready-to-serve [`Application`]: it seeds the OpenAPI metadata from the
//! app identity, attaches the [`Lifespan`], registers the routes and picks the
//! documentation routes according to the deployment environment. Nothing is
//! served until [`Application::serve`] is called.

use std::future::Future;

use axum::Router;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use utoipa::openapi::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::server::{
    config::SettingsGroups,
    docs,
    error::{lifecycle::LifecycleError, AppError},
    lifecycle::{BlockingLimiter, Lifespan, DEFAULT_BLOCKING_POOL_SIZE},
};

const DEFAULT_TITLE: &str = env!("CARGO_PKG_NAME");
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extra options for [`build_application`].
///
/// The identity fields are fallbacks: an app identity group in the settings
/// always takes precedence.
pub struct ApplicationOptions {
    /// Create missing tables while the lifespan starts. Requires `engine`.
    pub create_tables_on_start: bool,
    /// Token total given to the blocking limiter at startup.
    pub blocking_pool_size: usize,
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    /// Engine used for table creation and closed when the application stops.
    pub engine: Option<DatabaseConnection>,
    /// Limiter configured at startup, reachable through [`Application::lifespan`].
    pub blocking: BlockingLimiter,
}

impl ApplicationOptions {
    pub fn with_engine(mut self, engine: DatabaseConnection) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn create_tables_on_start(mut self, create_tables_on_start: bool) -> Self {
        self.create_tables_on_start = create_tables_on_start;
        self
    }

    pub fn blocking_pool_size(mut self, blocking_pool_size: usize) -> Self {
        self.blocking_pool_size = blocking_pool_size;
        self
    }
}

impl Default for ApplicationOptions {
    fn default() -> Self {
        Self {
            create_tables_on_start: true,
            blocking_pool_size: DEFAULT_BLOCKING_POOL_SIZE,
            title: None,
            description: None,
            version: None,
            engine: None,
            blocking: BlockingLimiter::new(),
        }
    }
}

/// The assembled HTTP application.
pub struct Application {
    router: Router,
    openapi: OpenApi,
    lifespan: Lifespan,
    title: String,
    description: String,
    version: String,
}

impl Application {
    /// A clone of the assembled router, e.g. for in-process requests in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The generated OpenAPI document, without any documentation route.
    pub fn openapi(&self) -> &OpenApi {
        &self.openapi
    }

    pub fn lifespan(&self) -> &Lifespan {
        &self.lifespan
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Runs the lifespan startup, serves until `shutdown` resolves, then runs the
    /// lifespan shutdown.
    ///
    /// # Returns
    /// - `Ok(())` - Server stopped gracefully
    /// - `Err(AppError::LifecycleErr)` - Startup failed and no request was served,
    ///   or shutdown failed
    /// - `Err(AppError::IoErr)` - The listener failed while serving
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), AppError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = listener.local_addr()?;

        self.lifespan.startup().await?;
        tracing::info!("{} {} listening on {}", self.title, self.version, address);

        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await;

        let stopped = self.lifespan.shutdown().await;

        finish_serving(served, stopped)
    }
}

/// Combines the serve result with the lifespan shutdown result.
///
/// A shutdown failure takes precedence; a serve error it hides is logged so it
/// is not lost.
pub(crate) fn finish_serving(
    served: std::io::Result<()>,
    stopped: Result<(), LifecycleError>,
) -> Result<(), AppError> {
    if let Err(err) = stopped {
        if let Err(serve_err) = &served {
            tracing::error!("Server failed while serving: {}", serve_err);
        }
        return Err(err.into());
    }
    tracing::info!("Server stopped");

    served?;

    Ok(())
}

/// Builds the HTTP application from business routes and settings.
///
/// - An app identity group seeds the title, description and version.
/// - A deployment environment group disables the default Swagger UI and
///   registers `/docs`, `/redoc` and `/openapi.json` instead, whatever the
///   environment value is.
/// - Without a deployment environment group the default Swagger UI stays mounted
///   and none of those three routes exist.
///
/// # Arguments
/// - `routes` - Business routes with their state already applied
/// - `settings` - Any settings value; only the groups it carries are used
/// - `options` - Lifespan and metadata options
pub fn build_application<S>(
    routes: OpenApiRouter,
    settings: &S,
    options: ApplicationOptions,
) -> Application
where
    S: SettingsGroups + ?Sized,
{
    let (title, description, version) = match settings.app() {
        Some(app) => (
            app.name.clone(),
            app.description.clone(),
            app.version.clone(),
        ),
        None => (
            options.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            options.description.unwrap_or_default(),
            options.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        ),
    };

    let lifespan = Lifespan::new(
        options.blocking,
        options.blocking_pool_size,
        options.create_tables_on_start,
        options.engine,
    );

    let (router, mut openapi) = routes.split_for_parts();
    openapi.info.title = title.clone();
    openapi.info.version = version.clone();
    openapi.info.description = (!description.is_empty()).then(|| description.clone());

    let router = match settings.environment() {
        Some(environment) => {
            tracing::debug!(
                "Serving documentation routes for the {} environment",
                environment.environment
            );
            router.merge(docs::docs_router(openapi.clone(), &title))
        }
        None => router.merge(docs::default_docs_router(openapi.clone())),
    };

    Application {
        router: router.layer(TraceLayer::new_for_http()),
        openapi,
        lifespan,
        title,
        description,
        version,
    }
}
