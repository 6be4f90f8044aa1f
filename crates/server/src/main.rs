// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod pages;
mod session;

use axum::{
    Form, Router,
    extract::{OriginalUri, Path, State as AxumState},
    handler::HandlerWithoutStateExt,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use bike_inventory_api::{
    ApiError, AuthenticationService, Flash, FlashService, InventoryService,
    translate_domain_error,
};
use bike_inventory_domain::{Bike, BikeForm, Credentials};
use bike_inventory_persistence::Persistence;
use clap::Parser;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::pages::{
    BikeView, FlashView, InternalErrorPage, InventoryPage, LoginPage, NotFoundPage, SignupPage,
    render, render_ok,
};
use crate::session::{AuthenticatedSession, CookieConfig, SessionToken};

/// Bike Inventory Server - a login-gated web app for tracking bicycle stock
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "BIKE_INVENTORY_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(long, env = "BIKE_INVENTORY_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "BIKE_INVENTORY_PORT", default_value_t = 3000)]
    port: u16,

    /// Directory served under `/static`
    #[arg(long, env = "BIKE_INVENTORY_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,

    /// Username of the account created on first run
    #[arg(long, env = "BIKE_INVENTORY_ADMIN_USER", default_value = "admin")]
    admin_username: String,

    /// Password of the account created on first run
    #[arg(
        long,
        env = "BIKE_INVENTORY_ADMIN_PASSWORD",
        default_value = "admin",
        hide_env_values = true,
        hide_default_value = true
    )]
    admin_password: String,

    /// Mark the session cookie `Secure` (serve over HTTPS)
    #[arg(long, env = "BIKE_INVENTORY_SECURE_COOKIES")]
    secure_cookies: bool,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for bikes, users, and sessions.
    persistence: Arc<Mutex<Persistence>>,
    /// Directory served under `/static`.
    static_dir: Arc<PathBuf>,
    /// Attributes for the session cookie.
    cookies: CookieConfig,
}

/// Login and signup form fields.
#[derive(Debug, Clone, Default, Deserialize)]
struct CredentialsForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
///
/// The message is only ever logged; clients see the generic error page.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// The request path, shown on the 404 page.
    path: String,
}

impl HttpError {
    fn not_found(path: impl Into<String>) -> Self {
        let path: String = path.into();
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("No resource at {path}"),
            path,
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            path: String::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NOT_FOUND {
            info!(path = %self.path, "Not found");
            return render(self.status, &NotFoundPage { path: self.path });
        }

        error!(status = %self.status, error = %self.message, "Request failed");
        render(self.status, &InternalErrorPage)
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self::internal(err.to_string())
    }
}

/// Parses the `{id}` path segment; anything but an integer is a 404.
fn parse_bike_id(raw: &str, uri: &OriginalUri) -> Result<i64, HttpError> {
    raw.parse::<i64>()
        .map_err(|_| HttpError::not_found(uri.path()))
}

/// Redirect that also sets the session cookie.
fn redirect_with_session(location: &str, cookies: CookieConfig, token: &str) -> Response {
    (
        [(SET_COOKIE, cookies.session_cookie(token))],
        Redirect::to(location),
    )
        .into_response()
}

/// Handler for GET `/` and `/inventory`.
///
/// Shows every bike and consumes the pending flash message.
async fn handle_inventory(
    AxumState(app_state): AxumState<AppState>,
    session: AuthenticatedSession,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bikes: Vec<Bike> = InventoryService::list(&mut persistence)?;
    let flash: Option<Flash> = FlashService::take(&mut persistence, &session.token)?;
    drop(persistence);

    Ok(render_ok(&InventoryPage {
        username: session.user.username,
        flash: flash.map(FlashView::from),
        bikes: bikes.into_iter().map(BikeView::from).collect(),
    }))
}

/// Handler for GET `/login`.
async fn handle_login_page(
    AxumState(app_state): AxumState<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Response, HttpError> {
    let flash: Option<Flash> = match token {
        Some(token) => {
            let mut persistence = app_state.persistence.lock().await;
            FlashService::take(&mut persistence, &token)?
        }
        None => None,
    };

    Ok(render_ok(&LoginPage {
        flash: flash.map(FlashView::from),
        username: String::new(),
    }))
}

/// Handler for POST `/login`.
///
/// On success the browser's previous session is discarded and a fresh
/// authenticated one is issued. On failure the form is shown again.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    SessionToken(previous_token): SessionToken,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;

    let outcome = Credentials::new(&form.username, &form.password)
        .map_err(translate_domain_error)
        .and_then(|credentials| AuthenticationService::login(&mut persistence, &credentials));

    match outcome {
        Ok((token, user)) => {
            if let Some(previous) = previous_token {
                AuthenticationService::logout(&mut persistence, &previous)?;
            }
            drop(persistence);

            info!(username = %user.username, "Login succeeded");
            Ok(redirect_with_session("/", app_state.cookies, &token))
        }
        Err(ApiError::Auth(_) | ApiError::InvalidInput { .. }) => {
            drop(persistence);

            warn!(username = %form.username.trim(), "Login failed");
            Ok(render_ok(&LoginPage {
                flash: Some(FlashView::from(Flash::error("Invalid username or password"))),
                username: form.username,
            }))
        }
        Err(e) => Err(e.into()),
    }
}

/// Handler for GET `/signup`.
async fn handle_signup_page(
    AxumState(app_state): AxumState<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Response, HttpError> {
    let flash: Option<Flash> = match token {
        Some(token) => {
            let mut persistence = app_state.persistence.lock().await;
            FlashService::take(&mut persistence, &token)?
        }
        None => None,
    };

    Ok(render_ok(&SignupPage {
        flash: flash.map(FlashView::from),
    }))
}

/// Handler for POST `/signup`.
///
/// Every outcome is reported as a flash on the next page: success and
/// duplicate usernames go to the login form, empty fields back to signup.
async fn handle_signup(
    AxumState(app_state): AxumState<AppState>,
    SessionToken(token): SessionToken,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;

    let (flash, location): (Flash, &str) =
        match AuthenticationService::signup(&mut persistence, &form.username, &form.password) {
            Ok(_) => (Flash::success("Account created. Please log in."), "/login"),
            Err(ApiError::DuplicateUsername { username }) => {
                info!(username = %username, "Signup rejected: username taken");
                (Flash::error("Username already exists!"), "/login")
            }
            Err(ApiError::InvalidInput { message, .. }) => (Flash::error(message), "/signup"),
            Err(e) => return Err(e.into()),
        };

    let token: String = AuthenticationService::ensure_session(&mut persistence, token.as_deref())?;
    FlashService::push(&mut persistence, &token, &flash)?;
    drop(persistence);

    Ok(redirect_with_session(location, app_state.cookies, &token))
}

/// Handler for GET `/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Response, HttpError> {
    if let Some(token) = token {
        let mut persistence = app_state.persistence.lock().await;
        AuthenticationService::logout(&mut persistence, &token)?;
        info!("Logged out");
    }

    Ok((
        [(SET_COOKIE, app_state.cookies.expired_cookie())],
        Redirect::to("/login"),
    )
        .into_response())
}

/// Handler for POST `/add`.
async fn handle_add_bike(
    AxumState(app_state): AxumState<AppState>,
    session: AuthenticatedSession,
    Form(form): Form<BikeForm>,
) -> Result<Response, HttpError> {
    info!(username = %session.user.username, "Handling add bike request");

    let mut persistence = app_state.persistence.lock().await;
    let flash: Flash = InventoryService::add(&mut persistence, &form)?;
    FlashService::push(&mut persistence, &session.token, &flash)?;

    Ok(Redirect::to("/").into_response())
}

/// Handler for POST `/update/{id}`.
async fn handle_update_bike(
    AxumState(app_state): AxumState<AppState>,
    Path(raw_id): Path<String>,
    uri: OriginalUri,
    session: AuthenticatedSession,
    Form(form): Form<BikeForm>,
) -> Result<Response, HttpError> {
    let bike_id: i64 = parse_bike_id(&raw_id, &uri)?;
    info!(bike_id, username = %session.user.username, "Handling update bike request");

    let mut persistence = app_state.persistence.lock().await;
    let flash: Flash = InventoryService::update(&mut persistence, bike_id, &form)?;
    FlashService::push(&mut persistence, &session.token, &flash)?;

    Ok(Redirect::to("/").into_response())
}

/// Handler for GET `/delete/{id}`.
async fn handle_delete_bike(
    AxumState(app_state): AxumState<AppState>,
    Path(raw_id): Path<String>,
    uri: OriginalUri,
    session: AuthenticatedSession,
) -> Result<Response, HttpError> {
    let bike_id: i64 = parse_bike_id(&raw_id, &uri)?;
    info!(bike_id, username = %session.user.username, "Handling delete bike request");

    let mut persistence = app_state.persistence.lock().await;
    let flash: Flash = InventoryService::delete(&mut persistence, bike_id)?;
    FlashService::push(&mut persistence, &session.token, &flash)?;

    Ok(Redirect::to("/").into_response())
}

/// Fallback for unknown routes and missing static files.
async fn handle_not_found(uri: OriginalUri) -> HttpError {
    HttpError::not_found(uri.path())
}

/// How often the background task deletes expired sessions.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Periodically purges expired sessions for as long as the server runs.
fn spawn_session_sweeper(persistence: Arc<Mutex<Persistence>>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        // The first tick completes immediately; startup already purged.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let mut persistence = persistence.lock().await;
            match AuthenticationService::purge_expired_sessions(&mut persistence) {
                Ok(purged) => debug!(purged, "Swept expired sessions"),
                Err(e) => error!(error = %e, "Failed to sweep expired sessions"),
            }
        }
    });
}

/// Turns a handler panic into the generic 500 page.
fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail: &str = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    HttpError::internal(format!("Handler panicked: {detail}")).into_response()
}

/// Wraps a router in the layers every route shares.
fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let static_files = ServeDir::new(app_state.static_dir.as_path())
        .not_found_service(handle_not_found.into_service());

    let router = Router::new()
        .route("/", get(handle_inventory))
        .route("/inventory", get(handle_inventory))
        .route("/login", get(handle_login_page).post(handle_login))
        .route("/signup", get(handle_signup_page).post(handle_signup))
        .route("/logout", get(handle_logout))
        .route("/add", post(handle_add_bike))
        .route("/update/{id}", post(handle_update_bike))
        .route("/delete/{id}", get(handle_delete_bike))
        .nest_service("/static", static_files)
        .fallback(handle_not_found);

    with_middleware(router.with_state(app_state))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing bike inventory server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    AuthenticationService::seed_default_account(
        &mut persistence,
        &args.admin_username,
        &args.admin_password,
    )?;

    let purged: usize = AuthenticationService::purge_expired_sessions(&mut persistence)?;
    info!(purged, "Purged expired sessions");

    if !args.static_dir.is_dir() {
        warn!(
            "Static directory {} does not exist; /static requests will 404",
            args.static_dir.display()
        );
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        static_dir: Arc::new(args.static_dir),
        cookies: CookieConfig {
            secure: args.secure_cookies,
        },
    };

    spawn_session_sweeper(Arc::clone(&app_state.persistence));

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
