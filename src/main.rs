mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use dotenvy::dotenv;
use serde_json::json;

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use models::user::UserRole;
use repositories::user_repository::UserRepository;
use state::AppState;
use utils::errors::AppError;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚐 Fleet Shift Operations - API");
    info!("================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Cuenta chef d'équipe por defecto (primer arranque)
    if let Err(e) = bootstrap_default_team_leader(&pool, &config).await {
        error!("❌ Error creando el chef d'équipe por defecto: {}", e);
        return Err(anyhow::anyhow!("Error de bootstrap: {}", e));
    }

    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(&config.cors_origins)
    } else {
        cors_middleware()
    };

    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/shifts", routes::shift_routes::create_shift_router())
        .nest(
            "/api/inspections",
            routes::inspection_routes::create_inspection_router(),
        )
        .nest(
            "/api/battery-records",
            routes::battery_record_routes::create_battery_record_router(),
        )
        .nest("/api/alerts", routes::alert_routes::create_alert_router())
        .nest(
            "/api/vehicles",
            routes::vehicle_routes::create_vehicle_router(),
        )
        .nest("/api/users", routes::user_routes::create_user_router())
        .nest(
            "/api/maintenance",
            routes::maintenance_routes::create_maintenance_router(),
        )
        .nest(
            "/api/location",
            routes::location_routes::create_location_router(),
        )
        .nest(
            "/api/reports",
            routes::report_routes::create_report_router(),
        )
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/sign-in/email - Login chef d'équipe / admin");
    info!("   POST /api/auth/sign-in/phone - Login chauffeur");
    info!("   GET  /api/auth/session - Sesión actual");
    info!("   POST /api/auth/sign-out - Cerrar sesión");
    info!("🕐 Endpoints - Shifts:");
    info!("   POST /api/shifts/start - Abrir shift");
    info!("   PUT  /api/shifts/:id/end - Cerrar shift");
    info!("   GET  /api/shifts/active - Shift activo del chauffeur");
    info!("   GET  /api/shifts/history - Historial");
    info!("📋 Endpoints - Conformité:");
    info!("   POST /api/inspections - Crear inspección");
    info!("   GET  /api/inspections/shift/:shift_id - Inspecciones del shift");
    info!("   POST /api/battery-records - Crear relevé de batteries");
    info!("   GET  /api/battery-records/shift/:shift_id - Relevés del shift");
    info!("   PUT  /api/battery-records/:id/sign - Contrefirma chef d'équipe");
    info!("🔔 Endpoints - Alertas:");
    info!("   GET  /api/alerts - Listar alertas");
    info!("   POST /api/alerts/:id/read - Marcar como leída");
    info!("🚗 Endpoints - Vehículos:");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   GET  /api/vehicles/qr/:qr_code - Lookup por QR + sécurité");
    info!("👤 Endpoints - Chauffeurs:");
    info!("   POST /api/users/drivers - Crear chauffeur");
    info!("   GET  /api/users/drivers - Listar chauffeurs");
    info!("   PUT  /api/users/drivers/:id/approve - Aprobar");
    info!("   PUT  /api/users/drivers/:id/revoke - Desactivar");
    info!("   PUT  /api/users/drivers/:id/restore - Restaurar");
    info!("🔧 Endpoints - Maintenance:");
    info!("   POST /api/maintenance - Crear intervención");
    info!("   GET  /api/maintenance/recent - Intervenciones recientes");
    info!("   PUT  /api/maintenance/:id/status - Cambiar estado");
    info!("   GET  /api/maintenance/vehicle/:vehicle_id - Por vehículo");
    info!("📍 Endpoints - Localización:");
    info!("   POST /api/location/update - Registrar posición");
    info!("   GET  /api/location/fleet - Vista de flotte");
    info!("   GET  /api/location/driver/:driver_id - Última posición");
    info!("📊 Endpoints - Rapports:");
    info!("   GET  /api/reports/failed-inspections - Inspections échouées");
    info!("   GET  /api/reports/failed-inspections/export - Export JSON");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Crear la cuenta chef d'équipe por defecto si no existe todavía.
/// El email y el mot de passe vienen del entorno; sin ellos no se crea nada.
async fn bootstrap_default_team_leader(
    pool: &sqlx::PgPool,
    config: &EnvironmentConfig,
) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (
        config.default_team_leader_email.as_deref(),
        config.default_team_leader_password.as_deref(),
    ) else {
        return Ok(());
    };

    let users = UserRepository::new(pool.clone());
    if users.find_by_email(email).await?.is_some() {
        return Ok(());
    }

    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Hash(e.to_string()))?;
    let user = users
        .create_with_password(email, &hash, "Chef", "Équipe", UserRole::TeamLeader)
        .await?;

    info!("✅ Chef d'équipe por defecto creado: {} ({})", email, user.id);
    Ok(())
}

/// Endpoint de health check
async fn health_endpoint(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
