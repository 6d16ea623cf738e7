use std::{net::SocketAddr, sync::Arc};

use axum::http::Method;
use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, MailConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::routes::{self, AppState};
use service::company::{repo::SeaOrmCompanyRepository, CompanyService};
use service::notification::{
    mailer::{DisabledMailer, SmtpMailer},
    MailTransport, NotificationService,
};

/// Any origin, the usual REST verbs.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

fn build_mailer(cfg: &MailConfig) -> anyhow::Result<Arc<dyn MailTransport>> {
    if !cfg.is_enabled() {
        warn!("MAIL_HOST not set; company notifications will fail and be logged");
        return Ok(Arc::new(DisabledMailer));
    }
    Ok(Arc::new(SmtpMailer::from_config(cfg)?))
}

fn bind_addr(cfg: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(err = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(err = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("ctrl-c received"),
        _ = terminate => info!("SIGTERM received"),
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate()?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let recipients = cfg.notification.recipients();
    if recipients.is_empty() {
        warn!("NOTIFICATION_EMAILS is empty; company notifications are disabled");
    }
    let notifier = Arc::new(NotificationService::new(build_mailer(&cfg.mail)?, recipients));

    let repo = Arc::new(SeaOrmCompanyRepository { db });
    let state = AppState::new(CompanyService::new(repo, notifier));
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting company registry");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let addr = bind_addr(&ServerConfig { host: "127.0.0.1".into(), port: 3000 }).unwrap();
        assert_eq!(addr.port(), 3000);
        assert!(bind_addr(&ServerConfig { host: "not a host".into(), port: 3000 }).is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn sigterm_triggers_shutdown() {
        use std::time::Duration;
        use tokio::signal::unix::{signal, SignalKind};

        // keep the process alive even if the spawned listener is not registered yet
        let _guard = signal(SignalKind::terminate()).unwrap();
        let waiter = tokio::spawn(shutdown_signal());
        tokio::time::sleep(Duration::from_millis(50)).await;

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(2), waiter).await.unwrap().unwrap();
    }

    #[test]
    fn disabled_mail_config_builds_fallback_mailer() {
        assert!(build_mailer(&MailConfig::default()).is_ok());
    }
}
