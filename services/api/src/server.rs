use crate::cli::ServeArgs;
use crate::infra::{build_dashboard, AppState};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;
use tutorlink::config::AppConfig;
use tutorlink::dashboard::{ChangeFeed, TeacherId};
use tutorlink::error::AppError;
use tutorlink::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (services, feed) = build_dashboard();

    if let Some(teacher) = config.demo_teacher.clone() {
        let teacher = TeacherId(teacher);
        services.seeder.seed_if_needed(&teacher)?;
    }

    spawn_change_logger(&feed);

    let app = with_dashboard_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tutorlink dashboard api ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Forward dashboard mutations to the log so operators can watch the
/// collections move without polling them.
fn spawn_change_logger(feed: &Arc<ChangeFeed>) {
    let mut changes = feed.subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(event) => info!(
                    teacher = %event.teacher.0,
                    kind = event.kind.label(),
                    record = %event.record_id,
                    "dashboard collection updated"
                ),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });
}
