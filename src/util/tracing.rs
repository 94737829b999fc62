use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn build_subscriber() {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            "academy_api=debug,tower_http=debug,axum=debug,sqlx=info,info",
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::NONE),
        )
        .init();
}
