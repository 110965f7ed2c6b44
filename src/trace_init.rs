#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Install a JSON subscriber writing to `log_dir/tex-trace.jsonl`. Later calls
/// are no-ops. `RUST_LOG` overrides the default `tex_*=debug` filter.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    INIT.call_once(|| {
        let appender = tracing_appender::rolling::never(log_dir, "tex-trace.jsonl");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        // the editor host keeps the engine for its whole lifetime
        std::mem::forget(guard);

        let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("tex_engine=debug,tex_core=debug,tex_session=debug")
        });
        tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(filter)
            .init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}
