//! Diagnostic logging for the `bjcoach` binary.
//!
//! Engine events go through `tracing`. The binary installs a fmt subscriber on
//! stderr so diagnostics never mix with the game text on stdout. Tests attach
//! a [`TestLogSubscriber`] instead and inspect what was emitted.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Level;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Structured log entry captured in tests
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Collects log entries for verification
#[derive(Debug, Clone, Default)]
pub struct TestLogSubscriber {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Entries whose message equals `message`.
    pub fn with_message(&self, message: &str) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.message == message)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn into_layer<S>(self) -> TestLayer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        TestLayer {
            subscriber: self,
            _phantom: PhantomData,
        }
    }
}

pub struct TestLayer<S> {
    subscriber: TestLogSubscriber,
    _phantom: PhantomData<S>,
}

impl<S> Layer<S> for TestLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.subscriber.lock().push(LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.push((field.name().to_string(), value_str));
        }
    }
}

/// Installs the global subscriber: `RUST_LOG` filtering (default `warn`),
/// written to stderr.
pub fn init_logging() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
