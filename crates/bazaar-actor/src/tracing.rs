//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! The format is compact and hides module paths (`with_target(false)`); actors
//! log an `entity_type` field instead. `RUST_LOG` takes precedence over the
//! default directive passed in by the application:
//!
//! ```bash
//! RUST_LOG=info cargo run      # mutations and lifecycle
//! RUST_LOG=debug cargo run     # every request with its payload / query
//! ```
//!
//! With `debug`, a filtered listing shows up as:
//!
//! ```text
//! DEBUG list_items: Built item query query=ItemQuery { tags: ["lamp"], .. }
//! DEBUG Find entity_type="Item" query=FindQuery { .. } matched=2
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn setup_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .try_init();
}
