//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated `ServerConfig` into the collaborators the dispatcher needs
//! - Open the route audit sink, load templates, resolve the global chain
//!
//! # Design Decisions
//! - Optional collaborators degrade instead of aborting: a broken audit
//!   store or template directory is logged and replaced by nothing
//! - Routes are registered between `router` and `dispatcher`; the table is
//!   populated before the listener starts accepting traffic

use std::sync::Arc;

use crate::audit::{JsonFileAudit, NoopAudit, RouteAudit};
use crate::config::{AuditConfig, ServerConfig, TemplatesConfig};
use crate::dispatch::Dispatcher;
use crate::http::templates::Templates;
use crate::middleware::MiddlewareRegistry;
use crate::routing::Router;
use crate::static_files::StaticFiles;

/// Audit sink described by `config`, falling back to `NoopAudit`.
pub fn audit_sink(config: &AuditConfig) -> Arc<dyn RouteAudit> {
    if !config.enabled {
        return Arc::new(NoopAudit);
    }
    match JsonFileAudit::open(&config.path) {
        Ok(audit) => Arc::new(audit),
        Err(e) => {
            tracing::warn!(path = %config.path.display(), error = %e, "Route audit disabled");
            Arc::new(NoopAudit)
        }
    }
}

/// Router with the configured audit sink and the default root handler.
pub fn router(config: &ServerConfig) -> Arc<Router> {
    Arc::new(Router::with_audit(audit_sink(&config.audit)))
}

/// Templates from the configured directory, if it can be loaded.
pub fn templates(config: &TemplatesConfig) -> Option<Arc<Templates>> {
    match Templates::load(&config.dir) {
        Ok(t) => Some(Arc::new(t)),
        Err(e) => {
            tracing::warn!(error = %e, "Templates unavailable");
            None
        }
    }
}

/// Dispatcher over `router` with the configured global chain and static fallback.
pub fn dispatcher(config: &ServerConfig, router: Arc<Router>, registry: &MiddlewareRegistry) -> Dispatcher {
    let global = registry.resolve_chain(&config.middleware.global);
    tracing::info!(interceptors = global.len(), "Global middleware resolved");

    let dispatcher = Dispatcher::new(router).with_global_middleware(global);
    if config.static_files.enabled {
        tracing::info!(
            root = %config.static_files.root.display(),
            prefix = %config.static_files.prefix,
            "Static file fallback enabled"
        );
        dispatcher.with_static_files(StaticFiles::from_config(&config.static_files))
    } else {
        dispatcher
    }
}
