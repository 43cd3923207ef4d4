//! Name → interceptor resolution for configured chains.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderName;

use crate::middleware::builtin::{RequestLog, RequireHeader};
use crate::middleware::pipeline::{Interceptor, Middleware, MiddlewareChain};

/// Prefix of the parameterized `require_header:<name>` entry.
const REQUIRE_HEADER_PREFIX: &str = "require_header:";

/// Interceptors addressable by name.
#[derive(Clone)]
pub struct MiddlewareRegistry {
    named: HashMap<String, Arc<dyn Middleware>>,
}

impl MiddlewareRegistry {
    /// Registry preloaded with the built-ins (`request_log`).
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            named: HashMap::new(),
        };
        registry.insert("request_log", RequestLog);
        registry
    }

    /// Make `middleware` resolvable as `name`. Replaces an existing entry.
    pub fn insert(&mut self, name: impl Into<String>, middleware: impl Middleware + 'static) {
        self.named.insert(name.into(), Arc::new(middleware));
    }

    /// Resolve one name. Unknown or malformed names become `Unresolved`.
    pub fn resolve(&self, name: &str) -> Interceptor {
        if let Some(m) = self.named.get(name) {
            return Interceptor::Callable(Arc::clone(m));
        }

        if let Some(header) = name.strip_prefix(REQUIRE_HEADER_PREFIX) {
            if let Ok(header) = HeaderName::try_from(header.trim()) {
                return Interceptor::new(RequireHeader::new(header));
            }
        }

        tracing::warn!(interceptor = %name, "Unknown interceptor, it will be skipped");
        Interceptor::Unresolved(name.to_string())
    }

    /// Resolve an ordered list of names into a chain.
    pub fn resolve_chain<S: AsRef<str>>(&self, names: &[S]) -> MiddlewareChain {
        names.iter().map(|n| self.resolve(n.as_ref())).collect()
    }
}

impl Default for MiddlewareRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_builtins_and_parameterized_entries() {
        let registry = MiddlewareRegistry::with_builtins();
        assert!(registry.resolve("request_log").callable().is_some());
        assert!(registry.resolve("require_header:x-api-key").callable().is_some());
    }

    #[test]
    fn unknown_names_stay_in_chain_as_unresolved() {
        let registry = MiddlewareRegistry::with_builtins();
        let chain = registry.resolve_chain(&["request_log", "nope", "require_header:bad header"]);
        assert_eq!(chain.len(), 3);
        let resolved: Vec<bool> = chain.iter().map(|i| i.callable().is_some()).collect();
        assert_eq!(resolved, vec![true, false, false]);
    }
}
