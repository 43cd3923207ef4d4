//! HTML template rendering.

use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::HandlerError;
use crate::http::response::Response;

/// Error raised while loading the template directory.
#[derive(Debug, thiserror::Error)]
pub enum TemplateLoadError {
    #[error("Cannot read template directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),
}

/// Every `*.html` file of a directory, registered by file stem.
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    /// Load all `.html` files directly under `dir`.
    pub fn load(dir: &Path) -> Result<Self, TemplateLoadError> {
        let io_err = |source| TemplateLoadError::Io {
            path: dir.display().to_string(),
            source,
        };

        let mut registry = Handlebars::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            registry.register_template_file(name, &path)?;
            tracing::debug!(template = %name, "Template registered");
        }

        tracing::info!(dir = %dir.display(), count = registry.get_templates().len(), "Templates loaded");
        Ok(Self { registry })
    }

    pub fn has(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    /// Render `name` with `context` into a 200 HTML response.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<Response, HandlerError> {
        let body = self.registry.render(name, context)?;
        Ok(Response::html(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_registered_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("greet.html"), "<h1>{{title}}</h1>").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let templates = Templates::load(dir.path()).unwrap();
        assert!(templates.has("greet"));
        assert!(!templates.has("notes"));

        let resp = templates.render("greet", &json!({"title": "Hi"})).unwrap();
        assert_eq!(resp.body_text(), "<h1>Hi</h1>");
        assert_eq!(resp.content_type(), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn missing_template_is_handler_error() {
        let dir = tempfile::tempdir().unwrap();
        let templates = Templates::load(dir.path()).unwrap();
        let err = templates.render("absent", &json!({})).unwrap_err();
        assert!(matches!(err, HandlerError::Template(_)));
    }
}
