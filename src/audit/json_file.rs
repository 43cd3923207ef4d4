//! JSON-file route audit store.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use axum::http::Method;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::audit::RouteAudit;
use crate::error::AuditError;

/// One audited route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub method: String,
    pub path: String,
    pub handler_name: String,
}

/// Upserts route records into a map and rewrites the file on every change.
///
/// Writes are serialized and go through a sibling temp file that is renamed
/// over the store, so readers only ever see a complete document.
#[derive(Debug)]
pub struct JsonFileAudit {
    path: PathBuf,
    records: DashMap<(String, String), String>,
    write_lock: Mutex<()>,
}

impl JsonFileAudit {
    /// Open the store at `path`, loading existing records if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let path = path.into();
        let records = DashMap::new();

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let existing: Vec<AuditRecord> = serde_json::from_reader(reader)?;
            for r in existing {
                records.insert((r.method, r.path), r.handler_name);
            }
            tracing::info!(path = %path.display(), count = records.len(), "Loaded route audit records");
        } else if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            path,
            records,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handler recorded for `(method, path)`, if any.
    pub fn get(&self, method: &str, path: &str) -> Option<String> {
        self.records
            .get(&(method.to_string(), path.to_string()))
            .map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records sorted by (method, path).
    pub fn records(&self) -> Vec<AuditRecord> {
        let mut all: Vec<AuditRecord> = self
            .records
            .iter()
            .map(|r| AuditRecord {
                method: r.key().0.clone(),
                path: r.key().1.clone(),
                handler_name: r.value().clone(),
            })
            .collect();
        all.sort_by(|a, b| (&a.method, &a.path).cmp(&(&b.method, &b.path)));
        all
    }

    fn save(&self) -> Result<(), AuditError> {
        // The snapshot is taken under the lock so the last writer holds every insert.
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let tmp = self.path.with_extension("json.tmp");
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, &self.records())?;
        writer.flush()?;
        drop(writer);
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RouteAudit for JsonFileAudit {
    fn upsert(&self, method: &Method, path: &str, handler_name: &str) -> Result<(), AuditError> {
        self.records
            .insert((method.as_str().to_string(), path.to_string()), handler_name.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_existing_record() {
        let dir = tempfile::tempdir().unwrap();
        let audit = JsonFileAudit::open(dir.path().join("routes.json")).unwrap();

        audit.upsert(&Method::GET, "/hello", "hello_get").unwrap();
        audit.upsert(&Method::GET, "/hello", "hello_v2").unwrap();
        audit.upsert(&Method::POST, "/hello", "hello_post").unwrap();

        assert_eq!(audit.len(), 2);
        assert_eq!(audit.get("GET", "/hello").as_deref(), Some("hello_v2"));
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("routes.json");

        let audit = JsonFileAudit::open(&path).unwrap();
        audit.upsert(&Method::DELETE, "/items/{id}", "delete_item").unwrap();
        drop(audit);

        let reopened = JsonFileAudit::open(&path).unwrap();
        assert_eq!(
            reopened.records(),
            vec![AuditRecord {
                method: "DELETE".into(),
                path: "/items/{id}".into(),
                handler_name: "delete_item".into(),
            }]
        );
    }

    #[test]
    fn concurrent_registration_leaves_valid_store() {
        use crate::routing::Router;
        use crate::http::response::Response;
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        let audit = Arc::new(JsonFileAudit::open(&path).unwrap());
        let router = Arc::new(Router::with_audit(audit.clone()));

        let workers: Vec<_> = (0..8)
            .map(|t| {
                let router = router.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        router
                            .get(&format!("/t{t}/r{i}"))
                            .to("worker", |_| Ok(Response::text("ok")));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let reopened = JsonFileAudit::open(&path).unwrap();
        assert_eq!(reopened.len(), 8 * 25 + 1);
        assert_eq!(reopened.records(), audit.records());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(JsonFileAudit::open(&path), Err(AuditError::Json(_))));
    }
}
