//! Path template compilation and matching.
//!
//! # Responsibilities
//! - Split a template like `/users/{user_id}/posts/{post_id}` into segments
//! - Match a concrete path segment by segment
//! - Capture one raw string per placeholder
//!
//! # Design Decisions
//! - A placeholder spans exactly one segment; no optional or catch-all segments
//! - Segment counts must be equal for a match
//! - No regex: matching is a single pass over both segment lists
//! - A placeholder never matches an empty segment
//! - A placeholder name used twice keeps the last capture

use crate::http::request::RouteParams;

/// One segment of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a template. Any segment wrapped in `{` and `}` is a placeholder.
    pub fn compile(template: &str) -> Self {
        let segments = split_segments(template)
            .map(|seg| match seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(seg.to_string()),
            })
            .collect();

        Self {
            template: template.to_string(),
            segments,
        }
    }

    /// Match `path` against this template, returning the captures on success.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let mut params = RouteParams::new();
        let mut concrete = split_segments(path);

        for segment in &self.segments {
            let value = concrete.next()?;
            match segment {
                Segment::Literal(lit) if lit == value => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if value.is_empty() => return None,
                Segment::Param(name) => params.insert(name.as_str(), value),
            }
        }

        // Leftover concrete segments mean the counts differ.
        if concrete.next().is_some() {
            return None;
        }
        Some(params)
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the template contains no placeholder.
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Placeholder names in template order (duplicates included).
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

/// `""` and `"/"` are both the single root segment.
fn split_segments(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}
