//! Extension → content type table.

use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type for `path` by its (case-insensitive) extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return OCTET_STREAM;
    };

    match ext.to_ascii_lowercase().as_str() {
        "ico" => "image/x-icon",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "css" => "text/css",
        "js" => "application/javascript",
        "html" => "text/html",
        "txt" => "text/plain",
        "json" => "application/json",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(content_type_for(Path::new("site.css")), "text/css");
        assert_eq!(content_type_for(Path::new("img/LOGO.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
    }

    #[test]
    fn unknown_or_missing_extension_is_binary() {
        assert_eq!(content_type_for(Path::new("archive.tar.zst")), OCTET_STREAM);
        assert_eq!(content_type_for(Path::new("Makefile")), OCTET_STREAM);
    }
}
