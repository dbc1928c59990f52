//! Path and directory-list normalization helpers.
//!
//! Everything here is pure string manipulation: URL-style path cleanup for
//! the HTTP endpoints, and lexical filesystem-path cleaning for the
//! allowed-directory list. No function in this module touches the
//! filesystem; existence checks happen later in `core::security`.

use std::path::{Component, Path};

/// Normalize a base URL path: trimmed, one leading slash, no trailing
/// slash unless the whole path is `/`. Empty input stays empty, meaning
/// "unset" rather than an error.
pub fn clean_url_path(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }
    let mut out = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Normalize a relative endpoint path: trimmed, one leading slash.
/// Empty input stays empty so the transport can substitute its default.
pub fn clean_relative_path(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Lexically clean a filesystem path: collapse `.` segments, resolve `..`
/// against preceding components, and drop redundant separators. Relative
/// paths that cancel out entirely become `.`.
pub fn clean_path(raw: &str) -> String {
    let absolute = raw.starts_with('/');
    let mut parts: Vec<String> = Vec::new();

    for component in Path::new(raw).components() {
        match component {
            Component::CurDir | Component::RootDir => {}
            Component::ParentDir => match parts.last().map(String::as_str) {
                Some("..") | None => {
                    // `..` at the start of a relative path is kept; past the
                    // root of an absolute path it is dropped.
                    if !absolute {
                        parts.push("..".to_string());
                    }
                }
                Some(_) => {
                    parts.pop();
                }
            },
            Component::Normal(segment) => {
                parts.push(segment.to_string_lossy().into_owned());
            }
            Component::Prefix(prefix) => {
                parts.push(prefix.as_os_str().to_string_lossy().into_owned());
            }
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Split a delimited directory list on commas, semicolons, and line
/// breaks, dropping empty entries.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split([',', ';', '\n', '\r'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Merge allowed-directory sources into one ordered, duplicate-free list.
///
/// Sources are consumed in fixed priority order: positional arguments,
/// then the primary delimited list, then the additional delimited list.
/// Uniqueness is decided on the cleaned form; the first occurrence wins
/// its position. A root that cleans down to `.` keeps its raw spelling so
/// a caller's bare relative path survives as written.
pub fn collect_allowed_dirs(
    positional: &[String],
    primary_list: Option<&str>,
    additional_list: Option<&str>,
) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out: Vec<String> = Vec::new();

    let mut add = |raw: &str| {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }
        let mut cleaned = clean_path(raw);
        if cleaned == "." {
            cleaned = raw.to_string();
        }
        if seen.iter().any(|existing| *existing == cleaned) {
            return;
        }
        seen.push(cleaned.clone());
        out.push(cleaned);
    };

    for dir in positional {
        add(dir);
    }
    for dir in split_list(primary_list.unwrap_or_default()) {
        add(&dir);
    }
    for dir in split_list(additional_list.unwrap_or_default()) {
        add(&dir);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_url_path() {
        assert_eq!(clean_url_path(""), "");
        assert_eq!(clean_url_path("   "), "");
        assert_eq!(clean_url_path("api/"), "/api");
        assert_eq!(clean_url_path("/"), "/");
        assert_eq!(clean_url_path("/mcp"), "/mcp");
        assert_eq!(clean_url_path("mcp"), "/mcp");
        assert_eq!(clean_url_path(" /v1/mcp/ "), "/v1/mcp");
        assert_eq!(clean_url_path("/v1/mcp//"), "/v1/mcp");
    }

    #[test]
    fn test_clean_relative_path() {
        assert_eq!(clean_relative_path(""), "");
        assert_eq!(clean_relative_path("sse"), "/sse");
        assert_eq!(clean_relative_path("/sse"), "/sse");
        assert_eq!(clean_relative_path("  message "), "/message");
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/tmp/data/"), "/tmp/data");
        assert_eq!(clean_path("/tmp/./data"), "/tmp/data");
        assert_eq!(clean_path("/tmp/a/../b"), "/tmp/b");
        assert_eq!(clean_path("/.."), "/");
        assert_eq!(clean_path("a/.."), ".");
        assert_eq!(clean_path("./projects"), "projects");
        assert_eq!(clean_path("../shared"), "../shared");
    }

    #[test]
    fn test_split_list() {
        assert!(split_list("").is_empty());
        assert_eq!(split_list("/a,/b"), vec!["/a", "/b"]);
        assert_eq!(split_list("/a; /b \n/c"), vec!["/a", "/b", "/c"]);
        assert_eq!(split_list(" /a ,, ;\r\n /b "), vec!["/a", "/b"]);
    }

    #[test]
    fn test_collect_dedupes_across_sources() {
        let positional = vec!["/data/projects".to_string(), "/data/docs/".to_string()];
        let dirs = collect_allowed_dirs(
            &positional,
            Some("/data/docs,/var/cache"),
            Some("/data/projects/.;/srv"),
        );
        assert_eq!(dirs, vec!["/data/projects", "/data/docs", "/var/cache", "/srv"]);
    }

    #[test]
    fn test_collect_preserves_source_priority_order() {
        let dirs = collect_allowed_dirs(&[], Some("/b,/a"), Some("/a,/c"));
        assert_eq!(dirs, vec!["/b", "/a", "/c"]);
    }

    #[test]
    fn test_collect_keeps_raw_current_dir() {
        let positional = vec!["./".to_string()];
        let dirs = collect_allowed_dirs(&positional, None, None);
        assert_eq!(dirs, vec!["./"]);
    }

    #[test]
    fn test_collect_skips_blank_entries() {
        let positional = vec!["  ".to_string()];
        let dirs = collect_allowed_dirs(&positional, Some(" , ; "), None);
        assert!(dirs.is_empty());
    }
}
