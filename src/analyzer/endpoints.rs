//! API Endpoint Discovery
//!
//! Best-effort scan for declared HTTP routes: Next.js file routes under
//! `pages/api/`, Express-style registrations in JavaScript/TypeScript
//! sources, and FastAPI decorators in Python sources. The results feed
//! LLM prompt context only.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use super::walker::TreeWalker;
use crate::constants::analysis::{IGNORED_DIRS, MAX_ENDPOINTS_PER_STYLE};
use crate::ingest::RepoHandle;
use crate::types::{Degraded, EndpointGroup};

const STAGE: &str = "endpoints";

static EXPRESS_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"app\.(get|post|put|delete|patch)\(['"]([^'"]+)['"]"#).expect("valid pattern")
});

static FASTAPI_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@app\.(get|post|put|delete|patch)\(['"]([^'"]+)['"]"#).expect("valid pattern")
});

/// Discover route declarations, grouped by framework style.
pub fn discover_endpoints(repo: &RepoHandle) -> Degraded<Vec<EndpointGroup>> {
    let root = repo.root();
    let mut groups = Vec::new();

    let walk = TreeWalker::new(root, STAGE).skipping_dirs(IGNORED_DIRS).files();

    let nextjs = nextjs_routes(root);
    if !nextjs.is_empty() {
        groups.push(EndpointGroup {
            style: "nextjs".to_string(),
            routes: nextjs,
        });
    }

    let mut express = Vec::new();
    let mut fastapi = Vec::new();
    for path in &walk.value {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        match ext {
            "js" | "ts" => scan_routes(path, &EXPRESS_ROUTE, &mut express),
            "py" => scan_routes(path, &FASTAPI_ROUTE, &mut fastapi),
            _ => {}
        }
    }

    if !express.is_empty() {
        groups.push(EndpointGroup {
            style: "express".to_string(),
            routes: express,
        });
    }
    if !fastapi.is_empty() {
        groups.push(EndpointGroup {
            style: "fastapi".to_string(),
            routes: fastapi,
        });
    }

    debug!(groups = groups.len(), "endpoint discovery complete");

    Degraded::new(groups, walk.warnings)
}

/// Next.js file routes: every .ts/.js under pages/api becomes
/// `/api/<stem>`. Sorted and deduplicated.
fn nextjs_routes(root: &Path) -> Vec<String> {
    let api_dir = root.join("pages").join("api");
    if !api_dir.is_dir() {
        return Vec::new();
    }

    let walk = TreeWalker::new(&api_dir, STAGE).files();
    let mut routes: Vec<String> = walk
        .value
        .iter()
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| matches!(ext, "ts" | "js"))
        })
        .filter_map(|p| p.file_stem().and_then(|s| s.to_str()))
        .map(|stem| format!("/api/{}", stem))
        .collect();

    routes.sort();
    routes.dedup();
    routes.truncate(MAX_ENDPOINTS_PER_STYLE);
    routes
}

/// Collect `VERB path` pairs matched by `pattern`. Unreadable files are
/// skipped; the endpoint scan is advisory.
fn scan_routes(path: &Path, pattern: &Regex, out: &mut Vec<String>) {
    if out.len() >= MAX_ENDPOINTS_PER_STYLE {
        return;
    }

    let Ok(content) = std::fs::read_to_string(path) else {
        return;
    };

    for caps in pattern.captures_iter(&content) {
        if out.len() >= MAX_ENDPOINTS_PER_STYLE {
            return;
        }
        let route = format!("{} {}", caps[1].to_uppercase(), &caps[2]);
        if !out.contains(&route) {
            out.push(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_nextjs_file_routes() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("pages/api/analyze.ts"), "");
        touch(&temp.path().join("pages/api/health.js"), "");
        touch(&temp.path().join("pages/api/styles.css"), "");

        let groups = discover_endpoints(&RepoHandle::new(temp.path())).value;
        let nextjs = groups.iter().find(|g| g.style == "nextjs").unwrap();
        assert_eq!(nextjs.routes, vec!["/api/analyze", "/api/health"]);
    }

    #[test]
    fn test_express_routes_in_js() {
        let temp = TempDir::new().unwrap();
        touch(
            &temp.path().join("server.js"),
            r#"app.get("/users", handler); app.post('/users', handler);"#,
        );

        let groups = discover_endpoints(&RepoHandle::new(temp.path())).value;
        let express = groups.iter().find(|g| g.style == "express").unwrap();
        assert_eq!(express.routes, vec!["GET /users", "POST /users"]);
    }

    #[test]
    fn test_fastapi_decorators_in_py() {
        let temp = TempDir::new().unwrap();
        touch(
            &temp.path().join("main.py"),
            "@app.get(\"/items\")\ndef items(): ...\n",
        );

        let groups = discover_endpoints(&RepoHandle::new(temp.path())).value;
        let fastapi = groups.iter().find(|g| g.style == "fastapi").unwrap();
        assert_eq!(fastapi.routes, vec!["GET /items"]);
    }

    #[test]
    fn test_node_modules_not_scanned() {
        let temp = TempDir::new().unwrap();
        touch(
            &temp.path().join("node_modules/lib/server.js"),
            r#"app.get("/internal", handler);"#,
        );

        let groups = discover_endpoints(&RepoHandle::new(temp.path())).value;
        assert!(groups.is_empty());
    }

    #[test]
    fn test_duplicate_routes_collapsed() {
        let temp = TempDir::new().unwrap();
        touch(
            &temp.path().join("a.js"),
            r#"app.get("/x", h); app.get("/x", h);"#,
        );

        let groups = discover_endpoints(&RepoHandle::new(temp.path())).value;
        assert_eq!(groups[0].routes, vec!["GET /x"]);
    }
}
