//! Global Constants
//!
//! Centralized constants for analysis tuning and detection tables.
//! All magic values should be defined here with documentation.

/// Analysis walk constants
pub mod analysis {
    /// Directory names excluded from every tree walk
    pub const IGNORED_DIRS: &[&str] = &[
        ".git",
        "node_modules",
        "__pycache__",
        ".next",
        "dist",
        "build",
        "venv",
        ".venv",
    ];

    /// File extension to language label table.
    ///
    /// Declaration order is the tie-break order when languages share a
    /// file count.
    pub const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
        ("js", "JavaScript"),
        ("ts", "TypeScript"),
        ("jsx", "JavaScript"),
        ("tsx", "TypeScript"),
        ("py", "Python"),
        ("java", "Java"),
        ("go", "Go"),
        ("rs", "Rust"),
        ("cpp", "C++"),
        ("c", "C"),
        ("cs", "C#"),
        ("php", "PHP"),
    ];

    /// Maximum number of primary languages reported
    pub const MAX_PRIMARY_LANGUAGES: usize = 3;

    /// Entry-point filenames collected as module key files
    pub const KEY_FILENAMES: &[&str] = &["index.ts", "index.tsx", "index.js", "main.py", "app.py"];

    /// Maximum key files recorded per module
    pub const MAX_KEY_FILES: usize = 3;

    /// Maximum endpoints recorded per route style
    pub const MAX_ENDPOINTS_PER_STYLE: usize = 15;
}

/// Repository hygiene marker filenames
pub mod markers {
    /// README casing variants checked at the repository root
    pub const README_NAMES: &[&str] = &["README.md", "README.MD", "readme.md", "Readme.md"];

    /// CI workflow directory relative to the repository root
    pub const CI_WORKFLOW_DIR: &str = ".github/workflows";

    /// Directory names (lower-cased) that indicate a test suite
    pub const TEST_DIR_NAMES: &[&str] = &["tests", "__tests__", "test"];

    /// Environment example file variants checked at the repository root
    pub const ENV_EXAMPLE_NAMES: &[&str] = &[".env.example", ".env.sample", ".env.template"];
}

/// Retrieval constants
pub mod retrieval {
    /// The only hosting domain accepted for remote locators
    pub const SUPPORTED_HOST: &str = "github.com";

    /// Clone timeout (seconds)
    pub const CLONE_TIMEOUT_SECS: u64 = 120;

    /// Prefix for temporary workspace directories
    pub const WORKSPACE_PREFIX: &str = "repolens_";
}

/// Prompt construction constants
pub mod prompt {
    /// Maximum characters of the folder tree included in a prompt
    pub const MAX_TREE_CHARS: usize = 2_000;

    /// Maximum external dependencies listed in a prompt
    pub const MAX_PROMPT_DEPENDENCIES: usize = 20;

    /// Maximum key files listed per module in a prompt
    pub const MAX_PROMPT_MODULES: usize = 10;
}

/// HTTP/Network constants
pub mod network {
    /// Default LLM request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Default bind address for the HTTP server
    pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
}
