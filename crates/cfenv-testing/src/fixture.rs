//! JSON fixture loader.
//!
//! Loads sample platform payloads from `fixtures/` at the workspace root.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Load a JSON fixture file relative to the workspace root.
///
/// # Example
/// ```no_run
/// use cfenv_testing::fixture::Fixture;
/// let val = Fixture::load("fixtures/vcap/services.json");
/// ```
pub struct Fixture;

impl Fixture {
    /// Load and parse a fixture JSON file at `workspace_root/path`.
    ///
    /// Panics if the file is missing or invalid JSON.
    pub fn load(relative_path: &str) -> Value {
        let contents = Self::load_str(relative_path);
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("invalid JSON in fixture {}: {}", relative_path, e))
    }

    /// Raw fixture text, for feeding straight into an environment variable.
    ///
    /// Panics if the file is missing.
    pub fn load_str(relative_path: &str) -> String {
        let full_path = Self::resolve(relative_path);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e))
    }

    /// Walk up from the calling crate's dir to the first ancestor that
    /// contains `relative_path`.
    fn resolve(relative_path: &str) -> PathBuf {
        let start = std::env::var("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::current_dir().unwrap());
        Path::new(&start)
            .ancestors()
            .map(|a| a.join(relative_path))
            .find(|p| p.exists())
            .unwrap_or_else(|| start.join(relative_path))
    }
}
