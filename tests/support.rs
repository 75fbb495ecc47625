use std::fs;
use std::path::Path;

use mcp_enroll::Platform;
use tempfile::TempDir;

/// Isolated home + working directories for one test, with a `Platform`
/// fact snapshot pointing at them. Nothing touches the real environment.
pub struct TestEnv {
    pub home: TempDir,
    pub cwd: TempDir,
    pub platform: Platform,
}

pub fn test_env() -> TestEnv {
    let home = TempDir::new().expect("create temp home");
    let cwd = TempDir::new().expect("create temp cwd");
    let platform = Platform::rooted(home.path(), cwd.path());
    TestEnv {
        home,
        cwd,
        platform,
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("read {} failed: {e}", path.display()))
}

pub fn seed(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create seed dir");
    }
    fs::write(path, content).expect("seed file");
}
