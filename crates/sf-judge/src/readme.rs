//! README discovery

use std::path::Path;

/// Checked in order; the first that exists wins
pub const README_CANDIDATES: [&str; 4] = ["README.md", "README.txt", "readme.md", "readme.txt"];

/// Read the project README, or an empty string if there is none.
///
/// Non-UTF-8 files are decoded as Latin-1 rather than rejected.
pub fn read_readme(project_dir: &Path) -> String {
    for name in README_CANDIDATES {
        let path = project_dir.join(name);
        if !path.is_file() {
            continue;
        }
        if let Ok(bytes) = std::fs::read(&path) {
            return match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => e.into_bytes().iter().map(|&b| char::from(b)).collect(),
            };
        }
    }
    String::new()
}
