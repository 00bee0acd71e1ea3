#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the svg-pwa-validator binary.
#[macro_export]
macro_rules! svg_pwa_validator {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("svg-pwa-validator"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.svg-pwa-validator.toml` at the fixture root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".svg-pwa-validator.toml", content);
    }
}

/// Hybrid document that passes every core test.
pub const GOOD_APP: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xhtml="http://www.w3.org/1999/xhtml" width="400" height="200" viewBox="0 0 400 200">
  <rect x="0" y="0" width="400" height="200" fill="#fafafa"/>
  <text x="10" y="20"><?php echo htmlspecialchars($title); ?></text>
  <foreignObject x="10" y="40" width="380" height="120">
    <xhtml:form method="post">
      <xhtml:input type="text" name="city"/>
      <xhtml:button type="submit">Show</xhtml:button>
    </xhtml:form>
  </foreignObject>
</svg>
"##;

/// Plain SVG with a group element and a clickable rectangle.
pub const BAD_APP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">
  <g><rect width="10" height="10" onclick="go()"/></g>
</svg>
"#;

/// Hybrid document calling a deny-listed function.
pub const DANGEROUS_APP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">
  <text><?php exec('uptime'); ?></text>
</svg>
"#;
