use serde::{Deserialize, Serialize};

/// Default scan ceiling: files above this are skipped unread (50 MiB).
pub const DEFAULT_SCAN_CEILING: u64 = 50 * 1024 * 1024;

/// Default `file_size` rule ceiling (1 MiB).
pub const DEFAULT_DOCUMENT_CEILING: u64 = 1024 * 1024;

/// Root configuration, read from `.svg-pwa-validator.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub syntax_check: SyntaxCheckConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Directory discovery [scan].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Target extensions, compared case-insensitively.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns excluded from directory scans.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Files larger than this are skipped without being read.
    #[serde(default = "default_scan_ceiling")]
    pub max_file_size: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: Vec::new(),
            max_file_size: DEFAULT_SCAN_CEILING,
        }
    }
}

/// Rule tuning [rules].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    /// Ceiling for the `file_size` rule.
    #[serde(default = "default_document_ceiling")]
    pub max_document_size: u64,

    /// Function names flagged by the dangerous-function rule.
    #[serde(default = "default_dangerous_functions")]
    pub dangerous_functions: Vec<String>,

    /// Element names rejected by the standard-elements rule.
    #[serde(default = "default_disallowed_elements")]
    pub disallowed_elements: Vec<String>,

    /// Run the runtime group, including the external syntax check.
    #[serde(default)]
    pub runtime_checks: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_document_size: DEFAULT_DOCUMENT_CEILING,
            dangerous_functions: default_dangerous_functions(),
            disallowed_elements: default_disallowed_elements(),
            runtime_checks: false,
        }
    }
}

/// External syntax checker [syntax_check].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyntaxCheckConfig {
    #[serde(default = "default_syntax_command")]
    pub command: String,

    /// Arguments placed before the document path.
    #[serde(default = "default_syntax_args")]
    pub args: Vec<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SyntaxCheckConfig {
    fn default() -> Self {
        Self {
            command: default_syntax_command(),
            args: default_syntax_args(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// HTTP surface [server].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["svg".to_string()]
}

const fn default_scan_ceiling() -> u64 {
    DEFAULT_SCAN_CEILING
}

const fn default_document_ceiling() -> u64 {
    DEFAULT_DOCUMENT_CEILING
}

fn default_dangerous_functions() -> Vec<String> {
    [
        "eval",
        "exec",
        "system",
        "shell_exec",
        "passthru",
        "file_get_contents",
        "file_put_contents",
        "unlink",
        "rmdir",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_disallowed_elements() -> Vec<String> {
    vec!["switch".to_string()]
}

fn default_syntax_command() -> String {
    "php".to_string()
}

fn default_syntax_args() -> Vec<String> {
    vec!["-l".to_string()]
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

const fn default_max_body_bytes() -> usize {
    64 * 1024
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
