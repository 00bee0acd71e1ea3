mod filesystem;
mod loader;
mod model;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{validate_config, ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME};
pub use model::{
    Config, RulesConfig, ScanConfig, ServerConfig, SyntaxCheckConfig, DEFAULT_DOCUMENT_CEILING,
    DEFAULT_SCAN_CEILING,
};
