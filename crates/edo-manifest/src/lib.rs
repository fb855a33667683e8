mod error;
mod package_json;
mod package_manager;
mod sort;
mod workspace;

pub use error::ManifestError;
pub use package_json::{PackageJson, find_nearest_package_json};
pub use package_manager::{PackageManager, detect_package_manager};
pub use sort::sort_package_json;
pub use workspace::{WorkspacePackage, discover_workspace_packages};

pub type Result<T> = std::result::Result<T, ManifestError>;

pub const PACKAGE_JSON: &str = "package.json";
