pub mod package_manager;
pub mod process;
pub mod version_control;

pub use package_manager::PackageManagerAgent;
pub use process::{CommandRunner, SystemCommandRunner};
pub use version_control::{CommitIdentity, VersionControlAgent};
