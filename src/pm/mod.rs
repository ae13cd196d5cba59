//! Package manager detection and dependency installation.

pub mod install;
pub mod manager;

pub use install::{
    default_context, install_all, DependencySpec, InstallContext, InstallOutcome, InstallReport,
    DEPENDENCIES,
};
pub use manager::{PackageManager, PackageManagerKind};
