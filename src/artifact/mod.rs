//! The installed artifact: download, validation, and verification.

pub mod fetch;
pub mod verify;

pub use fetch::{sha256_hex, FetchOutcome, Fetcher};
pub use verify::{default_version_probe, extract_version, verify_install, VerifyReport};
