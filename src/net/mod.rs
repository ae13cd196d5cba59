//! Network reachability checks.

pub mod connectivity;

pub use connectivity::{check_internet, Connectivity, NetProbes, SystemProbes};
