//! Pure data-shaping core: classification, node merging, aggregate
//! statistics, filtering and policy ordering over API snapshots.

pub mod classify;
pub mod filter;
pub mod hardware;
pub mod merge;
pub mod policy;
pub mod stats;
pub mod types;
