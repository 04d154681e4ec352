//! Build metadata accessors.
//! Includes the generated version.rs from the build script into a core
//! module, providing a single source of truth.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// Version line for `--version`: package version plus build metadata
pub fn version_string() -> String {
    format!(
        "{} (built {}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_TIME,
        GIT_HASH
    )
}
