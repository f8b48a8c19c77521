//! Lenient version parsing for tag names.
//!
//! Release tags in the wild are rarely strict semver: `v1.2`, `2020.04.19`
//! and `v4` all show up. Missing components default to zero and leading
//! zeros in numeric components are accepted.

use std::sync::LazyLock;

use regex_lite::Regex;
use semver::{BuildMetadata, Prerelease, Version};

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .expect("version regex is valid")
});

/// Parse a tag name into a version.
///
/// Returns `None` for anything that does not look like a version.
pub fn parse_version(tag: &str) -> Option<Version> {
    let caps = VERSION_RE.captures(tag)?;

    let number = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let mut version = Version::new(number(1)?, number(2)?, number(3)?);

    if let Some(pre) = caps.get(4) {
        version.pre = Prerelease::new(pre.as_str()).ok()?;
    }
    if let Some(build) = caps.get(5) {
        version.build = BuildMetadata::new(build.as_str()).ok()?;
    }

    Some(version)
}

/// Build the tag name for a version string.
pub fn tag_for(version: &str, strip_v_prefix: bool) -> String {
    if strip_v_prefix {
        version.to_string()
    } else {
        format!("v{}", version)
    }
}
