//! Semver bump levels and version arithmetic.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Magnitude of a release. Ordered so that combining bumps is `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl BumpType {
    /// All bump types, largest first (changelog heading order).
    pub const DESCENDING: [BumpType; 3] = [BumpType::Major, BumpType::Minor, BumpType::Patch];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        }
    }

    /// Changelog heading for this bump, e.g. "Minor Changes".
    pub fn heading(&self) -> &'static str {
        match self {
            BumpType::Patch => "Patch Changes",
            BumpType::Minor => "Minor Changes",
            BumpType::Major => "Major Changes",
        }
    }

    /// Bump implied by releasing a version that ends in `.0.0`, `.0` or neither.
    fn implied_by(version: &Version) -> BumpType {
        if version.minor == 0 && version.patch == 0 {
            BumpType::Major
        } else if version.patch == 0 {
            BumpType::Minor
        } else {
            BumpType::Patch
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patch" => Ok(BumpType::Patch),
            "minor" => Ok(BumpType::Minor),
            "major" => Ok(BumpType::Major),
            other => Err(format!(
                "invalid bump type '{}' (must be major, minor or patch)",
                other
            )),
        }
    }
}

/// Apply a bump to a version.
///
/// Prerelease and build identifiers are cleared. A prerelease graduates to its base
/// version when the bump does not exceed what that base already implies, so
/// `2.0.0-rc.1` with a minor bump releases as `2.0.0`.
pub fn bump_version(current: &Version, bump: BumpType) -> Version {
    let base = Version::new(current.major, current.minor, current.patch);
    if !current.pre.is_empty() && bump <= BumpType::implied_by(&base) {
        return base;
    }

    match bump {
        BumpType::Major => Version::new(base.major + 1, 0, 0),
        BumpType::Minor => Version::new(base.major, base.minor + 1, 0),
        BumpType::Patch => Version::new(base.major, base.minor, base.patch + 1),
    }
}
