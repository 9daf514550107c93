//! Bump ordering and version monotonicity

use changegen::changeset::{bump_version, BumpType};
use proptest::prelude::*;
use semver::{Prerelease, Version};

fn bump_strategy() -> impl Strategy<Value = BumpType> {
    prop_oneof![
        Just(BumpType::Patch),
        Just(BumpType::Minor),
        Just(BumpType::Major),
    ]
}

fn version_strategy() -> impl Strategy<Value = Version> {
    (0u64..50, 0u64..50, 0u64..50, prop::option::of("(alpha|beta|rc)\\.[1-9]")).prop_map(
        |(major, minor, patch, pre)| {
            let mut version = Version::new(major, minor, patch);
            if let Some(pre) = pre {
                version.pre = Prerelease::new(&pre).unwrap();
            }
            version
        },
    )
}

proptest! {
    #[test]
    fn test_bumped_version_is_greater(version in version_strategy(), bump in bump_strategy()) {
        let next = bump_version(&version, bump);
        prop_assert!(next > version, "{} -> {}", version, next);
        prop_assert!(next.pre.is_empty());
        prop_assert!(next.build.is_empty());
    }

    #[test]
    fn test_larger_bump_never_yields_smaller_version(version in version_strategy()) {
        let patch = bump_version(&version, BumpType::Patch);
        let minor = bump_version(&version, BumpType::Minor);
        let major = bump_version(&version, BumpType::Major);
        prop_assert!(patch <= minor);
        prop_assert!(minor <= major);
    }

    #[test]
    fn test_combining_bumps_is_order_independent(bumps in prop::collection::vec(bump_strategy(), 1..8)) {
        let forward = bumps.iter().copied().fold(BumpType::Patch, BumpType::max);
        let backward = bumps.iter().rev().copied().fold(BumpType::Patch, BumpType::max);
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(Some(forward), bumps.iter().copied().max());
    }
}
