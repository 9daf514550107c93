//! Changelog cleanup is idempotent and leaves no empty sections

use changegen::changelog::{cleanup, find_empty_sections};
use proptest::prelude::*;

const DEP_ONLY: &str = "Dependency updates only.";

fn line_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("# pkg"),
        Just("## 1.0.0"),
        Just("## 2.0.0"),
        Just("### Minor Changes"),
        Just("### Patch Changes"),
        Just("#### Details"),
        Just("-   Change"),
        Just("    indented body"),
        Just("```"),
        Just(""),
        Just("   "),
    ]
}

fn changelog_strategy() -> impl Strategy<Value = String> {
    (prop::collection::vec(line_strategy(), 0..24), any::<bool>()).prop_map(|(lines, newline)| {
        let mut text = lines.join("\n");
        if newline {
            text.push('\n');
        }
        text
    })
}

proptest! {
    #[test]
    fn test_cleanup_is_idempotent(text in changelog_strategy()) {
        let once = cleanup(&text, DEP_ONLY);
        let twice = cleanup(&once, DEP_ONLY);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(find_empty_sections(&once), 0);
    }
}
