//! Property-based tests for anchor ids.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::util::ids::{is_valid_anchor, slugify};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_slugify_is_deterministic(s in "\\PC*") {
            assert_eq!(slugify(&s), slugify(&s));
        }

        #[test]
        fn test_slugify_output_is_anchor_safe(s in "\\PC+") {
            let slug = slugify(&s);
            prop_assert!(is_valid_anchor(&slug), "{:?} -> {:?}", s, slug);
        }

        #[test]
        fn test_slugify_never_emits_separator_run_from_one_gap(
            left in "[a-z0-9]{1,8}",
            gap in "[ !?.,:;_/]{1,5}",
            right in "[a-z0-9]{1,8}",
        ) {
            let slug = slugify(&format!("{left}{gap}{right}"));
            assert_eq!(slug, format!("{left}-{right}"));
        }

        #[test]
        fn test_slugify_leaves_valid_anchors_alone(s in "[a-z0-9-]{1,24}") {
            assert_eq!(slugify(&s), s);
        }
    }
}
