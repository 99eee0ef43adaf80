//! Property tests for issue normalization and validation.

use proptest::prelude::*;

use drover::domain::models::{normalize_type, validate_issue, Issue, IssueKind};

proptest! {
    /// Normalizing twice is the same as normalizing once, for any input.
    #[test]
    fn normalize_type_is_idempotent(raw in ".*") {
        let once = normalize_type(&raw);
        prop_assert_eq!(normalize_type(&once), once);
    }

    /// Any casing of a recognized name maps to its canonical form.
    #[test]
    fn recognized_names_normalize_case_insensitively(
        name in prop::sample::select(vec!["epic", "feature", "story", "task"]),
        mask in prop::collection::vec(any::<bool>(), 7),
    ) {
        let mangled: String = name
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let expected = match name {
            "epic" => "Epic",
            "feature" | "story" => "Feature",
            "task" => "Task",
            _ => unreachable!(),
        };
        prop_assert_eq!(normalize_type(&mangled), expected);
    }

    /// Unrecognized names pass through byte for byte.
    #[test]
    fn unrecognized_names_pass_through(raw in "[a-z]{1,12}") {
        prop_assume!(!matches!(raw.as_str(), "epic" | "feature" | "story" | "task"));
        prop_assert_eq!(normalize_type(&raw), raw);
    }

    /// Parsing a canonical name round-trips to the same kind.
    #[test]
    fn kind_round_trips(kind in prop::sample::select(vec![
        IssueKind::Epic,
        IssueKind::Feature,
        IssueKind::Task,
    ])) {
        prop_assert_eq!(IssueKind::from_str(kind.as_str()), Some(kind));
    }

    /// Validation accepts an issue exactly when both id and title carry
    /// non-whitespace content.
    #[test]
    fn validation_requires_id_and_title(id in "[ a-z0-9-]{0,8}", title in "[ A-Za-z]{0,12}") {
        let issue = Issue {
            id: id.clone(),
            title: title.clone(),
            ..Issue::default()
        };
        let expected_ok = !id.trim().is_empty() && !title.trim().is_empty();
        prop_assert_eq!(validate_issue(&issue).is_ok(), expected_ok);
    }
}
