use super::{bools, cells, frame_ops};
use crate::{
    ops::{FrameArgs, FrameOps},
    value::{Value, canonical_cmp},
};
use proptest::prelude::*;

/// Complement pairs of the per-row catalog; every pair must invert
/// element-wise with nulls preserved.
const COMPLEMENT_PAIRS: &[(&str, &str)] = &[
    ("equal_to", "not_equal_to"),
    ("equal_to_case_insensitive", "not_equal_to_case_insensitive"),
    ("contains", "does_not_contain"),
    ("contains_case_insensitive", "does_not_contain_case_insensitive"),
    ("is_contained_by", "is_not_contained_by"),
    (
        "is_contained_by_case_insensitive",
        "is_not_contained_by_case_insensitive",
    ),
    ("empty", "non_empty"),
    ("is_complete_date", "is_incomplete_date"),
    ("is_unique_set", "is_not_unique_set"),
    ("is_unique_relationship", "is_not_unique_relationship"),
    ("is_valid_reference", "is_not_valid_reference"),
    ("has_different_values", "has_same_values"),
    ("additional_columns_empty", "additional_columns_not_empty"),
    (
        "present_on_multiple_rows_within",
        "not_present_on_multiple_rows_within",
    ),
    (
        "has_next_corresponding_record",
        "does_not_have_next_corresponding_record",
    ),
];

fn args_for(name: &str) -> FrameArgs {
    let base = FrameArgs::new().target("a");
    match name {
        "empty" | "non_empty" | "is_complete_date" | "is_incomplete_date"
        | "has_different_values" | "has_same_values" | "additional_columns_empty"
        | "additional_columns_not_empty" | "is_valid_reference" | "is_not_valid_reference" => base,
        "present_on_multiple_rows_within" | "not_present_on_multiple_rows_within" => {
            base.within("g")
        }
        "has_next_corresponding_record" | "does_not_have_next_corresponding_record" => {
            base.comparator("b").within("g").ordering("b")
        }
        _ => base.comparator("b"),
    }
}

fn arb_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (0i64..3).prop_map(Value::from),
        prop_oneof![Just(""), Just("x"), Just("y"), Just("X")].prop_map(Value::from),
    ]
}

fn arb_group_cell() -> impl Strategy<Value = Value> {
    prop_oneof![Just(Value::Null), Just(Value::from("p")), Just(Value::from("q"))]
}

prop_compose! {
    fn arb_frame_ops()(rows in 0usize..5)(
        a in prop::collection::vec(arb_cell(), rows),
        b in prop::collection::vec(arb_cell(), rows),
        g in prop::collection::vec(arb_group_cell(), rows),
    ) -> FrameOps {
        frame_ops([("a", a), ("b", b), ("g", g)])
    }
}

proptest! {
    #[test]
    fn per_row_outputs_match_the_row_count(ops in arb_frame_ops()) {
        let rows = ops.bundle().frame().rows();
        for &(name, _) in COMPLEMENT_PAIRS {
            let output = ops.evaluate(name, &args_for(name)).unwrap();
            let column = output.as_column().unwrap_or_else(|| panic!("{name} is per-row"));
            prop_assert_eq!(column.len(), rows, "{} broke the length law", name);
        }
    }

    #[test]
    fn complements_invert_element_wise(ops in arb_frame_ops()) {
        for &(name, complement_name) in COMPLEMENT_PAIRS {
            let plain = ops.evaluate(name, &args_for(name)).unwrap();
            let complement = ops
                .evaluate(complement_name, &args_for(complement_name))
                .unwrap();
            prop_assert_eq!(
                cells(&plain.complement()),
                cells(&complement),
                "{} / {} disagree",
                name,
                complement_name
            );
        }
    }

    #[test]
    fn unique_relationship_is_symmetric_in_its_pair(ops in arb_frame_ops()) {
        let forward = ops
            .is_unique_relationship(&FrameArgs::new().target("a").comparator("b"))
            .unwrap();
        let backward = ops
            .is_unique_relationship(&FrameArgs::new().target("b").comparator("a"))
            .unwrap();
        prop_assert_eq!(cells(&forward), cells(&backward));
    }

    #[test]
    fn is_ordered_by_holds_iff_non_decreasing(column in prop::collection::vec(arb_cell(), 0..6)) {
        let ops = frame_ops([("a", column.clone())]);
        let out = ops.is_ordered_by(&FrameArgs::new().target("a")).unwrap();
        let every_row = bools(&out).into_iter().all(|row| row);

        let mut sorted = column.clone();
        sorted.sort_by(|left, right| canonical_cmp(left, right));
        prop_assert_eq!(every_row, sorted == column);
    }

    #[test]
    fn aggregate_ordered_set_complements(ops in arb_frame_ops()) {
        let args = FrameArgs::new().target("a").comparator("g");
        let ordered = ops.is_ordered_set(&args).unwrap().as_bool().unwrap();
        let not_ordered = ops.is_not_ordered_set(&args).unwrap().as_bool().unwrap();
        prop_assert_eq!(ordered, !not_ordered);
    }
}
