//! Property-based tests for the field set
//!
//! Tests invariants:
//! - After any input event at least one field is empty
//! - After any blur exactly one field is empty and it is the last one
//! - The derived list always equals the non-empty field values in order

use proptest::prelude::*;

use crate::core::fields::FieldSet;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

#[derive(Debug, Clone)]
enum FieldOp {
    /// Set the field at this position (modulo the field count) to a value.
    Input(usize, String),
    /// Blur the field at this position.
    Blur(usize),
    /// Move focus to the field at this position.
    Focus(usize),
}

fn arb_op() -> impl Strategy<Value = FieldOp> {
    prop_oneof![
        3 => (any::<usize>(), prop_oneof![Just(String::new()), "[a-z]{1,6}"])
            .prop_map(|(at, value)| FieldOp::Input(at, value)),
        1 => any::<usize>().prop_map(FieldOp::Blur),
        1 => any::<usize>().prop_map(FieldOp::Focus),
    ]
}

fn id_at(fields: &FieldSet, at: usize) -> crate::core::fields::FieldId {
    fields.fields()[at % fields.len()].id()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: The spare-field invariants hold after every event
    #[test]
    fn prop_spare_field_invariant(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut fields = FieldSet::new();

        for op in ops {
            match op {
                FieldOp::Input(at, value) => {
                    let id = id_at(&fields, at);
                    fields.on_field_input(id, value);
                    prop_assert!(fields.fields().iter().any(|field| field.is_empty()));
                }
                FieldOp::Blur(at) => {
                    let id = id_at(&fields, at);
                    fields.on_field_blur(id);
                    let empties: Vec<usize> = fields
                        .fields()
                        .iter()
                        .enumerate()
                        .filter(|(_, field)| field.is_empty())
                        .map(|(position, _)| position)
                        .collect();
                    prop_assert_eq!(empties, vec![fields.len() - 1]);
                }
                FieldOp::Focus(at) => {
                    let id = id_at(&fields, at);
                    let focused = fields.focus(id);
                    prop_assert!(focused.is_some());
                    prop_assert!(fields.get(focused.unwrap()).is_some());
                }
            }

            let expected: Vec<String> = fields
                .values()
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect();
            prop_assert_eq!(fields.derive().ingredients.into_vec(), expected);
        }
    }
}
