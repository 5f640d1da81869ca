//! Property-based tests for the wizard aggregate.
//!
//! Tests invariants:
//! - A write reads back and leaves sibling fields untouched
//! - `next` moves exactly one step when valid and never otherwise
//! - `previous` always moves back one step, floored at the first
//! - Jumping to the current step changes nothing

use proptest::prelude::*;
use serde_json::{json, Value};

use super::{StepSequence, Wizard, WizardStep};
use crate::domain::foundation::UserId;
use crate::domain::profile::Section;

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Kind {
    Text,
    Time,
    Flag,
    List,
    Hours,
}

/// Leaf paths of every value shape, grouped so that siblings share a parent.
const LEAVES: &[(Section, &str, Kind)] = &[
    (Section::PersonalInfo, "firstName", Kind::Text),
    (Section::PersonalInfo, "lastName", Kind::Text),
    (Section::PersonalInfo, "email", Kind::Text),
    (Section::PersonalInfo, "phone", Kind::Text),
    (Section::PersonalInfo, "city", Kind::Text),
    (Section::HealthInfo, "contraindications", Kind::List),
    (Section::HealthInfo, "dailyNeeds", Kind::List),
    (Section::HealthInfo, "treatments.current", Kind::List),
    (Section::HealthInfo, "treatments.frequency", Kind::Text),
    (Section::HealthInfo, "medicalFollowUp.frequency", Kind::Text),
    (Section::HealthInfo, "medicalFollowUp.specialists", Kind::List),
    (Section::HealthInfo, "medicalFollowUp.hospitalProximity", Kind::Flag),
    (Section::Schedule, "workHours.preferred.start", Kind::Time),
    (Section::Schedule, "workHours.preferred.end", Kind::Time),
    (Section::Schedule, "workHours.maxPerDay", Kind::Hours),
    (Section::Schedule, "workHours.flexibilityNeeds", Kind::List),
    (Section::Schedule, "breaks.frequency", Kind::Text),
    (Section::Schedule, "breaks.duration", Kind::Text),
    (Section::Schedule, "breaks.specific", Kind::List),
    (Section::Schedule, "adaptation.remote", Kind::Flag),
    (Section::Schedule, "adaptation.hybrid", Kind::Flag),
    (Section::Professional, "education.degree", Kind::Text),
    (Section::Professional, "education.school", Kind::Text),
    (Section::Professional, "education.year", Kind::Text),
];

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 @.-]{0,24}"
}

fn arb_value(kind: Kind) -> BoxedStrategy<Value> {
    match kind {
        Kind::Text => arb_text().prop_map(Value::from).boxed(),
        Kind::Time => (0u32..24, 0u32..60)
            .prop_map(|(h, m)| json!(format!("{:02}:{:02}", h, m)))
            .boxed(),
        Kind::Flag => any::<bool>().prop_map(Value::from).boxed(),
        Kind::List => prop::collection::vec(arb_text(), 0..4)
            .prop_map(|items| json!(items))
            .boxed(),
        Kind::Hours => (1u8..=24).prop_map(Value::from).boxed(),
    }
}

fn arb_initial() -> Vec<BoxedStrategy<Value>> {
    LEAVES.iter().map(|(_, _, kind)| arb_value(*kind)).collect()
}

/// A leaf index with a value of the matching shape.
fn arb_write() -> impl Strategy<Value = (usize, Value)> {
    (0..LEAVES.len()).prop_flat_map(|i| (Just(i), arb_value(LEAVES[i].2)))
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    Jump(usize),
    Fill,
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Previous),
        (1usize..=4).prop_map(Op::Jump),
        Just(Op::Fill),
        Just(Op::Clear),
    ]
}

fn new_wizard() -> Wizard {
    Wizard::new(UserId::new("prop-user").unwrap())
}

/// Makes every step valid.
fn fill(w: &mut Wizard) {
    w.set_field(Section::PersonalInfo, "firstName", json!("Jean")).unwrap();
    w.set_field(Section::PersonalInfo, "lastName", json!("Dupont")).unwrap();
    w.set_field(Section::PersonalInfo, "email", json!("jean@x.fr")).unwrap();
    w.set_field(Section::HealthInfo, "disabilityType", json!(["motor"])).unwrap();
    w.set_field(Section::Schedule, "workHours.preferred.start", json!("09:00")).unwrap();
    w.set_field(Section::Schedule, "workHours.preferred.end", json!("17:00")).unwrap();
    w.set_field(
        Section::Professional,
        "skills",
        json!([{ "id": "1", "name": "React", "level": "avancé" }]),
    )
    .unwrap();
}

/// Makes every step invalid.
fn clear(w: &mut Wizard) {
    w.set_field(Section::PersonalInfo, "firstName", json!("")).unwrap();
    w.set_field(Section::HealthInfo, "disabilityType", json!([])).unwrap();
    w.set_field(Section::Schedule, "workHours.preferred.end", json!("")).unwrap();
    w.set_field(Section::Professional, "skills", json!([])).unwrap();
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn write_reads_back_and_preserves_siblings(
        initial in arb_initial(),
        (target, value) in arb_write(),
    ) {
        let mut w = new_wizard();
        for ((section, path, _), v) in LEAVES.iter().zip(&initial) {
            w.set_field(*section, path, v.clone()).unwrap();
        }

        let (section, path, _) = LEAVES[target];
        w.set_field(section, path, value.clone()).unwrap();

        prop_assert_eq!(w.profile().field_value(section, path), Some(value));
        for (i, ((s, p, _), v)) in LEAVES.iter().zip(&initial).enumerate() {
            if i != target {
                prop_assert_eq!(w.profile().field_value(*s, p), Some(v.clone()));
            }
        }
    }

    #[test]
    fn navigation_respects_validation(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut w = new_wizard();
        for op in ops {
            let before = w.current_index();
            match op {
                Op::Next => {
                    let valid = w.can_advance();
                    let moved = w.next().unwrap();
                    prop_assert_eq!(moved, valid);
                    let expected = if valid {
                        (before + 1).min(StepSequence::count())
                    } else {
                        before
                    };
                    prop_assert_eq!(w.current_index(), expected);
                }
                Op::Previous => {
                    w.previous().unwrap();
                    prop_assert_eq!(w.current_index(), before.saturating_sub(1).max(1));
                }
                Op::Jump(target) => {
                    let step = WizardStep::from_index(target).unwrap();
                    let valid = w.can_advance();
                    w.jump_to_step(step).unwrap();
                    let expected = if valid || target == before { target } else { before };
                    prop_assert_eq!(w.current_index(), expected);
                }
                Op::Fill => fill(&mut w),
                Op::Clear => clear(&mut w),
            }
            prop_assert!(w.current_index() >= 1 && w.current_index() <= StepSequence::count());
        }
    }

    #[test]
    fn jump_to_current_step_changes_nothing(fill_first in any::<bool>(), steps in 0usize..4) {
        let mut w = new_wizard();
        if fill_first {
            fill(&mut w);
        }
        for _ in 0..steps {
            w.next().unwrap();
        }
        let profile = w.profile().clone();
        let errors = w.errors().clone();
        let current = w.current_step();

        prop_assert!(w.jump_to_step(current).unwrap());
        prop_assert_eq!(w.current_step(), current);
        prop_assert_eq!(w.profile(), &profile);
        prop_assert_eq!(w.errors(), &errors);
    }
}
