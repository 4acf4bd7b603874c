#![allow(dead_code)]

#[path = "../src/catalog.rs"]
mod catalog;
#[path = "../src/eval.rs"]
mod eval;
#[path = "../src/model.rs"]
mod model;
#[path = "../src/mutate.rs"]
mod mutate;

use std::sync::Arc;

use eval::{major_progress, overall_progress, progress, satisfied, EvalContext};
use model::{
    AppSnapshot, ConcentrationId, CourseItem, Major, Rule, Section, SectionBody, Slot, Status,
};
use mutate::{apply, ItemPath, Mutation, MutationError, SectionPath};

fn units_section(min_units: f64, items: Vec<CourseItem>) -> Section {
    Section {
        key: "core".to_string(),
        title: "Core".to_string(),
        description: None,
        rule: Some(Rule::UnitsAtLeast {
            min_units,
            also_require_one_of_group_keys: None,
        }),
        body: SectionBody::Items(items),
        editable: false,
    }
}

fn five_unit(n: usize, taken: usize) -> Vec<CourseItem> {
    (0..n)
        .map(|i| {
            let mut it = CourseItem::new(format!("C {}", i), format!("Course {}", i), 5.0);
            if i < taken {
                it.status = Status::Taken;
            }
            it
        })
        .collect()
}

fn section_index(snapshot: &AppSnapshot, major: usize, key: &str) -> usize {
    snapshot.majors[major]
        .sections
        .iter()
        .position(|s| s.key == key)
        .unwrap_or_else(|| panic!("section {} in major {}", key, major))
}

fn eval_section(snapshot: &AppSnapshot, major: usize, key: &str) -> (f64, bool) {
    let m: &Major = &snapshot.majors[major];
    let s = m.section(key).expect("section");
    let ctx = EvalContext::for_major(m);
    (progress(s, &ctx), satisfied(s, &ctx))
}

#[test]
fn two_of_five_taken_is_forty_percent() {
    let s = units_section(25.0, five_unit(2, 2));
    let ctx = EvalContext::default();
    assert_eq!(progress(&s, &ctx), 40.0);
    assert!(!satisfied(&s, &ctx));
}

#[test]
fn exactly_min_units_is_complete() {
    let s = units_section(25.0, five_unit(5, 5));
    let ctx = EvalContext::default();
    assert_eq!(progress(&s, &ctx), 100.0);
    assert!(satisfied(&s, &ctx));
}

#[test]
fn units_progress_is_monotone_and_bounded() {
    let ctx = EvalContext::default();
    let mut last = 0.0;
    for taken in 0..=8 {
        let s = units_section(25.0, five_unit(8, taken));
        let p = progress(&s, &ctx);
        assert!(p >= last, "progress dropped at {} taken", taken);
        assert!((0.0..=100.0).contains(&p));
        if satisfied(&s, &ctx) {
            assert_eq!(p, 100.0);
        }
        last = p;
    }
    assert_eq!(last, 100.0);
}

#[test]
fn empty_and_zero_unit_sections_report_zero() {
    let ctx = EvalContext::default();
    let mut empty = units_section(10.0, Vec::new());
    assert_eq!(progress(&empty, &ctx), 0.0);
    empty.rule = Some(Rule::AtLeast { count: 2 });
    assert_eq!(progress(&empty, &ctx), 0.0);

    let mut one_of = units_section(10.0, Vec::new());
    one_of.rule = Some(Rule::OneOf);
    assert_eq!(progress(&one_of, &ctx), 0.0);
    assert!(!progress(&one_of, &ctx).is_nan());
}

#[test]
fn multivariable_group_gates_calculus_section() {
    let snap = catalog::default_snapshot();
    let calc = section_index(&snap, 0, "calc-la");

    // MATH 21 (4u) + AP-10U (10u) from the single-variable group.
    let mut next = snap.clone();
    for item in ["2", "4"] {
        let path: ItemPath = format!("majors.0.sections.{}.groups.0.items.{}", calc, item)
            .parse()
            .expect("path");
        next = apply(
            &next,
            &Mutation::SetItemStatus {
                path,
                status: Status::Taken,
            },
        )
        .expect("set status");
    }
    let (_, ok) = eval_section(&next, 0, "calc-la");
    assert!(!ok, "units met but no multivariable course");

    let path: ItemPath = format!("majors.0.sections.{}.groups.1.items.0", calc)
        .parse()
        .expect("path");
    let next = apply(
        &next,
        &Mutation::SetItemStatus {
            path,
            status: Status::Taken,
        },
    )
    .expect("set status");
    let (p, ok) = eval_section(&next, 0, "calc-la");
    assert!(ok);
    assert_eq!(p, 100.0);
}

#[test]
fn dual_slot_with_primary_unset_is_zero() {
    let snap = catalog::default_snapshot();
    let next = apply(
        &snap,
        &Mutation::SelectConcentration {
            major_key: catalog::POLISCI_KEY.to_string(),
            slot: Slot::Secondary,
            concentration: Some(ConcentrationId::new("justice-law")),
        },
    )
    .expect("select secondary");

    let (p, ok) = eval_section(&next, 1, model::CONCENTRATION_SELECTION_KEY);
    assert_eq!(p, 0.0);
    assert!(!ok);
}

#[test]
fn adding_to_fixed_section_is_refused() {
    let snap = catalog::default_snapshot();
    let gateway = section_index(&snap, 0, "gateway");
    let err = apply(
        &snap,
        &Mutation::AddCourse {
            section: SectionPath::top(0, gateway),
            code: "SYMSYS 2".to_string(),
            title: "Extra".to_string(),
            units: 4.0,
        },
    )
    .expect_err("gateway is not editable");
    assert_eq!(err.code(), "invalid_operation");
    assert!(matches!(err, MutationError::Invalid(_)));
}

#[test]
fn adding_to_editable_section_updates_units() {
    let snap = catalog::default_snapshot();
    let additional = section_index(&snap, 1, "additional");
    let next = apply(
        &snap,
        &Mutation::AddCourse {
            section: SectionPath::top(1, additional),
            code: " POLISCI 114S ".to_string(),
            title: "International Security".to_string(),
            units: 5.0,
        },
    )
    .expect("add");
    let items = next.majors[1].sections[additional].items();
    let added = items.last().expect("appended");
    assert_eq!(added.code, "POLISCI 114S");
    assert_eq!(added.status, Status::NotTaken);
    assert_eq!(items.len(), snap.majors[1].sections[additional].items().len() + 1);
}

#[test]
fn taken_then_not_taken_restores_evaluation() {
    let snap = catalog::default_snapshot();
    let gateway = section_index(&snap, 0, "gateway");
    let before = eval_section(&snap, 0, "gateway");
    let path: ItemPath = format!("majors.0.sections.{}.items.0", gateway)
        .parse()
        .expect("path");

    let taken = apply(
        &snap,
        &Mutation::SetItemStatus {
            path: path.clone(),
            status: Status::Taken,
        },
    )
    .expect("taken");
    assert_eq!(eval_section(&taken, 0, "gateway"), (100.0, true));

    let back = apply(
        &taken,
        &Mutation::SetItemStatus {
            path,
            status: Status::NotTaken,
        },
    )
    .expect("not taken");
    assert_eq!(eval_section(&back, 0, "gateway"), before);
    assert_eq!(back, snap);
}

#[test]
fn major_and_overall_progress_are_means() {
    let snap = catalog::default_snapshot();
    let gateway = section_index(&snap, 0, "gateway");
    let path: ItemPath = format!("majors.0.sections.{}.items.0", gateway)
        .parse()
        .expect("path");
    let next = apply(
        &snap,
        &Mutation::SetItemStatus {
            path,
            status: Status::Taken,
        },
    )
    .expect("taken");

    let symsys: &Major = &next.majors[0];
    let ctx = EvalContext::for_major(symsys);
    let sum: f64 = symsys.sections.iter().map(|s| progress(s, &ctx)).sum();
    let expected = sum / symsys.sections.len() as f64;
    assert!((major_progress(symsys) - expected).abs() < 1e-9);

    let overall = (major_progress(&next.majors[0]) + major_progress(&next.majors[1])) / 2.0;
    assert!((overall_progress(&next) - overall).abs() < 1e-9);
    assert!(overall_progress(&next) > 0.0);
}

#[test]
fn refused_mutation_leaves_snapshot_alone() {
    let snap = catalog::default_snapshot();
    let path: ItemPath = "majors.0.sections.999.items.0".parse().expect("path");
    let err = apply(
        &snap,
        &Mutation::SetItemStatus {
            path,
            status: Status::Taken,
        },
    )
    .expect_err("stale index");
    assert_eq!(err.code(), "bad_path");
    assert_eq!(snap, catalog::default_snapshot());
}

#[test]
fn unchanged_majors_stay_shared_after_edit() {
    let snap = catalog::default_snapshot();
    let path: ItemPath = "majors.1.sections.0.items.0".parse().expect("path");
    let next = apply(
        &snap,
        &Mutation::SetItemStatus {
            path,
            status: Status::Planned,
        },
    )
    .expect("planned");
    assert!(Arc::ptr_eq(&snap.majors[0], &next.majors[0]));
    assert!(!Arc::ptr_eq(&snap.majors[1], &next.majors[1]));
    assert!(Arc::ptr_eq(
        &snap.majors[1].sections[1],
        &next.majors[1].sections[1]
    ));
}

#[test]
fn selector_items_cannot_take_course_statuses() {
    let snap = catalog::default_snapshot();
    let chosen = apply(
        &snap,
        &Mutation::SelectConcentration {
            major_key: catalog::SYMSYS_KEY.to_string(),
            slot: Slot::Single,
            concentration: Some(ConcentrationId::new("computer-music")),
        },
    )
    .expect("select");
    let selection = section_index(&chosen, 0, model::CONCENTRATION_SELECTION_KEY);
    let path: ItemPath = format!("majors.0.sections.{}.items.0", selection)
        .parse()
        .expect("path");

    let err = apply(
        &chosen,
        &Mutation::SetItemStatus {
            path,
            status: Status::Taken,
        },
    )
    .expect_err("selector edit refused");
    assert_eq!(err.code(), "invalid_operation");
    assert!(matches!(
        err,
        MutationError::Invalid(mutate::InvalidOperation::SelectorSection(_))
    ));
    let item = &chosen.majors[0].sections[selection].items()[0];
    assert_eq!(
        item.status,
        Status::Selected(ConcentrationId::new("computer-music"))
    );
}
