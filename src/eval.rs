use crate::model::{
    AppSnapshot, ConcentrationScheme, CourseGroup, CourseItem, Major, Rule, Section, SectionBody,
    Slot, SlotLayout, CONCENTRATION_SECTION_SUFFIX, CONCENTRATION_SELECTION_KEY,
};
use serde::Serialize;

/// What a section is evaluated against: the owning major supplies the
/// concentration scheme and the sibling course lists it points at.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalContext<'a> {
    pub major: Option<&'a Major>,
}

impl<'a> EvalContext<'a> {
    pub fn for_major(major: &'a Major) -> Self {
        Self { major: Some(major) }
    }

    fn scheme(&self) -> Option<(&'a Major, &'a ConcentrationScheme)> {
        let major = self.major?;
        major.concentration.as_ref().map(|s| (major, s))
    }

    fn is_selection_section(&self, section: &Section) -> bool {
        match self.scheme() {
            Some((_, scheme)) => section.key == scheme.selection_key,
            None => section.key == CONCENTRATION_SELECTION_KEY,
        }
    }
}

pub fn sum_units<'a, I>(items: I) -> f64
where
    I: IntoIterator<Item = &'a CourseItem>,
{
    items.into_iter().map(|it| it.units.max(0.0)).sum()
}

pub fn sum_units_completed<'a, I>(items: I) -> f64
where
    I: IntoIterator<Item = &'a CourseItem>,
{
    sum_units(items.into_iter().filter(|it| it.is_completed()))
}

pub fn count_completed<'a, I>(items: I) -> usize
where
    I: IntoIterator<Item = &'a CourseItem>,
{
    items.into_iter().filter(|it| it.is_completed()).count()
}

/// `min(done / required, 1) * 100`, or 0 when nothing is required.
fn ratio_percent(done: f64, required: f64) -> f64 {
    if required.is_nan() || required <= 0.0 || !done.is_finite() {
        return 0.0;
    }
    (100.0 * done / required).min(100.0)
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / (n as f64)
    }
}

fn group_items(groups: &[CourseGroup]) -> impl Iterator<Item = &CourseItem> {
    groups.iter().flat_map(|g| g.items.iter())
}

pub fn satisfied(section: &Section, ctx: &EvalContext<'_>) -> bool {
    if ctx.is_selection_section(section) {
        return concentration_satisfied(ctx);
    }
    match &section.body {
        SectionBody::Subsections(children) => children.iter().all(|c| satisfied(c, ctx)),
        SectionBody::Groups(groups) => groups_satisfied(section.rule.as_ref(), groups),
        SectionBody::Items(items) => items_satisfied(section.rule.as_ref(), items),
    }
}

fn groups_satisfied(rule: Option<&Rule>, groups: &[CourseGroup]) -> bool {
    let Some(Rule::UnitsAtLeast {
        min_units,
        also_require_one_of_group_keys,
    }) = rule
    else {
        return false;
    };
    if sum_units_completed(group_items(groups)) < *min_units {
        return false;
    }
    match also_require_one_of_group_keys {
        Some(keys) => keys.iter().any(|key| {
            groups
                .iter()
                .find(|g| &g.key == key)
                .map(|g| g.items.iter().any(|it| it.is_completed()))
                .unwrap_or(false)
        }),
        None => true,
    }
}

fn items_satisfied(rule: Option<&Rule>, items: &[CourseItem]) -> bool {
    match rule {
        Some(Rule::AllOf) => items.iter().all(|it| it.is_completed()),
        Some(Rule::OneOf) => items.iter().any(|it| it.is_completed()),
        Some(Rule::AtLeast { count }) => count_completed(items) >= *count as usize,
        Some(Rule::UnitsAtLeast { min_units, .. }) => sum_units_completed(items) >= *min_units,
        Some(Rule::Unrecognized) | None => false,
    }
}

fn concentration_satisfied(ctx: &EvalContext<'_>) -> bool {
    let Some((major, scheme)) = ctx.scheme() else {
        return false;
    };
    match &scheme.layout {
        SlotLayout::Dual {
            primary_min_units,
            secondary_min_units,
        } => {
            let (Some(primary), Some(secondary)) = (
                scheme.selection(major, Slot::Primary),
                scheme.selection(major, Slot::Secondary),
            ) else {
                return false;
            };
            sum_units_completed(scheme.courses(major, &primary)) >= *primary_min_units
                && sum_units_completed(scheme.courses(major, &secondary)) >= *secondary_min_units
        }
        SlotLayout::Single => match scheme.selection(major, Slot::Single) {
            Some(id) => scheme
                .courses(major, &id)
                .iter()
                .all(|it| it.is_completed()),
            None => false,
        },
    }
}

fn concentration_progress(ctx: &EvalContext<'_>) -> f64 {
    let Some((major, scheme)) = ctx.scheme() else {
        return 0.0;
    };
    match &scheme.layout {
        SlotLayout::Dual {
            primary_min_units,
            secondary_min_units,
        } => {
            let (Some(primary), Some(secondary)) = (
                scheme.selection(major, Slot::Primary),
                scheme.selection(major, Slot::Secondary),
            ) else {
                return 0.0;
            };
            let p = ratio_percent(
                sum_units_completed(scheme.courses(major, &primary)),
                *primary_min_units,
            );
            let s = ratio_percent(
                sum_units_completed(scheme.courses(major, &secondary)),
                *secondary_min_units,
            );
            (p + s) / 2.0
        }
        SlotLayout::Single => match scheme.selection(major, Slot::Single) {
            Some(id) => {
                let courses = scheme.courses(major, &id);
                ratio_percent(count_completed(courses) as f64, courses.len() as f64)
            }
            None => 0.0,
        },
    }
}

/// Completion percentage in [0, 100].
pub fn progress(section: &Section, ctx: &EvalContext<'_>) -> f64 {
    if ctx.is_selection_section(section) {
        return clamp_percent(concentration_progress(ctx));
    }
    if let SectionBody::Subsections(children) = &section.body {
        return clamp_percent(mean(children.iter().map(|c| progress(c, ctx))));
    }
    if satisfied(section, ctx) {
        return 100.0;
    }
    let pct = match (&section.body, section.rule.as_ref()) {
        (SectionBody::Groups(groups), Some(Rule::UnitsAtLeast { min_units, .. })) => {
            ratio_percent(sum_units_completed(group_items(groups)), *min_units)
        }
        (SectionBody::Items(items), Some(Rule::UnitsAtLeast { min_units, .. })) => {
            ratio_percent(sum_units_completed(items), *min_units)
        }
        (SectionBody::Items(items), Some(Rule::AtLeast { count })) => {
            ratio_percent(count_completed(items) as f64, *count as f64)
        }
        _ => 0.0,
    };
    clamp_percent(pct)
}

pub fn major_progress(major: &Major) -> f64 {
    let ctx = EvalContext::for_major(major);
    mean(major.sections.iter().map(|s| progress(s, &ctx)))
}

pub fn overall_progress(snapshot: &AppSnapshot) -> f64 {
    mean(snapshot.majors.iter().map(|m| major_progress(m)))
}

/// Concentration course lists are only shown for the selected single-slot
/// concentration; dual-slot lists stay hidden behind the selection section.
pub fn section_visible(major: &Major, section: &Section) -> bool {
    let Some(scheme) = major.concentration.as_ref() else {
        return true;
    };
    if !section.key.ends_with(CONCENTRATION_SECTION_SUFFIX) {
        return true;
    }
    match scheme.layout {
        SlotLayout::Dual { .. } => false,
        SlotLayout::Single => scheme
            .selection(major, Slot::Single)
            .map(|id| section.key == ConcentrationScheme::course_section_key(&id))
            .unwrap_or(false),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionReport {
    pub key: String,
    pub title: String,
    pub progress: f64,
    pub satisfied: bool,
    pub visible: bool,
    pub completed_units: f64,
    pub total_units: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<SectionReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorReport {
    pub key: String,
    pub title: String,
    pub progress: f64,
    pub sections: Vec<SectionReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub overall: f64,
    pub majors: Vec<MajorReport>,
}

fn section_report(section: &Section, ctx: &EvalContext<'_>, visible: bool) -> SectionReport {
    let all = section.all_items();
    let subsections = match &section.body {
        SectionBody::Subsections(children) => children
            .iter()
            .map(|c| section_report(c, ctx, visible))
            .collect(),
        _ => Vec::new(),
    };
    SectionReport {
        key: section.key.clone(),
        title: section.title.clone(),
        progress: progress(section, ctx),
        satisfied: satisfied(section, ctx),
        visible,
        completed_units: sum_units_completed(all.iter().copied()),
        total_units: sum_units(all.iter().copied()),
        subsections,
    }
}

pub fn major_report(major: &Major) -> MajorReport {
    let ctx = EvalContext::for_major(major);
    MajorReport {
        key: major.key.clone(),
        title: major.title.clone(),
        progress: major_progress(major),
        sections: major
            .sections
            .iter()
            .map(|s| section_report(s, &ctx, section_visible(major, s)))
            .collect(),
    }
}

pub fn progress_report(snapshot: &AppSnapshot) -> ProgressReport {
    ProgressReport {
        overall: overall_progress(snapshot),
        majors: snapshot.majors.iter().map(|m| major_report(m)).collect(),
    }
}
