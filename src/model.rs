use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

pub const CONCENTRATION_SELECTION_KEY: &str = "concentration-selection";
pub const CONCENTRATION_SECTION_SUFFIX: &str = "-concentration";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConcentrationId(String);

impl ConcentrationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConcentrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Course status as stored on an item.
///
/// Selector pseudo-items reuse the same field: `Unset` is the empty string and
/// `Selected` carries the chosen concentration id. Only `Taken` and
/// `CurrentlyTaking` count as completed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    NotTaken,
    Planned,
    CurrentlyTaking,
    Taken,
    Retake,
    Unset,
    Selected(ConcentrationId),
}

impl Status {
    pub const COURSE_STATUSES: [Status; 5] = [
        Status::NotTaken,
        Status::Planned,
        Status::CurrentlyTaking,
        Status::Taken,
        Status::Retake,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Status::NotTaken => "not_taken",
            Status::Planned => "planned",
            Status::CurrentlyTaking => "currently_taking",
            Status::Taken => "taken",
            Status::Retake => "retake",
            Status::Unset => "",
            Status::Selected(id) => id.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Status::NotTaken => "Not Taken",
            Status::Planned => "Planned",
            Status::CurrentlyTaking => "Currently Taking",
            Status::Taken => "Taken",
            Status::Retake => "Retake",
            Status::Unset => "",
            Status::Selected(id) => id.as_str(),
        }
    }

    pub fn counts_complete(&self) -> bool {
        matches!(self, Status::Taken | Status::CurrentlyTaking)
    }

    pub fn is_course_status(&self) -> bool {
        !matches!(self, Status::Unset | Status::Selected(_))
    }

    /// Strict parse used for user input; selector values are not accepted.
    pub fn parse_course(s: &str) -> Option<Status> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_taken" | "not" => Some(Status::NotTaken),
            "planned" => Some(Status::Planned),
            "currently_taking" => Some(Status::CurrentlyTaking),
            "taken" => Some(Status::Taken),
            "retake" => Some(Status::Retake),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&ConcentrationId> {
        match self {
            Status::Selected(id) => Some(id),
            _ => None,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        if s.is_empty() {
            return Status::Unset;
        }
        Status::parse_course(&s).unwrap_or(Status::Selected(ConcentrationId(s)))
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        match s {
            Status::Selected(id) => id.0,
            other => other.as_str().to_string(),
        }
    }
}

/// Accepts integers, floats and null. Fractional counts round up; anything
/// non-positive or non-finite is 0.
fn lenient_count<'de, D>(d: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(d)?;
    Ok(match raw {
        Some(n) if n.is_finite() && n > 0.0 => n.ceil().min(u32::MAX as f64) as u32,
        _ => 0,
    })
}

fn nullable_status<'de, D>(d: D) -> Result<Status, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Status>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Rule {
    AllOf,
    OneOf,
    AtLeast {
        #[serde(default, deserialize_with = "lenient_count")]
        count: u32,
    },
    UnitsAtLeast {
        #[serde(rename = "minUnits", default)]
        min_units: f64,
        #[serde(
            rename = "alsoRequireKeysTakenOneOf",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        also_require_one_of_group_keys: Option<Vec<String>>,
    },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseItem {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub units: f64,
    #[serde(default, deserialize_with = "nullable_status")]
    pub status: Status,
}

impl CourseItem {
    pub fn new(code: impl Into<String>, title: impl Into<String>, units: f64) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            units,
            status: Status::NotTaken,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.counts_complete()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseGroup {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<CourseItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Items(Vec<CourseItem>),
    Groups(Vec<CourseGroup>),
    Subsections(Vec<Arc<Section>>),
}

impl Default for SectionBody {
    fn default() -> Self {
        SectionBody::Items(Vec::new())
    }
}

/// A requirement node. On the wire the body is spread over the optional
/// `items` / `groups` / `subsections` fields; subsections win over groups and
/// groups win over items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SectionWire", into = "SectionWire")]
pub struct Section {
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub rule: Option<Rule>,
    pub body: SectionBody,
    pub editable: bool,
}

impl Section {
    pub fn items(&self) -> &[CourseItem] {
        match &self.body {
            SectionBody::Items(items) => items,
            _ => &[],
        }
    }

    /// Every course item in this node, including group members and nested
    /// subsections, in document order.
    pub fn all_items(&self) -> Vec<&CourseItem> {
        let mut out = Vec::new();
        collect_items(self, &mut out);
        out
    }
}

fn collect_items<'a>(section: &'a Section, out: &mut Vec<&'a CourseItem>) {
    match &section.body {
        SectionBody::Items(items) => out.extend(items.iter()),
        SectionBody::Groups(groups) => out.extend(groups.iter().flat_map(|g| g.items.iter())),
        SectionBody::Subsections(children) => {
            for child in children {
                collect_items(child, out);
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SectionWire {
    key: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<CourseItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    groups: Option<Vec<CourseGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subsections: Option<Vec<Arc<Section>>>,
    #[serde(default, skip_serializing_if = "is_false")]
    editable: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl From<SectionWire> for Section {
    fn from(w: SectionWire) -> Self {
        let body = match (w.subsections, w.groups, w.items) {
            (Some(subs), _, _) => SectionBody::Subsections(subs),
            (None, Some(groups), _) => SectionBody::Groups(groups),
            (None, None, items) => SectionBody::Items(items.unwrap_or_default()),
        };
        Section {
            key: w.key,
            title: w.title,
            description: w.description,
            rule: w.rule,
            body,
            editable: w.editable,
        }
    }
}

impl From<Section> for SectionWire {
    fn from(s: Section) -> Self {
        let (items, groups, subsections) = match s.body {
            SectionBody::Items(items) => (Some(items), None, None),
            SectionBody::Groups(groups) => (None, Some(groups), None),
            SectionBody::Subsections(subs) => (None, None, Some(subs)),
        };
        SectionWire {
            key: s.key,
            title: s.title,
            description: s.description,
            rule: s.rule,
            items,
            groups,
            subsections,
            editable: s.editable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Single,
    Primary,
    Secondary,
}

impl Slot {
    /// Reserved `code` of the selector pseudo-item holding this slot's choice.
    pub fn selector_code(self) -> &'static str {
        match self {
            Slot::Single => "concentration",
            Slot::Primary => "Primary Concentration",
            Slot::Secondary => "Secondary Concentration",
        }
    }

    pub fn selector_title(self) -> &'static str {
        match self {
            Slot::Single => "Select your concentration",
            Slot::Primary => "Select your primary concentration",
            Slot::Secondary => "Select your secondary concentration",
        }
    }

    pub fn parse(s: &str) -> Option<Slot> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "" => Some(Slot::Single),
            "primary" => Some(Slot::Primary),
            "secondary" => Some(Slot::Secondary),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Slot::Single => "single",
            Slot::Primary => "primary",
            Slot::Secondary => "secondary",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SlotLayout {
    Single,
    Dual {
        #[serde(rename = "primaryMinUnits")]
        primary_min_units: f64,
        #[serde(rename = "secondaryMinUnits")]
        secondary_min_units: f64,
    },
}

impl SlotLayout {
    pub fn slots(&self) -> &'static [Slot] {
        match self {
            SlotLayout::Single => &[Slot::Single],
            SlotLayout::Dual { .. } => &[Slot::Primary, Slot::Secondary],
        }
    }

    pub fn has_slot(&self, slot: Slot) -> bool {
        self.slots().contains(&slot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationOption {
    pub id: ConcentrationId,
    pub label: String,
}

fn default_selection_key() -> String {
    CONCENTRATION_SELECTION_KEY.to_string()
}

/// Links a major's selection section to its `<id>-concentration` course lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationScheme {
    #[serde(default = "default_selection_key")]
    pub selection_key: String,
    pub layout: SlotLayout,
    #[serde(default)]
    pub options: Vec<ConcentrationOption>,
}

impl ConcentrationScheme {
    pub fn new(layout: SlotLayout, options: Vec<ConcentrationOption>) -> Self {
        Self {
            selection_key: default_selection_key(),
            layout,
            options,
        }
    }

    pub fn has_option(&self, id: &ConcentrationId) -> bool {
        self.options.iter().any(|o| &o.id == id)
    }

    pub fn course_section_key(id: &ConcentrationId) -> String {
        format!("{}{}", id, CONCENTRATION_SECTION_SUFFIX)
    }

    /// Current choice for `slot`, read from the selector pseudo-item.
    pub fn selection(&self, major: &Major, slot: Slot) -> Option<ConcentrationId> {
        let section = major.section(&self.selection_key)?;
        section
            .items()
            .iter()
            .find(|it| it.code == slot.selector_code())
            .and_then(|it| it.status.selection())
            .cloned()
    }

    /// Course list backing a concentration; empty when the section is absent.
    pub fn courses<'a>(&self, major: &'a Major, id: &ConcentrationId) -> &'a [CourseItem] {
        major
            .section(&Self::course_section_key(id))
            .map(|s| s.items())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Major {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Arc<Section>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration: Option<ConcentrationScheme>,
}

impl Major {
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key).map(|s| s.as_ref())
    }
}

/// The single persisted and exported unit of state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSnapshot {
    #[serde(default)]
    pub owner: String,
    pub majors: Vec<Arc<Major>>,
}

impl AppSnapshot {
    pub fn major(&self, key: &str) -> Option<&Major> {
        self.majors.iter().find(|m| m.key == key).map(|m| m.as_ref())
    }
}
