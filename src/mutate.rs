use crate::model::{
    AppSnapshot, ConcentrationId, CourseItem, Section, SectionBody, Slot, Status,
};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Majors,
    Sections,
    Subsections,
    Groups,
    Items,
}

impl Container {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "majors" => Some(Container::Majors),
            "sections" => Some(Container::Sections),
            "subsections" => Some(Container::Subsections),
            "groups" => Some(Container::Groups),
            "items" => Some(Container::Items),
            _ => None,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Container::Majors => "majors",
            Container::Sections => "sections",
            Container::Subsections => "subsections",
            Container::Groups => "groups",
            Container::Items => "items",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressingError {
    #[error("malformed path {path:?}: {reason}")]
    Malformed { path: String, reason: String },
    #[error("{container} index {index} out of range (len {len})")]
    OutOfRange {
        container: Container,
        index: usize,
        len: usize,
    },
    #[error("section {section:?} has no {container}")]
    WrongContainer {
        container: Container,
        section: String,
    },
    #[error("unknown major {0:?}")]
    UnknownMajor(String),
    #[error("major {major:?} has no section {section:?}")]
    MissingSection { major: String, section: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidOperation {
    #[error("section {0:?} is not editable")]
    NotEditable(String),
    #[error("course {0} is required")]
    MissingField(&'static str),
    #[error("units must be a positive number, got {0}")]
    BadUnits(f64),
    #[error("course {0:?} already exists in this section")]
    DuplicateCode(String),
    #[error("{0:?} is not a course status")]
    NotCourseStatus(String),
    #[error("major {0:?} has no concentration scheme")]
    NoScheme(String),
    #[error("section {0:?} holds concentration choices; select a concentration instead")]
    SelectorSection(String),
    #[error("major {major:?} has no {slot} concentration slot")]
    NoSuchSlot { major: String, slot: Slot },
    #[error("major {major:?} has no concentration {id:?}")]
    UnknownConcentration { major: String, id: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationError {
    #[error(transparent)]
    Addressing(#[from] AddressingError),
    #[error(transparent)]
    Invalid(#[from] InvalidOperation),
}

impl MutationError {
    pub fn code(&self) -> &'static str {
        match self {
            MutationError::Addressing(_) => "bad_path",
            MutationError::Invalid(_) => "invalid_operation",
        }
    }
}

/// `majors.M.sections.S(.subsections.N)*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPath {
    pub major: usize,
    pub section: usize,
    pub subsections: Vec<usize>,
}

impl SectionPath {
    pub fn top(major: usize, section: usize) -> Self {
        Self {
            major,
            section,
            subsections: Vec::new(),
        }
    }
}

/// `<section path>(.groups.G)?.items.I`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPath {
    pub section: SectionPath,
    pub group: Option<usize>,
    pub item: usize,
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "majors.{}.sections.{}", self.major, self.section)?;
        for s in &self.subsections {
            write!(f, ".subsections.{}", s)?;
        }
        Ok(())
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.section)?;
        if let Some(g) = self.group {
            write!(f, ".groups.{}", g)?;
        }
        write!(f, ".items.{}", self.item)
    }
}

fn parse_segments(path: &str) -> Result<Vec<(Container, usize)>, AddressingError> {
    let malformed = |reason: String| AddressingError::Malformed {
        path: path.to_string(),
        reason,
    };
    let parts: Vec<&str> = path.trim().split('.').collect();
    if parts.len() % 2 != 0 {
        return Err(malformed("expected container/index pairs".to_string()));
    }
    parts
        .chunks(2)
        .map(|pair| {
            let container = Container::parse(pair[0])
                .ok_or_else(|| malformed(format!("unknown container {:?}", pair[0])))?;
            let index = pair[1]
                .parse::<usize>()
                .map_err(|_| malformed(format!("bad index {:?}", pair[1])))?;
            Ok((container, index))
        })
        .collect()
}

fn section_path_from_segments(
    path: &str,
    segments: &[(Container, usize)],
) -> Result<SectionPath, AddressingError> {
    let malformed = |reason: &str| AddressingError::Malformed {
        path: path.to_string(),
        reason: reason.to_string(),
    };
    let (major, section) = match segments {
        [(Container::Majors, m), (Container::Sections, s), ..] => (*m, *s),
        _ => return Err(malformed("must start with majors.N.sections.N")),
    };
    let mut subsections = Vec::new();
    for (container, idx) in &segments[2..] {
        if *container != Container::Subsections {
            return Err(malformed("only subsections may follow sections"));
        }
        subsections.push(*idx);
    }
    Ok(SectionPath {
        major,
        section,
        subsections,
    })
}

impl FromStr for SectionPath {
    type Err = AddressingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = parse_segments(s)?;
        section_path_from_segments(s, &segments)
    }
}

impl FromStr for ItemPath {
    type Err = AddressingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = parse_segments(s)?;
        let malformed = |reason: &str| AddressingError::Malformed {
            path: s.to_string(),
            reason: reason.to_string(),
        };
        let Some(((Container::Items, item), rest)) = segments.split_last().map(|(l, r)| (*l, r))
        else {
            return Err(malformed("must end with items.N"));
        };
        let (group, rest) = match rest.split_last() {
            Some(((Container::Groups, g), head)) => (Some(*g), head),
            _ => (None, rest),
        };
        Ok(ItemPath {
            section: section_path_from_segments(s, rest)?,
            group,
            item,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetItemStatus {
        path: ItemPath,
        status: Status,
    },
    SelectConcentration {
        major_key: String,
        slot: Slot,
        concentration: Option<ConcentrationId>,
    },
    AddCourse {
        section: SectionPath,
        code: String,
        title: String,
        units: f64,
    },
    RemoveCourse {
        section: SectionPath,
        index: usize,
    },
}

/// Applies `mutation` to a copy of `snapshot`.
///
/// Majors and sections are shared behind `Arc`, so only the nodes on the
/// addressed path are cloned. On error the copy is dropped and the caller
/// keeps its snapshot as-is.
pub fn apply(snapshot: &AppSnapshot, mutation: &Mutation) -> Result<AppSnapshot, MutationError> {
    let mut next = snapshot.clone();
    match mutation {
        Mutation::SetItemStatus { path, status } => {
            if !status.is_course_status() {
                return Err(InvalidOperation::NotCourseStatus(status.as_str().to_string()).into());
            }
            if let Some(key) = selection_section_key(&next, &path.section) {
                return Err(InvalidOperation::SelectorSection(key).into());
            }
            let item = item_mut(&mut next, path)?;
            item.status = status.clone();
        }
        Mutation::SelectConcentration {
            major_key,
            slot,
            concentration,
        } => select_concentration(&mut next, major_key, *slot, concentration.as_ref())?,
        Mutation::AddCourse {
            section,
            code,
            title,
            units,
        } => add_course(&mut next, section, code, title, *units)?,
        Mutation::RemoveCourse { section, index } => remove_course(&mut next, section, *index)?,
    }
    Ok(next)
}

/// Key of the addressed section when it is its major's concentration selector.
fn selection_section_key(snapshot: &AppSnapshot, path: &SectionPath) -> Option<String> {
    if !path.subsections.is_empty() {
        return None;
    }
    let major = snapshot.majors.get(path.major)?;
    let scheme = major.concentration.as_ref()?;
    let section = major.sections.get(path.section)?;
    (section.key == scheme.selection_key).then(|| section.key.clone())
}

fn section_mut<'a>(
    snapshot: &'a mut AppSnapshot,
    path: &SectionPath,
) -> Result<&'a mut Section, AddressingError> {
    let len = snapshot.majors.len();
    let major = snapshot
        .majors
        .get_mut(path.major)
        .ok_or(AddressingError::OutOfRange {
            container: Container::Majors,
            index: path.major,
            len,
        })?;
    let major = Arc::make_mut(major);
    let len = major.sections.len();
    let top = major
        .sections
        .get_mut(path.section)
        .ok_or(AddressingError::OutOfRange {
            container: Container::Sections,
            index: path.section,
            len,
        })?;
    let mut section = Arc::make_mut(top);
    for &idx in &path.subsections {
        let key = section.key.clone();
        section = match &mut section.body {
            SectionBody::Subsections(children) => {
                let len = children.len();
                match children.get_mut(idx) {
                    Some(child) => Arc::make_mut(child),
                    None => {
                        return Err(AddressingError::OutOfRange {
                            container: Container::Subsections,
                            index: idx,
                            len,
                        });
                    }
                }
            }
            _ => {
                return Err(AddressingError::WrongContainer {
                    container: Container::Subsections,
                    section: key,
                });
            }
        };
    }
    Ok(section)
}

fn item_mut<'a>(
    snapshot: &'a mut AppSnapshot,
    path: &ItemPath,
) -> Result<&'a mut CourseItem, AddressingError> {
    let section = section_mut(snapshot, &path.section)?;
    let items = match (&mut section.body, path.group) {
        (SectionBody::Items(items), None) => items,
        (SectionBody::Groups(groups), Some(g)) => {
            let len = groups.len();
            &mut groups
                .get_mut(g)
                .ok_or(AddressingError::OutOfRange {
                    container: Container::Groups,
                    index: g,
                    len,
                })?
                .items
        }
        (_, group) => {
            return Err(AddressingError::WrongContainer {
                container: if group.is_some() {
                    Container::Groups
                } else {
                    Container::Items
                },
                section: section.key.clone(),
            });
        }
    };
    let len = items.len();
    items.get_mut(path.item).ok_or(AddressingError::OutOfRange {
        container: Container::Items,
        index: path.item,
        len,
    })
}

fn editable_items<'a>(
    snapshot: &'a mut AppSnapshot,
    path: &SectionPath,
) -> Result<&'a mut Vec<CourseItem>, MutationError> {
    let section = section_mut(snapshot, path)?;
    if !section.editable {
        return Err(InvalidOperation::NotEditable(section.key.clone()).into());
    }
    match &mut section.body {
        SectionBody::Items(items) => Ok(items),
        _ => Err(AddressingError::WrongContainer {
            container: Container::Items,
            section: section.key.clone(),
        }
        .into()),
    }
}

fn add_course(
    snapshot: &mut AppSnapshot,
    path: &SectionPath,
    code: &str,
    title: &str,
    units: f64,
) -> Result<(), MutationError> {
    let items = editable_items(snapshot, path)?;
    let code = code.trim();
    let title = title.trim();
    if code.is_empty() {
        return Err(InvalidOperation::MissingField("code").into());
    }
    if title.is_empty() {
        return Err(InvalidOperation::MissingField("title").into());
    }
    if !units.is_finite() || units <= 0.0 {
        return Err(InvalidOperation::BadUnits(units).into());
    }
    if items.iter().any(|it| it.code == code) {
        return Err(InvalidOperation::DuplicateCode(code.to_string()).into());
    }
    items.push(CourseItem::new(code, title, units));
    Ok(())
}

fn remove_course(
    snapshot: &mut AppSnapshot,
    path: &SectionPath,
    index: usize,
) -> Result<(), MutationError> {
    let items = editable_items(snapshot, path)?;
    if index >= items.len() {
        return Err(AddressingError::OutOfRange {
            container: Container::Items,
            index,
            len: items.len(),
        }
        .into());
    }
    items.remove(index);
    Ok(())
}

fn select_concentration(
    snapshot: &mut AppSnapshot,
    major_key: &str,
    slot: Slot,
    concentration: Option<&ConcentrationId>,
) -> Result<(), MutationError> {
    let major_idx = snapshot
        .majors
        .iter()
        .position(|m| m.key == major_key)
        .ok_or_else(|| AddressingError::UnknownMajor(major_key.to_string()))?;
    let major = Arc::make_mut(&mut snapshot.majors[major_idx]);
    let scheme = major
        .concentration
        .clone()
        .ok_or_else(|| InvalidOperation::NoScheme(major_key.to_string()))?;
    if !scheme.layout.has_slot(slot) {
        return Err(InvalidOperation::NoSuchSlot {
            major: major_key.to_string(),
            slot,
        }
        .into());
    }
    if let Some(id) = concentration {
        if !scheme.has_option(id) {
            return Err(InvalidOperation::UnknownConcentration {
                major: major_key.to_string(),
                id: id.to_string(),
            }
            .into());
        }
    }

    let section_idx = major
        .sections
        .iter()
        .position(|s| s.key == scheme.selection_key)
        .ok_or_else(|| AddressingError::MissingSection {
            major: major_key.to_string(),
            section: scheme.selection_key.clone(),
        })?;
    let section = Arc::make_mut(&mut major.sections[section_idx]);
    let SectionBody::Items(items) = &mut section.body else {
        return Err(AddressingError::WrongContainer {
            container: Container::Items,
            section: section.key.clone(),
        }
        .into());
    };

    let status = concentration
        .cloned()
        .map(Status::Selected)
        .unwrap_or(Status::Unset);
    match items.iter_mut().find(|it| it.code == slot.selector_code()) {
        Some(item) => item.status = status,
        None => items.push(CourseItem {
            code: slot.selector_code().to_string(),
            title: slot.selector_title().to_string(),
            units: 0.0,
            status,
        }),
    }
    Ok(())
}
