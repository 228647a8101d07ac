//! Sections and the section table.
//!
//! A section is one full-viewport pane of the slider. The default table has
//! exactly two, Gallery and About, addressed by [`Section::GALLERY`] and
//! [`Section::ABOUT`]. Sections are identified by ordinal so that the table
//! can grow without changing the router.
//!
//! ## Path Resolution
//!
//! Each section owns one canonical path. Resolution is an exact string match
//! against those paths; anything unrecognised lands on the first section:
//!
//! - `"/"` → Gallery
//! - `"/about"` → About
//! - `"/about/"`, `"/images"`, `""` → Gallery

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal of a section in the section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(usize);

impl Section {
    pub const GALLERY: Section = Section(0);
    pub const ABOUT: Section = Section(1);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Configuration of a single section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionSpec {
    /// Short identifier, used for element ids (`{name}-section`).
    pub name: String,
    /// Canonical path pushed to history when the section is entered.
    pub path: String,
    /// Document title while the section is shown.
    pub title: String,
    /// Tab label.
    pub label: String,
}

impl SectionSpec {
    pub fn new(name: &str, path: &str, title: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            title: title.to_string(),
            label: label.to_string(),
        }
    }
}

/// The ordered, non-empty list of sections.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTable {
    specs: Vec<SectionSpec>,
}

impl SectionTable {
    /// Build a table. Returns `None` for an empty list.
    pub fn new(specs: Vec<SectionSpec>) -> Option<Self> {
        if specs.is_empty() {
            None
        } else {
            Some(Self { specs })
        }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, section: Section) -> Option<&SectionSpec> {
        self.specs.get(section.index())
    }

    pub fn first(&self) -> Section {
        Section::new(0)
    }

    pub fn last(&self) -> Section {
        Section::new(self.specs.len() - 1)
    }

    /// The section after `section`, clamped to the last one.
    pub fn next(&self, section: Section) -> Section {
        Section::new((section.index() + 1).min(self.last().index()))
    }

    /// The section before `section`, clamped to the first one.
    pub fn previous(&self, section: Section) -> Section {
        Section::new(section.index().saturating_sub(1))
    }

    /// Map a location path to the section whose canonical path it equals.
    pub fn resolve_path(&self, path: &str) -> Section {
        self.specs
            .iter()
            .position(|spec| spec.path == path)
            .map(Section::new)
            .unwrap_or_else(|| self.first())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &SectionSpec)> {
        self.specs
            .iter()
            .enumerate()
            .map(|(i, spec)| (Section::new(i), spec))
    }
}
