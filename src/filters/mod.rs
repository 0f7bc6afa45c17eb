//! Named filters and the registry that resolves them.
//!
//! Filters come in two disjoint families:
//!
//! | Family | Id | Names |
//! |---|---|---|
//! | Stylistic presets | `preset` | `_1977`, `aden`, … `xpro2` (see [`presets`]) |
//! | Primitive adjustments | `css` | `contrast`, `grayscale`, `hue_rotate`, `saturate`, `sepia` (see [`css`]) |
//!
//! A user-supplied name is resolved through an explicit table of
//! `name → fn` entries built once per process. Nothing is ever evaluated from
//! the name itself, and a name outside the table stays unresolved: there is no
//! fallback filter.

pub mod css;
pub mod presets;

use image::DynamicImage;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Every filter takes the decoded image as its sole argument.
pub type FilterFn = fn(&DynamicImage) -> DynamicImage;

/// The family that implements a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterFamily {
    /// Instagram-style looks built from blend layers and adjustments.
    Preset,
    /// Single CSS-style colour adjustments.
    Css,
}

impl FilterFamily {
    pub fn id(self) -> &'static str {
        match self {
            Self::Preset => "preset",
            Self::Css => "css",
        }
    }
}

impl fmt::Display for FilterFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Filter '{name}' is registered by both '{first}' and '{second}'")]
    DuplicateName {
        name: &'static str,
        first: FilterFamily,
        second: FilterFamily,
    },
    #[error("Filter family '{0}' has no filters")]
    EmptyFamily(FilterFamily),
}

/// A filter name that matched the registry.
#[derive(Clone, Copy)]
pub struct ResolvedFilter {
    pub family: FilterFamily,
    pub name: &'static str,
    operation: FilterFn,
}

impl ResolvedFilter {
    /// `family::name`, e.g. `preset::lofi`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.family, self.name)
    }

    pub fn apply(&self, img: &DynamicImage) -> DynamicImage {
        (self.operation)(img)
    }
}

impl fmt::Debug for ResolvedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFilter")
            .field("family", &self.family)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// Family and name identify the operation; fn pointers are not compared.
impl PartialEq for ResolvedFilter {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.name == other.name
    }
}

impl Eq for ResolvedFilter {}

/// Immutable mapping from filter name to its family and operation.
#[derive(Debug)]
pub struct FilterRegistry {
    entries: BTreeMap<&'static str, ResolvedFilter>,
}

static BUILTIN: LazyLock<FilterRegistry> = LazyLock::new(|| {
    FilterRegistry::new(&[
        (FilterFamily::Preset, presets::FILTERS),
        (FilterFamily::Css, css::FILTERS),
    ])
    .expect("builtin filter families must be disjoint")
});

impl FilterRegistry {
    /// Build a registry from `(family, [(name, fn)])` tables.
    ///
    /// Fails if a name appears more than once, within or across families.
    pub fn new(
        families: &[(FilterFamily, &[(&'static str, FilterFn)])],
    ) -> Result<Self, RegistryError> {
        let mut entries = BTreeMap::new();
        for &(family, filters) in families {
            if filters.is_empty() {
                return Err(RegistryError::EmptyFamily(family));
            }
            for &(name, operation) in filters {
                let resolved = ResolvedFilter {
                    family,
                    name,
                    operation,
                };
                if let Some(existing) = entries.insert(name, resolved) {
                    return Err(RegistryError::DuplicateName {
                        name,
                        first: existing.family,
                        second: family,
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// The process-wide registry of all built-in filters.
    pub fn builtin() -> &'static FilterRegistry {
        &BUILTIN
    }

    /// Look up a name. `None` means unresolved; callers must treat it as an error.
    pub fn resolve(&self, name: &str) -> Option<ResolvedFilter> {
        self.entries.get(name).copied()
    }

    /// Every registered name, each exactly once.
    pub fn all_names(&self) -> BTreeSet<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Names implemented by one family, sorted.
    pub fn names_in(&self, family: FilterFamily) -> Vec<&'static str> {
        self.entries
            .values()
            .filter(|f| f.family == family)
            .map(|f| f.name)
            .collect()
    }

    /// Families present in the registry, sorted.
    pub fn families(&self) -> BTreeSet<FilterFamily> {
        self.entries.values().map(|f| f.family).collect()
    }
}
