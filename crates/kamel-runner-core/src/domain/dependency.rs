//! Build descriptor dependencies and the filter that picks runtime ones.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Group fragments that mark platform/runtime framework dependencies.
const PLATFORM_GROUP_MARKERS: &[&str] = &["quarkus", "apache"];

/// A declared `(group, artifact, version)` dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// `mvn:<group>:<artifact>:<version>`, original casing.
    pub fn coordinate(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mvn:{}:{}:{}",
            self.group_id, self.artifact_id, self.version
        )
    }
}

/// Artifact names never passed to the runtime.
///
/// Deserialises from `{"excludedDependencies": [...]}`; names are compared
/// lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ExclusionDocument")]
pub struct ExclusionList {
    names: HashSet<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExclusionDocument {
    #[serde(default)]
    excluded_dependencies: Vec<String>,
}

impl From<ExclusionDocument> for ExclusionList {
    fn from(doc: ExclusionDocument) -> Self {
        Self::new(doc.excluded_dependencies)
    }
}

impl ExclusionList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, artifact_id: &str) -> bool {
        self.names.contains(&artifact_id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Why a dependency was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    PlatformGroup,
    Excluded,
}

/// Keeps dependencies the runtime has to fetch itself.
#[derive(Debug, Clone, Default)]
pub struct DependencyFilter {
    exclusions: ExclusionList,
}

impl DependencyFilter {
    pub fn new(exclusions: ExclusionList) -> Self {
        Self { exclusions }
    }

    /// `None` when `dep` is kept.
    pub fn rejection(&self, dep: &Dependency) -> Option<Rejection> {
        let group = dep.group_id.to_lowercase();
        if PLATFORM_GROUP_MARKERS.iter().any(|m| group.contains(m)) {
            return Some(Rejection::PlatformGroup);
        }
        if self.exclusions.contains(&dep.artifact_id) {
            return Some(Rejection::Excluded);
        }
        None
    }

    pub fn accepts(&self, dep: &Dependency) -> bool {
        self.rejection(dep).is_none()
    }

    /// Coordinates of accepted dependencies, deduplicated in first-seen order.
    pub fn resolve<'a, I>(&self, dependencies: I) -> IndexSet<String>
    where
        I: IntoIterator<Item = &'a Dependency>,
    {
        dependencies
            .into_iter()
            .filter(|dep| match self.rejection(dep) {
                None => true,
                Some(reason) => {
                    tracing::debug!(dependency = %dep, ?reason, "dependency skipped");
                    false
                }
            })
            .map(Dependency::coordinate)
            .collect()
    }
}
