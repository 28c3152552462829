//! File classification.
//!
//! Each scanned path is matched against an ordered rule table for the root it
//! was found under. The first matching rule decides the argument kind; paths
//! matching no rule are ignored.
//!
//! Root detection is a substring test on the full path (module directory
//! first, then its parent), not a strict prefix test. Directory names that
//! textually contain one of the roots are therefore misclassified; this is
//! the established behaviour of the tool and is kept as-is.

use std::fmt;
use std::path::Path;

use super::ModuleLayout;

/// Which root produced an argument. Decides the relative-path lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Under the primary module; rendered as `./…`.
    Module,
    /// Under the module's parent (the generics sibling); rendered as `../…`.
    Generics,
}

impl Origin {
    fn lead(self) -> &'static str {
        match self {
            Self::Module => "./",
            Self::Generics => "../",
        }
    }
}

/// What a classified file contributes to the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    OpenApi,
    Resource,
    Connector,
}

/// One command-line contribution, with its path already made relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedArgument {
    pub kind: ArgumentKind,
    pub origin: Origin,
    pub path: String,
}

impl ClassifiedArgument {
    pub fn is_connector(&self) -> bool {
        self.kind == ArgumentKind::Connector
    }
}

impl fmt::Display for ClassifiedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ArgumentKind::OpenApi => write!(f, "--open-api file:{}", self.path),
            ArgumentKind::Resource => write!(f, "--resource=file:{}", self.path),
            ArgumentKind::Connector => f.write_str(&self.path),
        }
    }
}

/// A single `predicate → kind` entry.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub name: &'static str,
    pub kind: ArgumentKind,
    pub matches: fn(&str) -> bool,
}

impl fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

const API_DOC_SEGMENT: &str = "/api/doc/";
const GENERICS_SEGMENT: &str = "/generics/";

/// Rules for files under the primary module.
///
/// `.json` resources are accepted even when the path contains `/generics/`.
pub const MODULE_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "open-api-document",
        kind: ArgumentKind::OpenApi,
        matches: |p| p.ends_with(".yaml") && p.contains(API_DOC_SEGMENT) && !p.contains(GENERICS_SEGMENT),
    },
    ClassificationRule {
        name: "json-resource",
        kind: ArgumentKind::Resource,
        matches: |p| p.ends_with(".json"),
    },
    ClassificationRule {
        name: "connector-source",
        kind: ArgumentKind::Connector,
        matches: |p| p.ends_with("Connector.java") && !p.contains(GENERICS_SEGMENT),
    },
];

/// Rules for files under the generics sibling.
pub const GENERICS_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "generics-json-resource",
        kind: ArgumentKind::Resource,
        matches: |p| p.ends_with(".json") && p.contains(GENERICS_SEGMENT),
    },
    ClassificationRule {
        name: "generics-java-source",
        kind: ArgumentKind::Connector,
        matches: |p| p.ends_with(".java") && p.contains(GENERICS_SEGMENT),
    },
];

/// First-match evaluation of a rule table.
pub fn first_match(rules: &[ClassificationRule], path: &str) -> Option<ArgumentKind> {
    rules.iter().find(|r| (r.matches)(path)).map(|r| r.kind)
}

/// Classification result of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Open-api and resource arguments, in scan order.
    pub arguments: Vec<ClassifiedArgument>,
    /// Connector arguments, buffered to be emitted last.
    pub connectors: Vec<ClassifiedArgument>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.arguments.len() + self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classifies absolute paths relative to a [`ModuleLayout`].
#[derive(Debug, Clone)]
pub struct Classifier {
    module_root: String,
    parent_root: String,
}

impl Classifier {
    pub fn new(layout: &ModuleLayout) -> Self {
        Self {
            module_root: layout.module_dir().to_string_lossy().into_owned(),
            parent_root: layout.parent_dir().to_string_lossy().into_owned(),
        }
    }

    /// Decide which root `path` belongs to.
    pub fn origin_of(&self, path: &str) -> Option<Origin> {
        if path.contains(&self.module_root) {
            Some(Origin::Module)
        } else if path.contains(&self.parent_root) {
            Some(Origin::Generics)
        } else {
            None
        }
    }

    /// Classify a single path.
    pub fn classify(&self, path: &str) -> Option<ClassifiedArgument> {
        let origin = self.origin_of(path)?;
        let (rules, root) = match origin {
            Origin::Module => (MODULE_RULES, &self.module_root),
            Origin::Generics => (GENERICS_RULES, &self.parent_root),
        };
        let kind = first_match(rules, path)?;

        // Strip by length, not by match position, like a prefix strip would.
        let tail = path.get(root.len() + 1..).unwrap_or_default();

        Some(ClassifiedArgument {
            kind,
            origin,
            path: format!("{}{}", origin.lead(), tail),
        })
    }

    /// Classify every path, keeping scan order and buffering connectors.
    pub fn classify_all<I, P>(&self, paths: I) -> Classification
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut classification = Classification::default();

        for path in paths {
            let path = path.as_ref().to_string_lossy();
            match self.classify(&path) {
                Some(arg) if arg.is_connector() => classification.connectors.push(arg),
                Some(arg) => classification.arguments.push(arg),
                None => tracing::trace!(path = %path, "ignored"),
            }
        }

        classification
    }
}
