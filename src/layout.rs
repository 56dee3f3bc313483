// Structure modes and the ordering of experiment blocks they select

use std::fmt;
use std::str::FromStr;

use crate::schema::SectionKey;
use crate::AppError;

/// Arrangement of the repeated method/result/discussion blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructureMode {
    /// Method → Result → Discussion, once per experiment
    #[default]
    Paired,
    /// Methods → Results → Discussions
    Grouped,
    /// Results → Discussion (grouped), with a third result and one discussion
    MergeDiscussion,
}

/// How the generator turns a layout into document sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// One section per experiment, with a subsection per block.
    ByExperiment,
    /// One section per kind of block.
    ByKind,
}

const PAIRED: &[SectionKey] = &[
    SectionKey::Method1,
    SectionKey::Result1,
    SectionKey::Discussion1,
    SectionKey::Method2,
    SectionKey::Result2,
    SectionKey::Discussion2,
];

const GROUPED: &[SectionKey] = &[
    SectionKey::Method1,
    SectionKey::Method2,
    SectionKey::Result1,
    SectionKey::Result2,
    SectionKey::Discussion1,
    SectionKey::Discussion2,
];

const MERGE_DISCUSSION: &[SectionKey] = &[
    SectionKey::Method1,
    SectionKey::Method2,
    SectionKey::Result1,
    SectionKey::Result2,
    SectionKey::Result3,
    SectionKey::Discussion2,
];

impl StructureMode {
    pub const ALL: [StructureMode; 3] = [
        StructureMode::Paired,
        StructureMode::Grouped,
        StructureMode::MergeDiscussion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StructureMode::Paired => "paired",
            StructureMode::Grouped => "grouped",
            StructureMode::MergeDiscussion => "mergeDiscussion",
        }
    }

    pub fn arrangement(self) -> Arrangement {
        match self {
            StructureMode::Paired => Arrangement::ByExperiment,
            StructureMode::Grouped | StructureMode::MergeDiscussion => Arrangement::ByKind,
        }
    }
}

impl fmt::Display for StructureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paired" => Ok(StructureMode::Paired),
            "grouped" => Ok(StructureMode::Grouped),
            "mergeDiscussion" | "merge-discussion" => Ok(StructureMode::MergeDiscussion),
            other => Err(AppError::ModeError(other.to_string())),
        }
    }
}

/// Ordered experiment blocks rendered for `mode`.
pub fn resolve_layout(mode: StructureMode) -> &'static [SectionKey] {
    match mode {
        StructureMode::Paired => PAIRED,
        StructureMode::Grouped => GROUPED,
        StructureMode::MergeDiscussion => MERGE_DISCUSSION,
    }
}

/// Same as [`resolve_layout`] for a mode given by name; unrecognized names
/// resolve to an empty layout.
pub fn resolve_layout_name(name: &str) -> &'static [SectionKey] {
    name.parse::<StructureMode>()
        .map(resolve_layout)
        .unwrap_or(&[])
}
