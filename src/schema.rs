// Section identifiers and the fixed guidance/template registry

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::AppError;

// ============================================================================
// Base Section Types
// ============================================================================

/// Kind of paper section, shared by every numbered instance of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseSection {
    Title,
    Abstract,
    Introduction,
    RelatedWork,
    Method,
    Result,
    Discussion,
    Conclusion,
}

impl BaseSection {
    pub const ALL: [BaseSection; 8] = [
        BaseSection::Title,
        BaseSection::Abstract,
        BaseSection::Introduction,
        BaseSection::RelatedWork,
        BaseSection::Method,
        BaseSection::Result,
        BaseSection::Discussion,
        BaseSection::Conclusion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BaseSection::Title => "title",
            BaseSection::Abstract => "abstract",
            BaseSection::Introduction => "introduction",
            BaseSection::RelatedWork => "relatedWork",
            BaseSection::Method => "method",
            BaseSection::Result => "result",
            BaseSection::Discussion => "discussion",
            BaseSection::Conclusion => "conclusion",
        }
    }

    /// Heading used when all blocks of this kind share one section.
    pub fn grouped_heading(self) -> &'static str {
        match self {
            BaseSection::Method => "Methods",
            BaseSection::Result => "Results",
            BaseSection::Discussion => "Discussion",
            BaseSection::Title => "Title",
            BaseSection::Abstract => "Abstract",
            BaseSection::Introduction => "Introduction",
            BaseSection::RelatedWork => "Related Work",
            BaseSection::Conclusion => "Conclusion",
        }
    }

    /// Heading used inside a per-experiment section.
    pub fn subsection_heading(self) -> &'static str {
        match self {
            BaseSection::Method => "Method",
            other => other.grouped_heading(),
        }
    }
}

impl fmt::Display for BaseSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseSection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseSection::ALL
            .into_iter()
            .find(|base| base.as_str() == s)
            .ok_or_else(|| AppError::SectionError(s.to_string()))
    }
}

// ============================================================================
// Section Keys
// ============================================================================

/// One field of the paper form.
///
/// Each key is tagged with its [`BaseSection`] and, for the repeated
/// experiment blocks, the experiment it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Title,
    Abstract,
    Introduction,
    RelatedWork,
    Method1,
    Result1,
    Discussion1,
    Method2,
    Result2,
    Discussion2,
    Result3,
    Conclusion,
}

impl SectionKey {
    /// Every key, in form order.
    pub const ALL: [SectionKey; 12] = [
        SectionKey::Title,
        SectionKey::Abstract,
        SectionKey::Introduction,
        SectionKey::RelatedWork,
        SectionKey::Method1,
        SectionKey::Result1,
        SectionKey::Discussion1,
        SectionKey::Method2,
        SectionKey::Result2,
        SectionKey::Discussion2,
        SectionKey::Result3,
        SectionKey::Conclusion,
    ];

    pub fn base(self) -> BaseSection {
        match self {
            SectionKey::Title => BaseSection::Title,
            SectionKey::Abstract => BaseSection::Abstract,
            SectionKey::Introduction => BaseSection::Introduction,
            SectionKey::RelatedWork => BaseSection::RelatedWork,
            SectionKey::Method1 | SectionKey::Method2 => BaseSection::Method,
            SectionKey::Result1 | SectionKey::Result2 | SectionKey::Result3 => BaseSection::Result,
            SectionKey::Discussion1 | SectionKey::Discussion2 => BaseSection::Discussion,
            SectionKey::Conclusion => BaseSection::Conclusion,
        }
    }

    /// Experiment number for the method/result/discussion blocks.
    pub fn experiment(self) -> Option<u8> {
        match self {
            SectionKey::Method1 | SectionKey::Result1 | SectionKey::Discussion1 => Some(1),
            SectionKey::Method2 | SectionKey::Result2 | SectionKey::Discussion2 => Some(2),
            SectionKey::Result3 => Some(3),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Title => "title",
            SectionKey::Abstract => "abstract",
            SectionKey::Introduction => "introduction",
            SectionKey::RelatedWork => "relatedWork",
            SectionKey::Method1 => "method1",
            SectionKey::Result1 => "result1",
            SectionKey::Discussion1 => "discussion1",
            SectionKey::Method2 => "method2",
            SectionKey::Result2 => "result2",
            SectionKey::Discussion2 => "discussion2",
            SectionKey::Result3 => "result3",
            SectionKey::Conclusion => "conclusion",
        }
    }

    /// Human readable label, e.g. "Related Work" or "Method 1".
    pub fn label(self) -> String {
        let base = match self.base() {
            BaseSection::Method => "Method",
            BaseSection::Result => "Result",
            other => other.grouped_heading(),
        };
        match self.experiment() {
            Some(n) => format!("{} {}", base, n),
            None => base.to_string(),
        }
    }

    pub fn guidance(self) -> &'static SectionGuidance {
        guidance_for(self.base())
    }

    pub fn template(self) -> Option<&'static str> {
        template_for(self.base())
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| AppError::SectionError(s.to_string()))
    }
}

// ============================================================================
// Guidance Registry
// ============================================================================

/// Authoring advice for one kind of section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionGuidance {
    pub description: &'static str,
    /// Boilerplate offered to pre-fill the section. Absent for title and related work.
    pub template: Option<&'static str>,
}

static TITLE: SectionGuidance = SectionGuidance {
    description: "A concise and specific title, e.g., 'A Transformer-Based Approach to Melody Generation'",
    template: None,
};

static ABSTRACT: SectionGuidance = SectionGuidance {
    description: "Summarize background, objectives, methods, main findings, and conclusion in 150-250 words.",
    template: Some("This study investigates [research topic]. We propose [method or approach]. Experiments show that [main result]. These findings suggest [conclusion or implication]."),
};

static INTRODUCTION: SectionGuidance = SectionGuidance {
    description: "Introduce the topic, present the research question or gap, and summarize your contributions.",
    template: Some("Recent studies have shown that [context]. However, [gap or problem]. In this paper, we aim to [objective]. Our main contributions are: (1) ..., (2) ..., (3) ..."),
};

static RELATED_WORK: SectionGuidance = SectionGuidance {
    description: "Discuss relevant prior work and how your work differs or builds on them.",
    template: None,
};

static METHOD: SectionGuidance = SectionGuidance {
    description: "Explain what you did, how, and why. Include algorithms, models, or procedures used.",
    template: Some("We employed [methodology] using [tools/datasets]. The procedure involved the following steps: (1) ..., (2) ..., (3) ..."),
};

static RESULT: SectionGuidance = SectionGuidance {
    description: "Present key findings using text, tables, or figures. Focus on clarity and objectivity.",
    template: Some("Our model achieved [result] on [dataset]. Figure X shows [description]. This indicates that ..."),
};

static DISCUSSION: SectionGuidance = SectionGuidance {
    description: "Interpret the results, explain their significance, relate them to previous work, and discuss limitations.",
    template: Some("The results demonstrate [interpretation]. Compared to previous work, our method [advantage or difference]. One limitation is ..., which we plan to address in future work."),
};

static CONCLUSION: SectionGuidance = SectionGuidance {
    description: "Summarize key takeaways and suggest directions for future work.",
    template: Some("In summary, we presented [approach]. Our findings show that [result]. Future work includes ..."),
};

pub fn guidance_for(base: BaseSection) -> &'static SectionGuidance {
    match base {
        BaseSection::Title => &TITLE,
        BaseSection::Abstract => &ABSTRACT,
        BaseSection::Introduction => &INTRODUCTION,
        BaseSection::RelatedWork => &RELATED_WORK,
        BaseSection::Method => &METHOD,
        BaseSection::Result => &RESULT,
        BaseSection::Discussion => &DISCUSSION,
        BaseSection::Conclusion => &CONCLUSION,
    }
}

/// Looks up guidance by base type name. `None` for names outside the schema.
pub fn guidance_for_name(name: &str) -> Option<&'static SectionGuidance> {
    name.parse::<BaseSection>().ok().map(guidance_for)
}

pub fn template_for(base: BaseSection) -> Option<&'static str> {
    guidance_for(base).template
}

pub fn template_for_name(name: &str) -> Option<&'static str> {
    guidance_for_name(name).and_then(|g| g.template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_related_work_have_no_template() {
        assert_eq!(template_for_name("title"), None);
        assert_eq!(template_for_name("relatedWork"), None);
        assert_eq!(template_for(BaseSection::Title), None);
        assert_eq!(template_for(BaseSection::RelatedWork), None);
    }

    #[test]
    fn abstract_template_is_fixed_boilerplate() {
        assert_eq!(
            template_for_name("abstract"),
            Some("This study investigates [research topic]. We propose [method or approach]. Experiments show that [main result]. These findings suggest [conclusion or implication].")
        );
    }

    #[test]
    fn every_base_type_has_guidance() {
        for base in BaseSection::ALL {
            assert!(!guidance_for(base).description.is_empty(), "{} has no guidance", base);
        }
    }

    #[test]
    fn unknown_names_have_no_guidance() {
        assert!(guidance_for_name("appendix").is_none());
        assert!(guidance_for_name("method1").is_none());
        assert_eq!(template_for_name("bogus"), None);
    }

    #[test]
    fn numbered_keys_share_base_guidance() {
        assert_eq!(SectionKey::Method2.base(), BaseSection::Method);
        assert_eq!(SectionKey::Result3.base(), BaseSection::Result);
        assert_eq!(SectionKey::Discussion1.template(), template_for(BaseSection::Discussion));
        assert_eq!(SectionKey::Result3.experiment(), Some(3));
        assert_eq!(SectionKey::Conclusion.experiment(), None);
    }

    #[test]
    fn labels_and_identifiers() {
        assert_eq!(SectionKey::RelatedWork.label(), "Related Work");
        assert_eq!(SectionKey::Method1.label(), "Method 1");
        assert_eq!(SectionKey::Result3.label(), "Result 3");
        assert_eq!(SectionKey::Discussion2.label(), "Discussion 2");
        assert_eq!("relatedWork".parse::<SectionKey>().unwrap(), SectionKey::RelatedWork);
        assert!("relatedwork".parse::<SectionKey>().is_err());
        for key in SectionKey::ALL {
            assert_eq!(key.as_str().parse::<SectionKey>().unwrap(), key);
        }
    }

    #[test]
    fn serde_uses_camel_case_identifiers() {
        let key: SectionKey = serde_json::from_str("\"relatedWork\"").unwrap();
        assert_eq!(key, SectionKey::RelatedWork);
        let key: SectionKey = serde_json::from_str("\"discussion2\"").unwrap();
        assert_eq!(key, SectionKey::Discussion2);
    }
}
