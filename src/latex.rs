// LaTeX document generation

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::form::PaperForm;
use crate::layout::{resolve_layout, Arrangement, StructureMode};
use crate::schema::SectionKey;
use crate::AppError;

// ============================================================================
// Constants
// ============================================================================

const PREAMBLE: &str = "\\documentclass{article}
\\usepackage[utf8]{inputenc}
\\usepackage{amsmath}
\\usepackage{graphicx}
\\usepackage[colorlinks=true, allcolors=blue]{hyperref}
";

/// Rendered in place of an empty title.
const TITLE_PLACEHOLDER: &str = "Paper Title";

/// Author used when none is given.
pub const DEFAULT_AUTHOR: &str = "Your Name";

/// File name offered for the exported document.
pub const DEFAULT_OUTPUT: &str = "paper.tex";

// ============================================================================
// Options
// ============================================================================

/// Value of the `\date{}` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentDate {
    /// `\today`, resolved when the document is compiled.
    #[default]
    Today,
    On(NaiveDate),
}

impl DocumentDate {
    /// Parses a YYYY-MM-DD date.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DocumentDate::On)
            .map_err(|_| AppError::DateError(s.to_string()))
    }
}

impl fmt::Display for DocumentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentDate::Today => f.write_str("\\today"),
            DocumentDate::On(date) => write!(f, "{}", date.format("%B %-d, %Y")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub author: String,
    pub date: DocumentDate,
    /// Escape LaTeX special characters in user text. Off by default, in
    /// which case text is inserted verbatim and may contain raw LaTeX.
    pub escape: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            date: DocumentDate::Today,
            escape: false,
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Renders the form as a complete LaTeX document with default options.
pub fn generate(form: &PaperForm, mode: StructureMode) -> String {
    generate_with(form, mode, &GeneratorOptions::default())
}

/// Renders the form as a complete LaTeX document.
///
/// The experiment blocks follow [`resolve_layout`] for `mode`: `paired`
/// produces one section per experiment with Method/Results/Discussion
/// subsections, while `grouped` and `mergeDiscussion` produce one section
/// per kind of block with the values joined by newlines. Output depends
/// only on the inputs.
pub fn generate_with(form: &PaperForm, mode: StructureMode, options: &GeneratorOptions) -> String {
    let text = |key: SectionKey| {
        let value = form.value(key);
        if options.escape {
            Cow::Owned(escape_latex(value))
        } else {
            Cow::Borrowed(value)
        }
    };

    let title = if form.value(SectionKey::Title).is_empty() {
        Cow::Borrowed(TITLE_PLACEHOLDER)
    } else {
        text(SectionKey::Title)
    };
    let author = if options.escape {
        Cow::Owned(escape_latex(&options.author))
    } else {
        Cow::Borrowed(options.author.as_str())
    };

    let layout = resolve_layout(mode);
    let blocks = match mode.arrangement() {
        Arrangement::ByKind => render_by_kind(layout, &text),
        Arrangement::ByExperiment => render_by_experiment(layout, &text),
    };

    debug!(mode = %mode, blocks = layout.len(), escape = options.escape, "generating document");

    format!(
        "{preamble}
\\title{{{title}}}
\\author{{{author}}}
\\date{{{date}}}

\\begin{{document}}

\\maketitle

\\begin{{abstract}}
{abstract_text}
\\end{{abstract}}

\\section{{Introduction}}
{introduction}

\\section{{Related Work}}
{related_work}


{blocks}

\\section{{Conclusion}}
{conclusion}

\\end{{document}}",
        preamble = PREAMBLE,
        title = title,
        author = author,
        date = options.date,
        abstract_text = text(SectionKey::Abstract),
        introduction = text(SectionKey::Introduction),
        related_work = text(SectionKey::RelatedWork),
        blocks = blocks,
        conclusion = text(SectionKey::Conclusion),
    )
}

/// `\section{Methods}` etc., one per run of same-kind blocks.
fn render_by_kind<'a>(layout: &[SectionKey], text: &impl Fn(SectionKey) -> Cow<'a, str>) -> String {
    group_runs(layout, SectionKey::base)
        .into_iter()
        .map(|(base, keys)| {
            let body: Vec<Cow<'a, str>> = keys.iter().map(|&key| text(key)).collect();
            format!("\\section{{{}}}\n{}", base.grouped_heading(), body.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `\section{First Experiment}` etc., with a subsection per block.
fn render_by_experiment<'a>(
    layout: &[SectionKey],
    text: &impl Fn(SectionKey) -> Cow<'a, str>,
) -> String {
    group_runs(layout, SectionKey::experiment)
        .into_iter()
        .map(|(experiment, keys)| {
            let subsections: Vec<String> = keys
                .iter()
                .map(|&key| {
                    format!(
                        "\\subsection{{{}}}\n{}",
                        key.base().subsection_heading(),
                        text(key)
                    )
                })
                .collect();
            format!(
                "\\section{{{} Experiment}}\n{}",
                ordinal(experiment.unwrap_or(0)),
                subsections.join("\n\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn ordinal(n: u8) -> &'static str {
    match n {
        1 => "First",
        2 => "Second",
        3 => "Third",
        _ => "Additional",
    }
}

/// Splits `keys` into maximal runs sharing the same `group` value.
fn group_runs<G: PartialEq>(
    keys: &[SectionKey],
    group: impl Fn(SectionKey) -> G,
) -> Vec<(G, Vec<SectionKey>)> {
    let mut runs: Vec<(G, Vec<SectionKey>)> = Vec::new();
    for &key in keys {
        let g = group(key);
        if let Some((current, members)) = runs.last_mut() {
            if *current == g {
                members.push(key);
                continue;
            }
        }
        runs.push((g, vec![key]));
    }
    runs
}

// ============================================================================
// Export
// ============================================================================

/// Writes `document` to `path`, or to stdout when `path` is `-`.
pub fn export(document: &str, path: &Path) -> Result<(), AppError> {
    if path == Path::new("-") {
        let mut out = io::stdout().lock();
        out.write_all(document.as_bytes())?;
        out.flush()?;
    } else {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(document.as_bytes())?;
        writer.flush()?;
    }
    debug!(path = %path.display(), bytes = document.len(), "document exported");
    Ok(())
}

// ============================================================================
// Escaping
// ============================================================================

/// Replaces LaTeX special characters with commands that print them literally.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> PaperForm {
        let mut form = PaperForm::new();
        for key in SectionKey::ALL {
            form.set_value(key, key.as_str());
        }
        form
    }

    #[test]
    fn empty_grouped_document_matches_skeleton() {
        let doc = generate(&PaperForm::new(), StructureMode::Grouped);
        let expected = concat!(
            "\\documentclass{article}\n",
            "\\usepackage[utf8]{inputenc}\n",
            "\\usepackage{amsmath}\n",
            "\\usepackage{graphicx}\n",
            "\\usepackage[colorlinks=true, allcolors=blue]{hyperref}\n",
            "\n",
            "\\title{Paper Title}\n",
            "\\author{Your Name}\n",
            "\\date{\\today}\n",
            "\n",
            "\\begin{document}\n",
            "\n",
            "\\maketitle\n",
            "\n",
            "\\begin{abstract}\n",
            "\n",
            "\\end{abstract}\n",
            "\n",
            "\\section{Introduction}\n",
            "\n",
            "\n",
            "\\section{Related Work}\n",
            "\n",
            "\n",
            "\n",
            "\\section{Methods}\n",
            "\n",
            "\n",
            "\n",
            "\\section{Results}\n",
            "\n",
            "\n",
            "\n",
            "\\section{Discussion}\n",
            "\n",
            "\n",
            "\n",
            "\\section{Conclusion}\n",
            "\n",
            "\n",
            "\\end{document}",
        );
        assert_eq!(doc, expected);
    }

    #[test]
    fn grouped_document_has_consolidated_sections() {
        let doc = generate(&PaperForm::new(), StructureMode::Grouped);
        assert!(doc.starts_with("\\documentclass{article}"));
        assert!(doc.ends_with("\\end{document}"));
        for heading in ["Methods", "Results", "Discussion", "Conclusion"] {
            assert!(doc.contains(&format!("\\section{{{}}}", heading)), "{}", heading);
        }
        assert!(!doc.contains("Experiment"));

        let doc = generate(&filled_form(), StructureMode::Grouped);
        assert!(doc.contains("\\section{Methods}\nmethod1\nmethod2\n\n\\section{Results}\nresult1\nresult2\n\n\\section{Discussion}\ndiscussion1\ndiscussion2\n\n\\section{Conclusion}"));
        assert!(!doc.contains("result3"));
    }

    #[test]
    fn paired_document_has_one_section_per_experiment() {
        let doc = generate(&filled_form(), StructureMode::Paired);
        let expected_tail = concat!(
            "\\section{Related Work}\n",
            "relatedWork\n",
            "\n",
            "\n",
            "\\section{First Experiment}\n",
            "\\subsection{Method}\n",
            "method1\n",
            "\n",
            "\\subsection{Results}\n",
            "result1\n",
            "\n",
            "\\subsection{Discussion}\n",
            "discussion1\n",
            "\n",
            "\\section{Second Experiment}\n",
            "\\subsection{Method}\n",
            "method2\n",
            "\n",
            "\\subsection{Results}\n",
            "result2\n",
            "\n",
            "\\subsection{Discussion}\n",
            "discussion2\n",
            "\n",
            "\\section{Conclusion}\n",
            "conclusion\n",
            "\n",
            "\\end{document}",
        );
        assert!(doc.ends_with(expected_tail), "{}", doc);
        assert!(doc.contains("\\title{title}\n"));
        assert!(doc.contains("\\begin{abstract}\nabstract\n\\end{abstract}"));
    }

    #[test]
    fn merge_discussion_renders_third_result() {
        let doc = generate(&filled_form(), StructureMode::MergeDiscussion);
        assert!(doc.contains("\\section{Methods}\nmethod1\nmethod2\n\n\\section{Results}\nresult1\nresult2\nresult3\n\n\\section{Discussion}\ndiscussion2\n\n\\section{Conclusion}"));
        assert!(!doc.contains("discussion1"));
    }

    #[test]
    fn generation_is_deterministic() {
        let form = filled_form();
        for mode in StructureMode::ALL {
            assert_eq!(generate(&form, mode), generate(&form, mode));
        }
    }

    #[test]
    fn text_is_unescaped_by_default() {
        let mut form = PaperForm::new();
        form.set_value(SectionKey::Title, "Foo & Bar");
        let doc = generate(&form, StructureMode::Paired);
        assert!(doc.contains("\\title{Foo & Bar}"));
    }

    #[test]
    fn escaping_is_opt_in() {
        let mut form = PaperForm::new();
        form.set_value(SectionKey::Title, "Foo & Bar");
        form.set_value(SectionKey::Abstract, "50% of x_1 {a} ~ b^2 \\ #1 $5");
        let options = GeneratorOptions {
            escape: true,
            ..GeneratorOptions::default()
        };
        let doc = generate_with(&form, StructureMode::Paired, &options);
        assert!(doc.contains("\\title{Foo \\& Bar}"));
        assert!(doc.contains(
            "50\\% of x\\_1 \\{a\\} \\textasciitilde{} b\\textasciicircum{}2 \\textbackslash{} \\#1 \\$5"
        ));
    }

    #[test]
    fn author_and_explicit_date() {
        let options = GeneratorOptions {
            author: "Ada Lovelace".to_string(),
            date: DocumentDate::parse("2025-03-04").unwrap(),
            escape: false,
        };
        let doc = generate_with(&PaperForm::new(), StructureMode::Paired, &options);
        assert!(doc.contains("\\author{Ada Lovelace}\n\\date{March 4, 2025}\n"));
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(matches!(DocumentDate::parse("04/03/2025"), Err(AppError::DateError(_))));
    }

    #[test]
    fn export_writes_document_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);
        let mut form = PaperForm::new();
        form.set_value(SectionKey::Conclusion, "Done.\n");
        let doc = generate(&form, StructureMode::Grouped);

        export(&doc, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), doc);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(DEFAULT_OUTPUT);
        let err = export("\\end{document}", &path).unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_latex("plain text, 100 words."), "plain text, 100 words.");
    }
}
