//! Tutorial outline construction
//!
//! Turns annotated elements into a fixed-shape outline: introduction, setup,
//! an optional core-features group with one leaf per explained element, and
//! a conclusion. The section set is a closed sum type, so the script stage
//! matches exhaustively and an outline can never contain a section nobody
//! knows how to narrate.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tutorgen_extract::{CodeElement, ElementKind};

/// One outline section.
///
/// Serialized with a `section_type` tag so the on-disk form names each
/// section kind explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "section_type", rename_all = "snake_case")]
pub enum Section {
    Introduction {
        title: String,
        /// Overview narrative from the annotation stage, when one exists.
        narrative: Option<String>,
    },
    Setup {
        title: String,
    },
    CoreFeaturesParent {
        title: String,
        details: Vec<CoreFeatureDetail>,
    },
    Conclusion {
        title: String,
    },
}

impl Section {
    /// Section heading.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Introduction { title, .. }
            | Self::Setup { title }
            | Self::CoreFeaturesParent { title, .. }
            | Self::Conclusion { title } => title,
        }
    }
}

/// One core-feature leaf: everything the script stage needs to narrate a
/// single element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreFeatureDetail {
    pub title: String,
    pub element_name: String,
    pub element_kind: ElementKind,
    pub owning_class: Option<String>,
    pub code_snippet: String,
    pub explanation: String,
    pub file_path: Utf8PathBuf,
}

/// The full tutorial outline for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorialOutline {
    pub project_name: String,
    pub sections: Vec<Section>,
}

impl TutorialOutline {
    /// Number of script parts this outline will produce: every section is
    /// one part, except the core-features group which contributes one part
    /// per detail.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| match section {
                Section::CoreFeaturesParent { details, .. } => details.len(),
                _ => 1,
            })
            .sum()
    }
}

/// Build the outline for `project_name` from annotated elements.
///
/// The introduction, setup, and conclusion sections are always present,
/// even when no element was explained; the tutorial skeleton should not
/// silently vanish just because annotation produced nothing. The
/// core-features group appears only when at least one element has an
/// explanation.
#[must_use]
pub fn build(
    elements: &[CodeElement],
    project_name: &str,
    overview: Option<&str>,
) -> TutorialOutline {
    let mut sections = vec![
        Section::Introduction {
            title: format!("欢迎学习 {project_name} 教程"),
            narrative: overview
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from),
        },
        Section::Setup {
            title: "环境设置与安装".to_string(),
        },
    ];

    let details = feature_details(elements);
    debug!(features = details.len(), "Collected core feature leaves");
    if !details.is_empty() {
        sections.push(Section::CoreFeaturesParent {
            title: "核心功能详解".to_string(),
            details,
        });
    }

    sections.push(Section::Conclusion {
        title: "总结与展望".to_string(),
    });

    let outline = TutorialOutline {
        project_name: project_name.to_string(),
        sections,
    };
    info!(
        sections = outline.sections.len(),
        parts = outline.leaf_count(),
        "Tutorial outline built"
    );
    outline
}

/// One leaf per explained element, in (file, owning class, start line)
/// order so the tutorial walks each file top to bottom.
fn feature_details(elements: &[CodeElement]) -> Vec<CoreFeatureDetail> {
    let mut explained: Vec<&CodeElement> =
        elements.iter().filter(|e| e.has_explanation()).collect();

    explained.sort_by(|a, b| {
        let key_a = (
            a.file_path.as_str(),
            a.owning_class.as_deref().unwrap_or(""),
            a.start_line,
        );
        let key_b = (
            b.file_path.as_str(),
            b.owning_class.as_deref().unwrap_or(""),
            b.start_line,
        );
        key_a.cmp(&key_b)
    });

    explained
        .into_iter()
        .map(|element| CoreFeatureDetail {
            title: feature_title(element),
            element_name: element.name.clone(),
            element_kind: element.kind,
            owning_class: element.owning_class.clone(),
            code_snippet: element.source_text.clone(),
            explanation: element
                .explanation
                .clone()
                .unwrap_or_default(),
            file_path: element.file_path.clone(),
        })
        .collect()
}

/// Heading for one core-feature leaf.
fn feature_title(element: &CodeElement) -> String {
    match &element.owning_class {
        Some(class) => format!(
            "{}：`{class}.{}`",
            element.kind.display_name(),
            element.name
        ),
        None => format!("{}：`{}`", element.kind.display_name(), element.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explained(
        file: &str,
        name: &str,
        kind: ElementKind,
        owning_class: Option<&str>,
        start_line: usize,
    ) -> CodeElement {
        let mut element = match owning_class {
            Some(class) => CodeElement::method(
                Utf8PathBuf::from(file),
                name,
                kind,
                class,
                "fn x() {}",
                start_line,
                start_line,
            ),
            None => CodeElement::top_level(
                Utf8PathBuf::from(file),
                name,
                kind,
                "fn x() {}",
                start_line,
                start_line,
            ),
        };
        element.explanation = Some(format!("{name} 的解释。"));
        element
    }

    #[test]
    fn empty_input_still_yields_the_fixed_sections() {
        let outline = build(&[], "demo", None);

        assert_eq!(outline.sections.len(), 3);
        assert!(matches!(outline.sections[0], Section::Introduction { .. }));
        assert!(matches!(outline.sections[1], Section::Setup { .. }));
        assert!(matches!(outline.sections[2], Section::Conclusion { .. }));
        assert_eq!(outline.leaf_count(), 3);
    }

    #[test]
    fn titles_follow_the_fixed_wording() {
        let outline = build(&[], "demo", None);

        assert_eq!(outline.sections[0].title(), "欢迎学习 demo 教程");
        assert_eq!(outline.sections[1].title(), "环境设置与安装");
        assert_eq!(outline.sections[2].title(), "总结与展望");
    }

    #[test]
    fn explained_elements_become_sorted_feature_leaves() {
        let elements = vec![
            explained("src/b.rs", "later", ElementKind::Function, None, 5),
            explained("src/a.rs", "method_two", ElementKind::Method, Some("Engine"), 20),
            explained("src/a.rs", "free_fn", ElementKind::Function, None, 30),
            explained("src/a.rs", "method_one", ElementKind::Method, Some("Engine"), 10),
        ];

        let outline = build(&elements, "demo", None);
        let Section::CoreFeaturesParent { details, title } = &outline.sections[2] else {
            panic!("expected core features group");
        };

        assert_eq!(title, "核心功能详解");
        let titles: Vec<_> = details.iter().map(|d| d.title.as_str()).collect();
        // Top-level elements (empty class key) sort before methods per file.
        assert_eq!(
            titles,
            vec![
                "Function：`free_fn`",
                "Method：`Engine.method_one`",
                "Method：`Engine.method_two`",
                "Function：`later`",
            ]
        );
        assert_eq!(outline.leaf_count(), 7);
    }

    #[test]
    fn unexplained_elements_are_left_out_of_the_feature_group() {
        let mut unexplained =
            explained("src/a.rs", "quiet", ElementKind::Function, None, 1);
        unexplained.explanation = None;

        let outline = build(&[unexplained], "demo", None);
        assert_eq!(outline.sections.len(), 3);
    }

    #[test]
    fn introduction_carries_the_overview_narrative() {
        let outline = build(&[], "demo", Some("这是项目概述。"));
        let Section::Introduction { narrative, .. } = &outline.sections[0] else {
            panic!("expected introduction");
        };
        assert_eq!(narrative.as_deref(), Some("这是项目概述。"));

        let blank = build(&[], "demo", Some("   "));
        let Section::Introduction { narrative, .. } = &blank.sections[0] else {
            panic!("expected introduction");
        };
        assert!(narrative.is_none());
    }

    #[test]
    fn sections_serialize_with_a_section_type_tag() {
        let outline = build(
            &[explained("src/a.rs", "f", ElementKind::AsyncFunction, None, 1)],
            "demo",
            None,
        );

        let json = serde_json::to_value(&outline.sections).unwrap();
        assert_eq!(json[0]["section_type"], "introduction");
        assert_eq!(json[1]["section_type"], "setup");
        assert_eq!(json[2]["section_type"], "core_features_parent");
        assert_eq!(
            json[2]["details"][0]["title"],
            "Async function：`f`"
        );
        assert_eq!(json[3]["section_type"], "conclusion");
    }
}
