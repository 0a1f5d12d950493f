//! Extracted element model

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// What kind of source construct an element is.
///
/// The set is closed: anything the extractor cannot classify is never
/// emitted, so downstream stages match exhaustively instead of carrying a
/// catch-all branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "function")]
    Function,
    #[serde(rename = "async function")]
    AsyncFunction,
    #[serde(rename = "method")]
    Method,
    #[serde(rename = "async method")]
    AsyncMethod,
    #[serde(rename = "class")]
    Class,
}

impl ElementKind {
    /// Capitalized label used in headings and tutorial titles.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Function => "Function",
            Self::AsyncFunction => "Async function",
            Self::Method => "Method",
            Self::AsyncMethod => "Async method",
            Self::Class => "Class",
        }
    }

    /// Lowercase label, identical to the serialized form. Used when the
    /// kind is quoted inside prompt text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::AsyncFunction => "async function",
            Self::Method => "method",
            Self::AsyncMethod => "async method",
            Self::Class => "class",
        }
    }

    /// True for method variants.
    #[must_use]
    pub fn is_method(self) -> bool {
        matches!(self, Self::Method | Self::AsyncMethod)
    }
}

/// One extracted code element, carried through every pipeline stage.
///
/// `explanation` and `docstring` start as `None` and are filled in by the
/// annotation stage; a `None` explanation after annotation marks the element
/// as skipped by later stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeElement {
    /// Path relative to the scanned root.
    pub file_path: Utf8PathBuf,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Verbatim source of the element.
    pub source_text: String,
    /// 1-based line range in the file.
    pub start_line: usize,
    pub end_line: usize,
    /// Set for methods; names the type the method belongs to.
    pub owning_class: Option<String>,
    pub explanation: Option<String>,
    pub docstring: Option<String>,
}

impl CodeElement {
    /// Top-level element (function or type). `kind` must not be a method
    /// variant.
    #[must_use]
    pub fn top_level(
        file_path: Utf8PathBuf,
        name: impl Into<String>,
        kind: ElementKind,
        source_text: impl Into<String>,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        debug_assert!(!kind.is_method());
        Self {
            file_path,
            name: name.into(),
            kind,
            source_text: source_text.into(),
            start_line,
            end_line,
            owning_class: None,
            explanation: None,
            docstring: None,
        }
    }

    /// Method belonging to `owning_class`. `kind` must be a method variant.
    #[must_use]
    pub fn method(
        file_path: Utf8PathBuf,
        name: impl Into<String>,
        kind: ElementKind,
        owning_class: impl Into<String>,
        source_text: impl Into<String>,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        debug_assert!(kind.is_method());
        Self {
            file_path,
            name: name.into(),
            kind,
            source_text: source_text.into(),
            start_line,
            end_line,
            owning_class: Some(owning_class.into()),
            explanation: None,
            docstring: None,
        }
    }

    /// True once the annotation stage produced an explanation.
    #[must_use]
    pub fn has_explanation(&self) -> bool {
        self.explanation
            .as_deref()
            .is_some_and(|e| !e.trim().is_empty())
    }

    /// `Class.method` for methods, plain name otherwise.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.owning_class {
            Some(class) => format!("{class}.{}", self.name),
            None => self.name.clone(),
        }
    }
}
