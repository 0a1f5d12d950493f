//! Source tree walking and element extraction
//!
//! Walks a directory in deterministic order, parses every Rust file, and
//! emits a flat list of elements. A file that fails to parse is logged and
//! skipped; the scan itself only fails when the root is unusable.

use crate::types::{CodeElement, ElementKind};
use camino::{Utf8Path, Utf8PathBuf};
use syn::spanned::Spanned;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directories never descended into.
const SKIP_DIRS: &[&str] = &["target", ".git", "node_modules", "vendor", "venv", ".venv"];

/// Scan-level failures.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan root is not a directory: {0}")]
    NotADirectory(Utf8PathBuf),

    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Extract all elements under `root`.
///
/// Files are visited in sorted order so output is stable across runs.
/// Element paths are reported relative to `root`.
///
/// # Errors
///
/// Returns `ScanError` if `root` is not a directory or the walk itself
/// fails. Unparseable files are skipped with a warning, not an error.
pub fn scan(root: &Utf8Path) -> Result<Vec<CodeElement>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_owned()));
    }

    let mut elements = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.file_type().is_dir() && SKIP_DIRS.contains(&name.as_ref()))
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(path) = Utf8Path::from_path(entry.path()) else {
            warn!(path = %entry.path().display(), "Skipping non-UTF-8 path");
            continue;
        };
        if path.extension() != Some("rs") {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path).to_owned();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %relative, error = %e, "Skipping unreadable file");
                continue;
            }
        };

        match syn::parse_file(&content) {
            Ok(ast) => {
                let before = elements.len();
                extract_items(&relative, &content, &ast.items, &mut elements);
                debug!(file = %relative, count = elements.len() - before, "Extracted elements");
            }
            Err(e) => {
                warn!(file = %relative, error = %e, "Skipping file with syntax errors");
            }
        }
    }

    Ok(elements)
}

fn extract_items(
    file: &Utf8Path,
    content: &str,
    items: &[syn::Item],
    out: &mut Vec<CodeElement>,
) {
    for item in items {
        match item {
            syn::Item::Fn(item_fn) => {
                let kind = if item_fn.sig.asyncness.is_some() {
                    ElementKind::AsyncFunction
                } else {
                    ElementKind::Function
                };
                let (start, end) = line_range(item_fn);
                out.push(CodeElement::top_level(
                    file.to_owned(),
                    item_fn.sig.ident.to_string(),
                    kind,
                    slice_lines(content, start, end),
                    start,
                    end,
                ));
            }
            syn::Item::Struct(item_struct) => {
                let (start, end) = line_range(item_struct);
                out.push(CodeElement::top_level(
                    file.to_owned(),
                    item_struct.ident.to_string(),
                    ElementKind::Class,
                    slice_lines(content, start, end),
                    start,
                    end,
                ));
            }
            syn::Item::Enum(item_enum) => {
                let (start, end) = line_range(item_enum);
                out.push(CodeElement::top_level(
                    file.to_owned(),
                    item_enum.ident.to_string(),
                    ElementKind::Class,
                    slice_lines(content, start, end),
                    start,
                    end,
                ));
            }
            syn::Item::Impl(item_impl) => {
                extract_impl(file, content, item_impl, out);
            }
            syn::Item::Mod(item_mod) => {
                if let Some((_, nested)) = &item_mod.content {
                    extract_items(file, content, nested, out);
                }
            }
            _ => {}
        }
    }
}

fn extract_impl(
    file: &Utf8Path,
    content: &str,
    item_impl: &syn::ItemImpl,
    out: &mut Vec<CodeElement>,
) {
    let Some(owner) = self_type_name(&item_impl.self_ty) else {
        return;
    };

    for impl_item in &item_impl.items {
        if let syn::ImplItem::Fn(method) = impl_item {
            let kind = if method.sig.asyncness.is_some() {
                ElementKind::AsyncMethod
            } else {
                ElementKind::Method
            };
            let (start, end) = line_range(method);
            out.push(CodeElement::method(
                file.to_owned(),
                method.sig.ident.to_string(),
                kind,
                owner.clone(),
                slice_lines(content, start, end),
                start,
                end,
            ));
        }
    }
}

/// Name of the implemented type, when it is a plain path.
fn self_type_name(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

/// 1-based line range of a syntax node.
fn line_range<T: Spanned>(node: &T) -> (usize, usize) {
    let span = node.span();
    (span.start().line, span.end().line)
}

fn slice_lines(content: &str, start: usize, end: usize) -> String {
    content
        .lines()
        .skip(start.saturating_sub(1))
        .take(end.saturating_sub(start) + 1)
        .collect::<Vec<_>>()
        .join("\n")
}
