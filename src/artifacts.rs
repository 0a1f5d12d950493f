//! Artifact rendering
//!
//! Everything a run writes besides the checkpoint lands here: the overview
//! markdown, per-element text files, and the assembled tutorial script. All
//! writes go through the atomic writer so partially written artifacts never
//! survive a crash.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;
use tutorgen_extract::CodeElement;
use tutorgen_script::ScriptPart;
use tutorgen_utils::atomic_write::write_file_atomic;
use tutorgen_utils::paths::sanitize_filename;

/// Filename of the overview artifact.
pub const OVERVIEW_FILENAME: &str = "README_overview.md";

/// Delimiter between parts in the script artifact.
const SCRIPT_DELIMITER: &str = "=====================================";

/// Write the project overview artifact.
///
/// The narrative is followed by a detailed reference section with one entry
/// per explained function or method leaf. Classes are summarized inside the
/// narrative itself and carry no reference entry.
pub fn write_overview_artifact(
    overview: &str,
    elements: &[CodeElement],
    output_dir: &Utf8Path,
) -> Result<Utf8PathBuf> {
    let path = output_dir.join(OVERVIEW_FILENAME);

    let mut content = String::new();
    content.push_str(overview.trim_end());
    content.push('\n');

    let leaves: Vec<&CodeElement> = elements
        .iter()
        .filter(|e| e.has_explanation() && e.kind != tutorgen_extract::ElementKind::Class)
        .collect();

    if !leaves.is_empty() {
        content.push_str("\n## 详细参考\n");
        for element in leaves {
            content.push_str(&format!(
                "\n### {}：`{}`\n\n- 类型: {}\n- 位置: {}:{}-{}\n\n{}\n",
                element.kind.display_name(),
                element.qualified_name(),
                element.kind.label(),
                element.file_path,
                element.start_line,
                element.end_line,
                element.explanation.as_deref().unwrap_or_default().trim(),
            ));
        }
    }

    write_file_atomic(&path, &content)?;
    info!(path = %path, "Overview artifact written");
    Ok(path)
}

/// Load the narrative back from a previously written overview artifact.
///
/// Returns `None` when the file is missing or empty. A leading markdown
/// heading line is skipped, and the detailed reference section is cut off.
#[must_use]
pub fn load_overview_narrative(output_dir: &Utf8Path) -> Option<String> {
    let path = output_dir.join(OVERVIEW_FILENAME);
    let content = std::fs::read_to_string(path).ok()?;

    let body = content
        .split("\n## 详细参考")
        .next()
        .unwrap_or(&content);

    let narrative = match body.split_once('\n') {
        Some((first, rest)) if first.starts_with('#') => rest.trim().to_string(),
        _ => body.trim().to_string(),
    };

    (!narrative.is_empty()).then_some(narrative)
}

/// Write one explanation and one docstring text file per annotated element
/// under `output_dir/individual_files/`.
pub fn write_individual_artifacts(
    elements: &[CodeElement],
    output_dir: &Utf8Path,
) -> Result<Utf8PathBuf> {
    let dir = output_dir.join("individual_files");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create artifact directory: {dir}"))?;
    let mut written = 0usize;

    for (index, element) in elements.iter().enumerate() {
        let base = artifact_basename(element, index);

        if let Some(explanation) = element.explanation.as_deref().filter(|e| !e.is_empty()) {
            let path = dir.join(format!("{base}_explanation.txt"));
            write_file_atomic(&path, &element_file_content(element, explanation, false))?;
            written += 1;
        }

        if let Some(docstring) = element.docstring.as_deref().filter(|d| !d.is_empty()) {
            let path = dir.join(format!("{base}_docstring.txt"));
            write_file_atomic(&path, &element_file_content(element, docstring, true))?;
            written += 1;
        }
    }

    info!(dir = %dir, files = written, "Individual artifacts written");
    Ok(dir)
}

/// Write the assembled tutorial script artifact.
pub fn write_script_artifact(
    parts: &[ScriptPart],
    project_name: &str,
    output_dir: &Utf8Path,
) -> Result<Utf8PathBuf> {
    let path = output_dir.join(format!(
        "{}_tutorial_script.txt",
        sanitize_filename(project_name)
    ));

    let mut content = String::new();
    for part in parts {
        content.push_str(&format!(
            "--- {} ({}) ---\n\n{}\n\n{SCRIPT_DELIMITER}\n\n",
            part.title,
            part.kind.label(),
            part.script
        ));
    }

    write_file_atomic(&path, &content)?;
    info!(path = %path, parts = parts.len(), "Script artifact written");
    Ok(path)
}

/// Filename base for one element: sanitized path stem, owning class, and
/// name joined with underscores. Falls back to the element index when every
/// fragment sanitizes to nothing.
fn artifact_basename(element: &CodeElement, index: usize) -> String {
    let path_part = sanitize_filename(element.file_path.with_extension("").as_str());
    let class_part = element
        .owning_class
        .as_deref()
        .map(sanitize_filename)
        .unwrap_or_default();
    let name_part = sanitize_filename(&element.name);

    let joined: Vec<String> = [path_part, class_part, name_part]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();

    if joined.is_empty() {
        format!("element_{index}")
    } else {
        joined.join("_")
    }
}

fn element_file_content(element: &CodeElement, body: &str, quote_body: bool) -> String {
    let mut content = format!(
        "File: {}\nType: {}\nName: {}\n",
        element.file_path,
        element.kind.label(),
        element.name
    );
    if let Some(class) = &element.owning_class {
        content.push_str(&format!("Class: {class}\n"));
    }
    content.push_str(&"-".repeat(30));
    content.push_str("\n\n");

    if quote_body {
        content.push_str(&format!("\"\"\"\n{body}\n\"\"\""));
    } else {
        content.push_str(body);
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorgen_extract::ElementKind;
    use tutorgen_script::PartKind;

    fn output_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    fn annotated_method() -> CodeElement {
        let mut element = CodeElement::method(
            Utf8PathBuf::from("src/engine.rs"),
            "run",
            ElementKind::Method,
            "Engine",
            "fn run(&self) {}",
            10,
            12,
        );
        element.explanation = Some("启动引擎。".to_string());
        element.docstring = Some("Runs the engine.".to_string());
        element
    }

    #[test]
    fn overview_artifact_appends_detailed_reference() {
        let (_dir, out) = output_dir();
        let elements = vec![annotated_method()];

        let path = write_overview_artifact("项目概述。", &elements, &out).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("项目概述。\n"));
        assert!(content.contains("## 详细参考"));
        assert!(content.contains("### Method：`Engine.run`"));
        assert!(content.contains("- 位置: src/engine.rs:10-12"));
        assert!(content.contains("启动引擎。"));
    }

    #[test]
    fn overview_reference_excludes_classes() {
        let (_dir, out) = output_dir();
        let mut class = CodeElement::top_level(
            Utf8PathBuf::from("src/engine.rs"),
            "Engine",
            ElementKind::Class,
            "struct Engine;",
            1,
            1,
        );
        class.explanation = Some("引擎类。".to_string());

        let path = write_overview_artifact("概述。", &[class], &out).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(!content.contains("详细参考"));
    }

    #[test]
    fn narrative_round_trips_without_the_reference_section() {
        let (_dir, out) = output_dir();
        write_overview_artifact("这是概述正文。", &[annotated_method()], &out).unwrap();

        let narrative = load_overview_narrative(&out).unwrap();
        assert_eq!(narrative, "这是概述正文。");
    }

    #[test]
    fn load_narrative_skips_a_leading_heading() {
        let (_dir, out) = output_dir();
        let path = out.join(OVERVIEW_FILENAME);
        std::fs::write(&path, "# demo 概览\n正文第一段。\n").unwrap();

        assert_eq!(load_overview_narrative(&out).unwrap(), "正文第一段。");
    }

    #[test]
    fn missing_overview_yields_none() {
        let (_dir, out) = output_dir();
        assert!(load_overview_narrative(&out).is_none());
    }

    #[test]
    fn individual_artifacts_use_sanitized_names_and_headers() {
        let (_dir, out) = output_dir();
        let dir = write_individual_artifacts(&[annotated_method()], &out).unwrap();

        let explanation =
            std::fs::read_to_string(dir.join("src_engine_Engine_run_explanation.txt")).unwrap();
        assert!(explanation.starts_with(
            "File: src/engine.rs\nType: method\nName: run\nClass: Engine\n"
        ));
        assert!(explanation.contains(&"-".repeat(30)));
        assert!(explanation.ends_with("启动引擎。"));

        let docstring =
            std::fs::read_to_string(dir.join("src_engine_Engine_run_docstring.txt")).unwrap();
        assert!(docstring.ends_with("\"\"\"\nRuns the engine.\n\"\"\""));
    }

    #[test]
    fn elements_without_content_produce_no_files() {
        let (_dir, out) = output_dir();
        let bare = CodeElement::top_level(
            Utf8PathBuf::from("src/lib.rs"),
            "quiet",
            ElementKind::Function,
            "fn quiet() {}",
            1,
            1,
        );

        let dir = write_individual_artifacts(&[bare], &out).unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir).unwrap().collect();
        assert!(entries.is_empty());
    }

    #[test]
    fn script_artifact_formats_parts_with_delimiters() {
        let (_dir, out) = output_dir();
        let parts = vec![
            ScriptPart {
                title: "欢迎学习 demo 教程".to_string(),
                kind: PartKind::Introduction,
                script: "开场白。".to_string(),
            },
            ScriptPart {
                title: "总结与展望".to_string(),
                kind: PartKind::Conclusion,
                script: "结束语。".to_string(),
            },
        ];

        let path = write_script_artifact(&parts, "demo", &out).unwrap();
        assert!(path.as_str().ends_with("demo_tutorial_script.txt"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "--- 欢迎学习 demo 教程 (introduction) ---\n\n开场白。\n\n\
             =====================================\n\n\
             --- 总结与展望 (conclusion) ---\n\n结束语。\n\n\
             =====================================\n\n"
        );
    }
}
