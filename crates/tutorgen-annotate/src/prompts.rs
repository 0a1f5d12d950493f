//! Prompt construction for the annotation and overview stages

use tutorgen_extract::CodeElement;

pub(crate) const EXPLANATION_SYSTEM: &str = "你是一位擅长代码分析和文档编写的专家AI助手。";

pub(crate) const DOCSTRING_SYSTEM: &str = "你是一位擅长生成高质量代码文档的专家AI助手。";

pub(crate) const OVERVIEW_SYSTEM: &str = "你是一个负责为README文件创建项目摘要的AI助手。";

/// Prompt asking for a plain-text explanation of one element.
pub(crate) fn explanation_prompt(element: &CodeElement) -> String {
    let mut prompt = format!(
        "解释以下名为'{}'的Rust {}",
        element.name,
        element.kind.label()
    );
    if let Some(class) = &element.owning_class {
        prompt.push_str(&format!("（属于'{class}'类）"));
    }
    prompt.push_str(&format!(
        "的功能。代码如下：\n\n```rust\n{}\n```\n\n",
        element.source_text
    ));
    prompt.push_str("请用清晰简洁的语言进行解释。重点说明其目的、输入、输出（如果有）以及主要行为。");
    prompt
}

/// Prompt asking for a documentation comment for one element.
pub(crate) fn docstring_prompt(element: &CodeElement) -> String {
    let mut prompt = format!(
        "为以下名为'{}'的Rust {}",
        element.name,
        element.kind.label()
    );
    if let Some(class) = &element.owning_class {
        prompt.push_str(&format!("（来自'{class}'类）"));
    }
    prompt.push_str(&format!(
        "生成简洁的Google风格文档字符串。代码如下：\n\n```rust\n{}\n```\n\n",
        element.source_text
    ));
    prompt.push_str("文档字符串应准确描述其用途、参数（如果有，包括可推断的类型）、");
    prompt.push_str("以及返回值（如果有，包括可推断的类型）。对于类，提供简要概述，");
    prompt.push_str("并在概述中提及关键属性或方法（如适用）。不要在文档字符串主体中包含函数/方法/类签名，只包含描述性文本。");
    prompt.push_str("确保文档字符串以简短的摘要行开头，后跟空行，然后根据需要添加更详细的说明。正确格式化以符合文档规范。");
    prompt
}

/// Prompt asking for a README-style overview built from element bullets.
pub(crate) fn overview_prompt(project_name: &str, bullets: &[String]) -> String {
    format!(
        "根据以下来自'{project_name}'的代码元素摘要，\
         生成适合项目README文件的简洁、高层概述（2-4段）。\
         概述应描述项目的主要目的和可从这些元素推断出的关键功能。\n\n\
         代码元素摘要:\n{}\n\n专注于描述项目可能的连贯叙述。",
        bullets.join("\n")
    )
}
