//! Prompt templates for narration script generation
//!
//! Each section kind has its own template, including the visual cues the
//! narrator script should carry. Placeholders stand in for content the
//! earlier stages could not supply.

use tutorgen_outline::CoreFeatureDetail;

/// System message for every script call.
pub(crate) fn system_message(target_audience: &str) -> String {
    format!(
        "你是一位经验丰富的技术教程编剧和内容创作者。\
         你的任务是为编程教程视频撰写清晰、引人入胜且易于理解的旁白脚本。\
         脚本应面向 {target_audience}。"
    )
}

pub(crate) fn introduction_prompt(project_name: &str, narrative: Option<&str>) -> String {
    let overview = narrative
        .map(String::from)
        .unwrap_or_else(|| format!("请基于 {project_name} 项目的目的和主要功能生成引言。"));

    format!(
        "为名为 '{project_name}' 的项目生成一段引人入胜的视频教程开场白。\n\
         项目概览：{overview}\n\
         脚本应包含：\n\
         1. 欢迎语。\n\
         2. 简要介绍项目是什么，解决了什么问题。\n\
         3. 预告通过本教程学习者能掌握什么。\n\
         4. 鼓励观众继续观看。\n\
         请加入视觉提示，例如：[显示项目Logo]、[展示项目运行效果的快速剪辑]、[显示教程标题卡]。"
    )
}

pub(crate) fn setup_prompt(project_name: &str) -> String {
    format!(
        "为 '{project_name}' 项目的视频教程生成“环境设置与安装”部分的脚本。\n\
         基本要求：请提供关于如何安装和配置 {project_name} 项目的说明。\n\
         脚本应包含：\n\
         1. 需要安装哪些主要工具或库（例如，Rust 工具链版本、cargo install ...）。\n\
         2. 如何进行基本的项目配置（例如，API密钥、环境变量等，如果适用）。\n\
         3. 一个简单的使用示例（如果适用）。\n\
         请加入视觉提示，例如：[显示命令行界面]、[高亮显示需要输入的命令]、[展示代码编辑器中的示例代码]。"
    )
}

pub(crate) fn core_feature_prompt(project_name: &str, detail: &CoreFeatureDetail) -> String {
    let feature_name = match &detail.owning_class {
        Some(class) => format!("`{class}.{}`", detail.element_name),
        None => format!("`{}`", detail.element_name),
    };

    format!(
        "为名为 '{project_name}' 的项目的视频教程中关于核心功能 '{feature_name}' \
         ({kind}) 的部分生成详细讲解脚本。\n\
         这是该功能的代码：\n```rust\n{code}\n```\n\
         这是对该功能的文字解释（供你参考，请用更口语化和教学性的方式表达）：\n\"{explanation}\"\n\n\
         脚本应包含：\n\
         1. 清晰说明这个功能是做什么的，它的主要目的是什么。\n\
         2. （如果适用）对其重要参数进行解释。\n\
         3. （如果适用）解释它返回什么。\n\
         4. 如何在实际中使用它（可以虚构一个简单场景）。\n\
         5. 逐步引导观众理解代码逻辑，但避免逐行朗读代码，而是解释关键部分和整体流程。\n\
         请加入视觉提示，例如：[在屏幕上显示代码片段：{feature_name}]、[高亮代码的关键行]、\
         [显示一个简单的调用示例]、[图示说明数据流或逻辑]。",
        kind = detail.element_kind.label(),
        code = detail.code_snippet,
        explanation = detail.explanation,
    )
}

pub(crate) fn conclusion_prompt(project_name: &str) -> String {
    format!(
        "为名为 '{project_name}' 的项目的视频教程生成“总结与展望”部分的脚本。\n\
         基本要求：请对 {project_name} 教程内容进行总结，并提供学习建议或下一步指引。\n\
         脚本应包含：\n\
         1. 简要回顾本教程涵盖的主要内容和学习重点。\n\
         2. 强调学习者通过本教程掌握的关键技能。\n\
         3. 鼓励学习者动手实践，并提供一些练习建议（如果可能）。\n\
         4. （可选）指出可以进一步学习的相关资源或项目的高级特性。\n\
         5. 感谢观看并引导观众进行互动（点赞、评论、订阅等）。\n\
         请加入视觉提示，例如：[显示教程重点回顾列表]、[显示项目GitHub链接或文档链接]、\
         [显示结束卡片和社交媒体图标]。"
    )
}
