//! Fixed prompt template for learning-path generation.
//!
//! The template asks for five structural elements (self-study, instructor-led
//! courses, practice tasks, mentoring, teach-back) plus four secondary
//! artifacts (skill standards, knowledge checklist, four-dimensional
//! assessment plan, instructor-resourcing plan), all in Markdown.

/// System instruction fixing the model's persona and output language.
pub const SYSTEM_PROMPT: &str = "你是一位顶尖的职业规划与学习路径设计师，使用中文回复。";

/// Render the curriculum-design prompt for one profession.
///
/// Pure and deterministic: the profession is embedded verbatim exactly once
/// into the fixed template. No validation is performed here — callers reject
/// empty subjects before building a prompt.
pub fn build_prompt(profession: &str) -> String {
    format!(
        "\
你是一位经验丰富的职业发展规划专家和教育设计师。
请为职业 '{profession}' 设计一个完整、可执行的学习路径，结构清晰，包括以下内容：

1. **自学模块**（推荐书籍、在线课程、文档、视频等，按阶段排列）
2. **面授/线下课程**（如果适用，推荐知名机构、认证课程）
3. **练习任务**（每个阶段的实战项目、小练习、Kaggle/开源贡献等）
4. **辅导环节**（如何找到导师、加入社区、Code Review、Pair Programming等）
5. **教授他人活动**（写博客、做分享、带新人、创建教程等，用于巩固和输出）

同时生成：
- **技能标准**（初级/中级/高级分别需要掌握什么）
- **知识要素细目表**（核心知识点清单，可用表格形式）
- **评估规划**：从 知识掌握、技能应用、行为表现、业务结果 四个维度评估
- **师资规划**：专家、培训师、评估师、导师 的角色和获取方式

输出格式尽量使用 Markdown，结构清晰，便于阅读。
语言专业、鼓励性强，路径现实可行，时间估算合理（假设每周投入15-25小时）。"
    )
}
