//! Built-in prompt templates
//!
//! Each template is rendered with Handlebars. The `generate` and `modify`
//! templates ask for fenced blocks annotated as ```` ```lang:path ```` so the
//! output can be materialized without guessing names.

/// Template names in the order the pipeline uses them
pub const TEMPLATE_NAMES: &[&str] = &[DECOMPOSE, GENERATE, REVIEW, MODIFY];

pub const DECOMPOSE: &str = "decompose";
pub const GENERATE: &str = "generate";
pub const REVIEW: &str = "review";
pub const MODIFY: &str = "modify";

/// System prompt shared by every pipeline step
pub const SYSTEM_PROMPT: &str = "You are a senior software engineer. You write complete, working code \
and explain only when asked.";

pub const DECOMPOSE_TEMPLATE: &str = r#"Break the following task into a short, ordered list of implementation steps.
Name the files the project will need and what each one contains.

Task:
{{task}}
"#;

pub const GENERATE_TEMPLATE: &str = r#"Write the complete code for the following task.

Task:
{{task}}
{{#if plan}}

Plan:
{{plan}}
{{/if}}

Rules:
- Put every file in its own fenced code block.
- Annotate each fence with the language and relative path, for example ```js:src/app.js
- Include any manifest the project needs to run (package.json, requirements.txt, ...).
- Do not leave placeholders or TODOs.
"#;

pub const REVIEW_TEMPLATE: &str = r#"Review the code below, written for this task:
{{task}}

List concrete bugs, missing files, and required fixes. Be brief.

Code:
{{code}}
"#;

pub const MODIFY_TEMPLATE: &str = r#"Apply the requested changes to the code below and return the complete,
updated project. Keep the same fenced ```lang:path block format and include
every file, changed or not.

Requested changes:
{{request}}

Code:
{{code}}
"#;

/// Built-in template source for `name`
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        DECOMPOSE => Some(DECOMPOSE_TEMPLATE),
        GENERATE => Some(GENERATE_TEMPLATE),
        REVIEW => Some(REVIEW_TEMPLATE),
        MODIFY => Some(MODIFY_TEMPLATE),
        _ => None,
    }
}
