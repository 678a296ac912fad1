//! Run instructions for a materialized project.
//!
//! Only the files directly under the root are inspected. Rules are tried in
//! order and the first one that recognizes the project wins.

use std::fs;
use std::path::Path;

use super::tree::compare_names;

/// Shown when no rule recognizes the project
pub const GENERIC_INSTRUCTION: &str = "Check the project files and run the appropriate command";

type RunRule = fn(&[String]) -> Option<Vec<String>>;

/// Run rules in priority order
const RUN_RULES: &[RunRule] = &[
    node_package,
    python_requirements,
    static_index,
    python_main,
    node_script,
    any_html,
];

/// Suggested commands for running the project at `root`.
///
/// The first command is always `cd <root>`.
pub fn run_instructions(root: &Path) -> Vec<String> {
    let files = top_level_files(root);
    let steps = RUN_RULES
        .iter()
        .find_map(|rule| rule(&files))
        .unwrap_or_else(|| vec![GENERIC_INSTRUCTION.to_string()]);

    let mut instructions = Vec::with_capacity(steps.len() + 1);
    instructions.push(format!("cd {}", root.display()));
    instructions.extend(steps);
    instructions
}

/// Regular files directly under `root`, sorted by name.
fn top_level_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = match fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect(),
        Err(e) => {
            log::debug!("Cannot list {} for run instructions: {}", root.display(), e);
            Vec::new()
        }
    };
    files.sort_by(|a, b| compare_names(a, b));
    files
}

fn has(files: &[String], name: &str) -> bool {
    files.iter().any(|f| f == name)
}

fn steps(commands: &[&str]) -> Vec<String> {
    commands.iter().map(|c| c.to_string()).collect()
}

fn node_package(files: &[String]) -> Option<Vec<String>> {
    has(files, "package.json").then(|| steps(&["npm install", "npm start"]))
}

fn python_requirements(files: &[String]) -> Option<Vec<String>> {
    has(files, "requirements.txt").then(|| steps(&["pip install -r requirements.txt", "python main.py"]))
}

fn static_index(files: &[String]) -> Option<Vec<String>> {
    has(files, "index.html").then(|| steps(&["open index.html"]))
}

fn python_main(files: &[String]) -> Option<Vec<String>> {
    has(files, "main.py").then(|| steps(&["python main.py"]))
}

fn node_script(files: &[String]) -> Option<Vec<String>> {
    ["main.js", "index.js"]
        .into_iter()
        .find(|name| has(files, name))
        .map(|name| vec![format!("node {}", name)])
}

fn any_html(files: &[String]) -> Option<Vec<String>> {
    files
        .iter()
        .find(|f| f.ends_with(".html"))
        .map(|name| vec![format!("open {}", name)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn project_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for name in files {
            fs::write(dir.path().join(name), "").unwrap();
        }
        dir
    }

    fn instructions_for(files: &[&str]) -> (String, Vec<String>) {
        let dir = project_with(files);
        let cd = format!("cd {}", dir.path().display());
        (cd, run_instructions(dir.path()))
    }

    #[test]
    fn test_package_json_wins() {
        let (cd, steps) = instructions_for(&["package.json", "requirements.txt", "index.html"]);
        assert_eq!(steps, vec![cd, "npm install".to_string(), "npm start".to_string()]);
    }

    #[test]
    fn test_requirements_txt() {
        let (cd, steps) = instructions_for(&["requirements.txt", "main.py"]);
        assert_eq!(
            steps,
            vec![
                cd,
                "pip install -r requirements.txt".to_string(),
                "python main.py".to_string()
            ]
        );
    }

    #[test]
    fn test_index_html_before_main_py() {
        let (cd, steps) = instructions_for(&["index.html", "main.py"]);
        assert_eq!(steps, vec![cd, "open index.html".to_string()]);
    }

    #[test]
    fn test_main_py() {
        let (cd, steps) = instructions_for(&["main.py", "file2.py"]);
        assert_eq!(steps, vec![cd, "python main.py".to_string()]);
    }

    #[test]
    fn test_main_js_preferred_over_index_js() {
        let (cd, steps) = instructions_for(&["index.js", "main.js"]);
        assert_eq!(steps, vec![cd, "node main.js".to_string()]);
    }

    #[test]
    fn test_index_js() {
        let (cd, steps) = instructions_for(&["index.js", "file2.css"]);
        assert_eq!(steps, vec![cd, "node index.js".to_string()]);
    }

    #[test]
    fn test_any_html_picks_first_by_name() {
        let (cd, steps) = instructions_for(&["page.html", "about.html", "style.css"]);
        assert_eq!(steps, vec![cd, "open about.html".to_string()]);
    }

    #[test]
    fn test_generic_fallback() {
        let (cd, steps) = instructions_for(&["main.rs"]);
        assert_eq!(steps, vec![cd, GENERIC_INSTRUCTION.to_string()]);
    }

    #[test]
    fn test_nested_files_are_ignored() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/package.json"), "{}").unwrap();
        fs::write(dir.path().join("src/main.py"), "").unwrap();

        let steps = run_instructions(dir.path());

        assert_eq!(steps[1], GENERIC_INSTRUCTION);
    }
}
