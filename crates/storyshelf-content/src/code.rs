//! Code snippets attached to a story.
//!
//! A story lists snippet files in its `codeFiles` frontmatter; they live in
//! the content directory next to the story. Snippets that cannot be read,
//! or whose path escapes the content directory, are skipped with a warning.

use std::path::Path;

use futures::future::join_all;
use serde::Serialize;
use storyshelf_core::util::files::read_file;
use storyshelf_core::util::paths::resolve_within;

/// A loaded code snippet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CodeFile {
    /// Filename as written in the frontmatter.
    pub filename: String,
    /// File contents.
    pub code: String,
    /// Syntax highlighting language identifier.
    pub language: String,
}

/// Load the listed snippet files from `base_dir`, preserving list order.
pub async fn load_code_files(code_files: &[String], base_dir: &Path) -> Vec<CodeFile> {
    let loads = code_files.iter().map(|filename| load_one(filename, base_dir));
    join_all(loads).await.into_iter().flatten().collect()
}

async fn load_one(filename: &str, base_dir: &Path) -> Option<CodeFile> {
    let Some(path) = resolve_within(base_dir, filename) else {
        log::warn!("Path traversal blocked: {filename}");
        return None;
    };

    match read_file(&path).await {
        Ok(code) => {
            let ext = Path::new(filename)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("");
            Some(CodeFile {
                filename: filename.to_string(),
                code,
                language: language_for_extension(ext),
            })
        }
        Err(e) => {
            log::warn!("Failed to load code file {filename}: {e}");
            None
        }
    }
}

/// Map a file extension (without the dot) to a highlighting language.
///
/// Lookup is case-insensitive. Unknown extensions map to themselves and a
/// missing extension maps to `plaintext`.
pub fn language_for_extension(ext: &str) -> String {
    if ext.is_empty() {
        return "plaintext".to_string();
    }
    let language = match ext.to_ascii_lowercase().as_str() {
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "tsx" => "tsx",
        "jsx" => "jsx",
        "sh" | "bash" | "zsh" | "env" => "bash",
        "ps1" => "powershell",
        "py" => "python",
        "rb" => "ruby",
        "go" => "go",
        "rs" => "rust",
        "java" => "java",
        "kt" => "kotlin",
        "swift" => "swift",
        "cs" => "csharp",
        "cpp" | "hpp" => "cpp",
        "c" | "h" => "c",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "sass" => "sass",
        "less" => "less",
        "md" => "markdown",
        "sql" => "sql",
        "graphql" | "gql" => "graphql",
        "dockerfile" => "dockerfile",
        "makefile" => "makefile",
        "nginx" => "nginx",
        "ini" => "ini",
        _ => ext,
    };
    language.to_string()
}
