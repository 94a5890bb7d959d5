use eyre::{bail, Result};
use std::path::Path;
use tree_sitter::{Parser, Tree};

pub mod cache;

pub use cache::{CachedTree, ParseCache};

/// Source languages the scaffold generator can analyze
///
/// Each language has a corresponding tree-sitter grammar that can parse
/// source code into a concrete syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// JavaScript (.js, .mjs, .cjs, .jsx)
    JavaScript,
    /// TypeScript (.ts, .mts, .cts)
    TypeScript,
    /// TypeScript with JSX (.tsx)
    Tsx,
}

impl Language {
    /// Get a human-readable name for the language
    pub fn name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Tsx => "TSX",
        }
    }

    /// Get the tree-sitter language grammar for this language
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Detect the source language from a file path extension
///
/// The detection is case-insensitive.
///
/// # Supported Extensions
/// - `.js`, `.mjs`, `.cjs`, `.jsx` → JavaScript
/// - `.ts`, `.mts`, `.cts` → TypeScript
/// - `.tsx` → TSX
///
/// # Errors
/// Returns an error if:
/// - The file has no extension
/// - The extension is not supported
///
/// # Examples
/// ```
/// use mockthis_mcp::parser::{detect_language, Language};
///
/// let lang = detect_language("src/app.service.ts").unwrap();
/// assert_eq!(lang, Language::TypeScript);
///
/// // Case insensitive
/// let lang = detect_language("Legacy.JS").unwrap();
/// assert_eq!(lang, Language::JavaScript);
///
/// // Unsupported extension
/// assert!(detect_language("main.rs").is_err());
/// ```
pub fn detect_language(path: impl AsRef<Path>) -> Result<Language> {
    let path = path.as_ref();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("js") | Some("mjs") | Some("cjs") | Some("jsx") => Ok(Language::JavaScript),
        Some("ts") | Some("mts") | Some("cts") => Ok(Language::TypeScript),
        Some("tsx") => Ok(Language::Tsx),
        Some(ext) => {
            bail!("Unsupported file extension: .{}", ext)
        }
        None => {
            bail!("No file extension found in path: {}", path.display())
        }
    }
}

/// Parse source code into a tree-sitter syntax tree
///
/// Even if the source contains syntax errors, a tree is still returned with
/// error nodes marked.
///
/// # Examples
/// ```
/// use mockthis_mcp::parser::{parse_code, Language};
///
/// let code = "export class Greeter { greet(): string { return 'hi'; } }";
/// let tree = parse_code(code, Language::TypeScript).unwrap();
///
/// let root = tree.root_node();
/// assert_eq!(root.kind(), "program");
/// assert!(!root.has_error());
/// ```
pub fn parse_code(source: &str, language: Language) -> Result<Tree> {
    log::debug!("Parsing {} code ({} bytes)", language.name(), source.len());

    let mut parser = Parser::new();
    parser.set_language(&language.tree_sitter_language())?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| eyre::eyre!("Failed to parse {} code", language.name()))?;

    if tree.root_node().has_error() {
        log::warn!("Parse tree contains syntax errors");
    }

    Ok(tree)
}
