//! Insertion planning
//!
//! Decides where generated spec text goes in an existing test document.
//! Single-method output joins the last `describe` block by scanning upward
//! for the last line that is exactly `});`. The scan is not bracket-aware, so
//! a document ending in some other `});`-terminated block will receive the
//! test there instead.

use serde::Serialize;

const GROUP_CLOSING: &str = "});";
const NESTED_INDENT: &str = "  ";

/// Where and what to insert into a target document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertionPlan {
    /// Byte offset in the original document
    pub offset: usize,
    /// 0-indexed line of `offset`
    pub line: usize,
    pub text: String,
    /// The host should re-format the document after applying the edit
    pub format_requested: bool,
}

impl InsertionPlan {
    /// The document with the planned text spliced in
    pub fn apply(&self, document: &str) -> String {
        let offset = self.offset.min(document.len());
        let mut updated = String::with_capacity(document.len() + self.text.len());
        updated.push_str(&document[..offset]);
        updated.push_str(&self.text);
        updated.push_str(&document[offset..]);
        updated
    }
}

/// Plan the insertion of `generated` into `document`
///
/// * `has_import_statement` - the caller supplied its own import; when it did
///   not, generated `import` lines are dropped for non-empty documents
/// * `inside_describe` - single-method mode, merge into the last group
pub fn plan_insertion(
    document: &str,
    generated: &str,
    has_import_statement: bool,
    inside_describe: bool,
) -> InsertionPlan {
    if document.trim().is_empty() {
        return InsertionPlan {
            offset: 0,
            line: 0,
            text: generated.to_string(),
            format_requested: true,
        };
    }

    let filtered = if has_import_statement {
        drop_existing_imports(generated, document)
    } else {
        strip_imports(generated)
    };
    let body = filtered.trim_start_matches(['\n', '\r']);

    if inside_describe {
        if let Some((line, offset, indent)) = find_last_group_closing(document) {
            let mut prefix = indent.to_string();
            prefix.push_str(NESTED_INDENT);

            let mut text = String::from("\n");
            text.push_str(&indent_lines(body, &prefix));
            return InsertionPlan {
                offset,
                line,
                text,
                format_requested: true,
            };
        }
        log::debug!("No closing group line found, appending at end of document");
    }

    let mut text = String::new();
    if !document.ends_with('\n') {
        text.push('\n');
    }
    text.push('\n');
    text.push_str(body);

    InsertionPlan {
        offset: document.len(),
        line: document.lines().count(),
        text,
        format_requested: true,
    }
}

/// Remove every line starting with `import`
pub fn strip_imports(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.starts_with("import"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove generated `import` lines the document already contains
fn drop_existing_imports(text: &str, document: &str) -> String {
    text.split('\n')
        .filter(|line| {
            !line.starts_with("import")
                || !document.lines().any(|existing| existing.trim() == line.trim())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line number, byte offset and indentation of the last `});` line
fn find_last_group_closing(document: &str) -> Option<(usize, usize, &str)> {
    let mut offset = 0;
    let mut found = None;

    for (index, line) in document.split_inclusive('\n').enumerate() {
        if line.trim() == GROUP_CLOSING {
            let indent_len = line.len() - line.trim_start().len();
            found = Some((index, offset, &line[..indent_len]));
        }
        offset += line.len();
    }

    found
}

fn indent_lines(text: &str, prefix: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.trim_start_matches([' ', '\t']).to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}
