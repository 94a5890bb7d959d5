//! Analysis session
//!
//! A [`MockSession`] owns the parse cache and the base configuration and runs
//! the two scaffold commands end to end: read the source, extract, render,
//! plan the insertion and write the target file.

use crate::analysis::spec_files::{is_spec_file, resolve_target, touch};
use crate::config::MockConfig;
use crate::diagnostics::DiagnosticReport;
use crate::error::MockError;
use crate::extraction::declarations::{
    collect_methods, exported_function_names, extract_class_name, extract_constructor,
    method_at_position, CaretTarget,
};
use crate::extraction::{SourceModel, SpecConfig, TestMethod};
use crate::parser::{detect_language, Language, ParseCache};
use crate::scaffold::{plan_insertion, render_spec};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use url::Url;

pub const MOCK_THIS: &str = "Mock This";
pub const MOCK_EVERYTHING: &str = "Mock Everything";

/// What a command wrote, reported back to the client
#[derive(Debug, Clone, Serialize)]
pub struct MockOutcome {
    pub source_file: String,
    pub target_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_uri: Option<String>,
    /// 0-indexed line the text was inserted at
    pub line: usize,
    pub inserted: String,
    pub format_requested: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub tests: Vec<TestMethod>,
}

#[derive(Debug, Default)]
pub struct MockSession {
    cache: ParseCache,
    config: MockConfig,
}

impl MockSession {
    pub fn new(config: MockConfig) -> Self {
        Self {
            cache: ParseCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }

    /// Generate one test for the method under the caret (1-indexed position)
    pub fn mock_this(
        &mut self,
        file_path: &Path,
        line: u32,
        column: u32,
        config: &MockConfig,
    ) -> Result<MockOutcome, MockError> {
        let language = check_source_file(file_path, MOCK_THIS, config)?;
        let source = read_source(file_path)?;

        let entry = self
            .cache
            .parse(file_path, &source, language)
            .map_err(|e| parse_error(file_path, e))?;
        let model = SourceModel::new(&entry.tree, &entry.source);

        let class_name = extract_class_name(&model);
        let constructor = extract_constructor(&model);
        let offset = model.offset_for_position(line, column);

        let method = match method_at_position(&model, offset) {
            CaretTarget::Method(method) => method,
            CaretTarget::NoMethod => return Err(MockError::NoMethodsFound),
            CaretTarget::NoDeclaration => {
                return Err(MockError::NoAnalyzableNode {
                    command: MOCK_THIS.to_string(),
                })
            }
        };
        log::debug!("Caret {}:{} resolved to '{}'", line, column, method.name);

        let target = resolve_target(file_path, config);
        let spec = SpecConfig {
            file_name: target.to_string_lossy().into_owned(),
            import_statement: None,
            class_name,
            constructor,
            tests: vec![method],
            inside_describe: true,
        };

        write_spec(MOCK_THIS, file_path, &target, spec)
    }

    /// Generate tests for every method in the file, grouped when there is
    /// more than one
    pub fn mock_everything(
        &mut self,
        file_path: &Path,
        exported_only: bool,
        config: &MockConfig,
    ) -> Result<MockOutcome, MockError> {
        let language = check_source_file(file_path, MOCK_EVERYTHING, config)?;
        let source = read_source(file_path)?;

        let entry = self
            .cache
            .parse(file_path, &source, language)
            .map_err(|e| parse_error(file_path, e))?;
        let model = SourceModel::new(&entry.tree, &entry.source);

        let class_name = extract_class_name(&model);
        let constructor = extract_constructor(&model);
        let tests = collect_methods(&model, exported_only);
        log::debug!(
            "Extracted {} methods (constructor: {})",
            tests.len(),
            constructor.is_some()
        );

        if constructor.is_none() && tests.is_empty() {
            return Err(MockError::EmptyExtraction {
                path: file_path.display().to_string(),
            });
        }

        let imported = match &class_name {
            Some(name) => vec![name.clone()],
            None => exported_function_names(&model),
        };
        let import_statement = import_statement(file_path, &imported);

        let target = resolve_target(file_path, config);
        let spec = SpecConfig {
            file_name: target.to_string_lossy().into_owned(),
            import_statement,
            class_name,
            constructor,
            tests,
            inside_describe: false,
        };

        write_spec(MOCK_EVERYTHING, file_path, &target, spec)
    }
}

fn check_source_file(
    file_path: &Path,
    command: &str,
    config: &MockConfig,
) -> Result<Language, MockError> {
    let language = detect_language(file_path).map_err(|e| {
        log::warn!("Refusing {}: {e}", file_path.display());
        MockError::UnsupportedFileKind {
            command: command.to_string(),
            path: file_path.display().to_string(),
        }
    })?;

    if is_spec_file(file_path, config) {
        return Err(MockError::SpecFileRefused {
            path: file_path.display().to_string(),
        });
    }

    Ok(language)
}

fn read_source(file_path: &Path) -> Result<String, MockError> {
    fs::read_to_string(file_path).map_err(|source| MockError::Read {
        path: file_path.display().to_string(),
        source,
    })
}

fn parse_error(file_path: &Path, error: eyre::Report) -> MockError {
    log::warn!("Failed to parse {}: {error:#}", file_path.display());
    MockError::Parse {
        path: file_path.display().to_string(),
        message: format!("{error:#}"),
    }
}

/// `import { A, B } from './stem';`, or nothing when there is nothing to import
fn import_statement(source: &Path, names: &[String]) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let stem = source.file_stem()?.to_string_lossy();
    Some(format!("import {{ {} }} from './{stem}';", names.join(", ")))
}

fn write_spec(
    command: &str,
    source: &Path,
    target: &Path,
    spec: SpecConfig,
) -> Result<MockOutcome, MockError> {
    let write_failure = |error: io::Error| {
        let report = DiagnosticReport::capture(command, &error.to_string()).to_json();
        MockError::TargetWriteFailure {
            command: command.to_string(),
            target: target.display().to_string(),
            source: error,
            report,
        }
    };

    let text = render_spec(&spec);

    touch(target).map_err(write_failure)?;
    let document = fs::read_to_string(target).map_err(write_failure)?;

    let plan = plan_insertion(
        &document,
        &text,
        spec.import_statement.is_some(),
        spec.inside_describe,
    );
    fs::write(target, plan.apply(&document)).map_err(write_failure)?;

    log::info!(
        "Inserted {} test(s) into {} at line {}",
        spec.tests.len(),
        target.display(),
        plan.line + 1
    );

    let target_uri = fs::canonicalize(target)
        .ok()
        .and_then(|path| Url::from_file_path(path).ok())
        .map(String::from);

    Ok(MockOutcome {
        source_file: source.display().to_string(),
        target_file: target.display().to_string(),
        target_uri,
        line: plan.line,
        inserted: plan.text,
        format_requested: plan.format_requested,
        class_name: spec.class_name,
        tests: spec.tests,
    })
}
