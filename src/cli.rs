use crate::collector::{DeclarationCollector, DeclarationIndex};
use crate::description::{ApiMethodDescription, ApiParamDescription};
use crate::error::SpecifierError;
use crate::parser::{AstParser, ParsedFile};
use crate::scanner::FileScanner;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use crate::specifier::{ApiSpecifier, Specifier};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::PathBuf;

/// API Specifier - Describe the API surface declared with marker attributes in Rust source
#[derive(Parser, Debug)]
#[command(name = "api-specifier")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Rust project directory
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Type to describe (if not specified, every type is summarized)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_name: Option<String>,

    /// Operation of the type to describe
    #[arg(short = 'm', long = "method", value_name = "METHOD", requires = "type_name")]
    pub method: Option<String>,

    /// Parameter of the operation to describe
    #[arg(short = 'p', long = "param", value_name = "PARAM", requires = "method")]
    pub param: Option<String>,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// One line of the project-wide overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub api_methods: Vec<String>,
}

/// Full description of one type's API surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub methods: Vec<ApiMethodDescription>,
}

/// What the command prints, depending on how narrow the query is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Types(Vec<TypeSummary>),
    Type(TypeReport),
    Method(ApiMethodDescription),
    Param(ApiParamDescription),
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_path.exists() {
        anyhow::bail!(
            "Project path does not exist: {}",
            args.project_path.display()
        );
    }

    if !args.project_path.is_dir() {
        anyhow::bail!(
            "Project path is not a directory: {}",
            args.project_path.display()
        );
    }

    info!("Project path: {}", args.project_path.display());
    info!("Output format: {:?}", args.output_format);
    match &args.type_name {
        Some(type_name) => info!("Type: {}", type_name),
        None => info!("Type: all"),
    }
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Builds the report for a query against collected declarations.
///
/// # Errors
///
/// Fails when the named type does not exist, or when a named method or
/// parameter cannot be described.
pub fn build_report(
    index: &DeclarationIndex,
    type_name: Option<&str>,
    method: Option<&str>,
    param: Option<&str>,
) -> Result<Report> {
    let Some(type_name) = type_name else {
        let summaries = index
            .iter()
            .map(|declaration| {
                let specifier = Specifier::new(declaration);
                TypeSummary {
                    name: declaration.name.clone(),
                    description: specifier.api_description(),
                    api_methods: specifier.api_method_names(),
                }
            })
            .collect();
        return Ok(Report::Types(summaries));
    };

    let declaration = index
        .get(type_name)
        .ok_or_else(|| SpecifierError::TypeNotFound(type_name.to_string()))?;
    let specifier = Specifier::new(declaration);

    match (method, param) {
        (Some(method), Some(param)) => {
            if let Err(e) = specifier.resolve_parameter(method, param) {
                return Err(e).context("Cannot describe parameter");
            }
            specifier
                .api_method_param_full_description(method, param)
                .map(Report::Param)
                .with_context(|| format!("No parameter `{}` on `{}::{}`", param, type_name, method))
        }
        (Some(method), None) => specifier
            .api_method_full_description(method)
            .map(Report::Method)
            .with_context(|| {
                format!(
                    "No single public #[api_method] named `{}` on `{}`",
                    method, type_name
                )
            }),
        (None, Some(param)) => {
            anyhow::bail!("Parameter `{}` needs a method to resolve against", param)
        }
        (None, None) => {
            let methods = specifier
                .api_method_names()
                .into_iter()
                .filter_map(|name| {
                    let description = specifier.api_method_full_description(&name);
                    if description.is_none() {
                        warn!("Skipping `{}::{}`: overloaded #[api_method]", type_name, name);
                    }
                    description
                })
                .collect();
            Ok(Report::Type(TypeReport {
                name: declaration.name.clone(),
                description: specifier.api_description(),
                methods,
            }))
        }
    }
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Scanning project directory...");
    let scanner = FileScanner::new(args.project_path.clone());
    let scan_result = scanner.scan()?;

    info!("Found {} Rust files", scan_result.source_files.len());
    for warning in &scan_result.warnings {
        warn!("{}", warning);
    }
    if scan_result.source_files.is_empty() {
        anyhow::bail!("No Rust files found in the project directory");
    }

    info!("Parsing Rust files...");
    let parsed_files: Vec<ParsedFile> = AstParser::parse_files(&scan_result.source_files)
        .into_iter()
        .filter_map(|r| match r {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Skipping file due to parse error: {:#}", e);
                None
            }
        })
        .collect();

    info!("Successfully parsed {} files", parsed_files.len());
    if parsed_files.is_empty() {
        anyhow::bail!("No files could be parsed successfully");
    }

    let index = DeclarationCollector::collect(&parsed_files);
    info!("Collected {} types", index.len());

    let report = build_report(
        &index,
        args.type_name.as_deref(),
        args.method.as_deref(),
        args.param.as_deref(),
    )?;

    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&report)?,
        OutputFormat::Json => serialize_json(&report)?,
    };

    if let Some(output_path) = &args.output_path {
        write_to_file(&content, output_path)?;
        info!("Wrote report to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn index_of(code: &str) -> DeclarationIndex {
        let parsed = AstParser::parse_source("lib.rs", code).unwrap();
        DeclarationCollector::collect(&[parsed])
    }

    const SOURCE: &str = r#"
        #[api_description("A calculator")]
        pub struct Calc;

        impl Calc {
            #[api_method]
            #[api_description("adds two numbers")]
            pub fn add(&self, #[api_required] a: i32, b: i32) -> i32 { a + b }

            #[api_method]
            pub fn twice(&self) {}

            #[api_method]
            pub fn twice(&self, n: i32) {}
        }

        pub struct Plain;
    "#;

    #[test]
    fn test_summary_of_all_types() {
        let report = build_report(&index_of(SOURCE), None, None, None).unwrap();
        assert_eq!(
            report,
            Report::Types(vec![
                TypeSummary {
                    name: "Calc".to_string(),
                    description: Some("A calculator".to_string()),
                    api_methods: vec!["add".to_string(), "twice".to_string(), "twice".to_string()],
                },
                TypeSummary {
                    name: "Plain".to_string(),
                    description: None,
                    api_methods: vec![],
                },
            ])
        );
    }

    #[test]
    fn test_type_report_skips_overloads() {
        let Report::Type(report) = build_report(&index_of(SOURCE), Some("Calc"), None, None).unwrap()
        else {
            panic!("expected a type report");
        };
        assert_eq!(report.methods.len(), 1);
        assert_eq!(report.methods[0].method_description.name.as_deref(), Some("add"));
    }

    #[test]
    fn test_method_and_param_reports() {
        let index = index_of(SOURCE);

        let Report::Method(add) = build_report(&index, Some("Calc"), Some("add"), None).unwrap() else {
            panic!("expected a method report");
        };
        assert_eq!(add.param_descriptions.len(), 2);

        let Report::Param(a) = build_report(&index, Some("Calc"), Some("add"), Some("a")).unwrap() else {
            panic!("expected a param report");
        };
        assert!(a.required);
    }

    #[test]
    fn test_unresolvable_queries_fail() {
        let index = index_of(SOURCE);

        let err = build_report(&index, Some("Missing"), None, None).unwrap_err();
        assert!(err.to_string().contains("type `Missing` was not found"));
        assert!(build_report(&index, Some("Calc"), Some("twice"), None).is_err());
        assert!(build_report(&index, Some("Calc"), Some("add"), Some("c")).is_err());
    }

    #[test]
    fn test_param_without_method_is_rejected() {
        let index = index_of(SOURCE);

        let err = build_report(&index, Some("Calc"), None, Some("a")).unwrap_err();
        assert!(err.to_string().contains("needs a method"));
    }

    #[test]
    fn test_args_require_existing_directory() {
        let args = CliArgs::parse_from(["api-specifier", "/nonexistent/project"]);
        assert!(parse_args_from_parsed(args).is_err());
    }

    #[test]
    fn test_param_requires_method() {
        let result = CliArgs::try_parse_from(["api-specifier", ".", "--type", "Calc", "--param", "a"]);
        assert!(result.is_err());

        let args = CliArgs::try_parse_from([
            "api-specifier", ".", "-t", "Calc", "-m", "add", "-p", "a", "-f", "json",
        ])
        .unwrap();
        assert_eq!(args.project_path, PathBuf::from("."));
        assert_eq!(args.param.as_deref(), Some("a"));
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
