//! API Specifier - structured API surface descriptions from marker attributes.
//!
//! This library describes the public API of a Rust type from declarative markers
//! attached to the type, its inherent methods and their parameters: which
//! operations belong to the API, their descriptions, which parameters are
//! required, and the integer bounds of parameters and return values.
//!
//! # Markers
//!
//! ```ignore
//! #[api_description("A tiny calculator")]
//! pub struct Calc;
//!
//! impl Calc {
//!     #[api_method]
//!     #[api_description("adds two numbers")]
//!     pub fn add(&self, #[api_required] #[api_description("first operand")] a: i64, b: i64) -> i64 {
//!         a + b
//!     }
//!
//!     #[api_method]
//!     #[api_return(min = 0)]
//!     pub fn div(&self, a: i64, #[api_int_validation(min = 1)] b: i64) -> i64 {
//!         a / b
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! 1. [`scanner`] - Finds Rust source files in a project
//! 2. [`parser`] - Parses them into `syn` syntax trees
//! 3. [`collector`] - Builds [`declaration::TypeDeclaration`]s from inherent impls and marker [`attributes`]
//! 4. [`specifier`] - Answers description queries against one declaration
//!
//! Declarations can also be assembled by hand with
//! [`declaration::TypeDeclaration::builder`], skipping steps 1-3.
//!
//! # Example Usage
//!
//! ```no_run
//! use api_specifier::{
//!     collector::DeclarationCollector,
//!     parser::AstParser,
//!     scanner::FileScanner,
//!     specifier::{ApiSpecifier, Specifier},
//! };
//! use std::path::PathBuf;
//!
//! let scan_result = FileScanner::new(PathBuf::from("./my-project")).scan().unwrap();
//! let parsed_files: Vec<_> = AstParser::parse_files(&scan_result.source_files)
//!     .into_iter()
//!     .filter_map(Result::ok)
//!     .collect();
//!
//! let index = DeclarationCollector::collect(&parsed_files);
//! let calc = index.get("Calc").unwrap();
//! let specifier = Specifier::new(calc);
//!
//! for name in specifier.api_method_names() {
//!     println!("{}: {:?}", name, specifier.api_method_description(&name));
//! }
//! ```

pub mod attributes;
pub mod cli;
pub mod collector;
pub mod declaration;
pub mod description;
pub mod error;
pub mod marker;
pub mod parser;
pub mod scanner;
pub mod serializer;
pub mod specifier;
