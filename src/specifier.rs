//! The extractor: answers description queries against one type declaration.
//!
//! Two resolution modes coexist on purpose:
//!
//! - **lenient-by-name** ([`TypeDeclaration::find_operation`]) backs the simple
//!   lookups: the first public instance operation with the given name, marker
//!   or not.
//! - **strict-marked-unique** ([`TypeDeclaration::find_api_operation`]) backs
//!   [`ApiSpecifier::api_method_full_description`]: exactly one public instance
//!   operation with that name carrying `#[api_method]`, otherwise absent.
//!
//! Associated functions (no `self` receiver) are never resolved.
//!
//! Nothing is cached. Every call reads the declaration again.
//!
//! # Example
//!
//! ```
//! use api_specifier::declaration::{OperationDeclaration, ParameterDeclaration, TypeDeclaration};
//! use api_specifier::specifier::{ApiSpecifier, Specifier};
//!
//! let calc = TypeDeclaration::builder("Calc")
//!     .operation(
//!         OperationDeclaration::builder("add")
//!             .api_method()
//!             .description("adds two numbers")
//!             .param(ParameterDeclaration::new("a").required(true)),
//!     )
//!     .build();
//!
//! let specifier = Specifier::new(&calc);
//! assert_eq!(specifier.api_method_names(), vec!["add"]);
//! assert_eq!(specifier.api_method_description("add").as_deref(), Some("adds two numbers"));
//! ```

use crate::declaration::{ApiDeclared, OperationDeclaration, ParameterDeclaration, TypeDeclaration};
use crate::description::{ApiMethodDescription, ApiParamDescription, CommonDescription};
use crate::error::{Result, SpecifierError};
use log::{debug, warn};
use std::borrow::Cow;

/// Queries over the API surface of a single type.
///
/// Unresolved names yield `None`, never an error.
pub trait ApiSpecifier {
    /// Description attached to the type itself.
    fn api_description(&self) -> Option<String>;

    /// Names of public instance operations marked `#[api_method]`, in
    /// declaration order.
    fn api_method_names(&self) -> Vec<String>;

    /// Description of the first public instance operation named `method`.
    fn api_method_description(&self, method: &str) -> Option<String>;

    /// Parameter names of the first public instance operation named `method`.
    fn api_method_param_names(&self, method: &str) -> Option<Vec<String>>;

    /// Description of parameter `param` of operation `method`.
    fn api_method_param_description(&self, method: &str, param: &str) -> Option<String>;

    /// Full contract of parameter `param` of operation `method`.
    fn api_method_param_full_description(
        &self,
        method: &str,
        param: &str,
    ) -> Option<ApiParamDescription>;

    /// Full description of the single marked public instance operation named `method`.
    fn api_method_full_description(&self, method: &str) -> Option<ApiMethodDescription>;
}

/// Extractor bound to one type declaration.
#[derive(Debug, Clone)]
pub struct Specifier<'a> {
    declaration: Cow<'a, TypeDeclaration>,
}

impl<'a> Specifier<'a> {
    /// Binds a specifier to a borrowed declaration.
    pub fn new(declaration: &'a TypeDeclaration) -> Self {
        Self {
            declaration: Cow::Borrowed(declaration),
        }
    }

    /// Binds a specifier to an owned declaration.
    pub fn from_declaration(declaration: TypeDeclaration) -> Specifier<'static> {
        Specifier {
            declaration: Cow::Owned(declaration),
        }
    }

    /// Binds a specifier to the declaration registered for `T`.
    pub fn of<T: ApiDeclared>() -> Specifier<'static> {
        Specifier::from_declaration(T::api_declaration())
    }

    pub fn declaration(&self) -> &TypeDeclaration {
        &self.declaration
    }

    /// Resolves parameter `param` of the first public instance operation named
    /// `method` by exact name.
    ///
    /// Returns `Ok(None)` when the operation or parameter does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SpecifierError::AmbiguousParameter`] when several parameters
    /// share the name.
    pub fn resolve_parameter(
        &self,
        method: &str,
        param: &str,
    ) -> Result<Option<&ParameterDeclaration>> {
        let Some(operation) = self.declaration.find_operation(method) else {
            debug!("Operation `{}` not found on `{}`", method, self.declaration.name);
            return Ok(None);
        };
        unique_parameter(operation, param)
    }

    fn parameter_or_warn(&self, method: &str, param: &str) -> Option<&ParameterDeclaration> {
        match self.resolve_parameter(method, param) {
            Ok(found) => found,
            Err(e) => {
                warn!("{} on `{}`", e, self.declaration.name);
                None
            }
        }
    }
}

fn unique_parameter<'o>(
    operation: &'o OperationDeclaration,
    param: &str,
) -> Result<Option<&'o ParameterDeclaration>> {
    let mut matches = operation.parameters.iter().filter(|p| p.name == param);
    let Some(first) = matches.next() else {
        return Ok(None);
    };
    let extra = matches.count();
    if extra > 0 {
        return Err(SpecifierError::AmbiguousParameter {
            method: operation.name.clone(),
            param: param.to_string(),
            count: extra + 1,
        });
    }
    Ok(Some(first))
}

fn param_full_description(parameter: &ParameterDeclaration) -> ApiParamDescription {
    let common = CommonDescription::new(
        parameter.name.clone(),
        parameter.markers.description().map(str::to_string),
    );
    ApiParamDescription::from_markers(common, &parameter.markers)
}

impl ApiSpecifier for Specifier<'_> {
    fn api_description(&self) -> Option<String> {
        self.declaration.markers.description().map(str::to_string)
    }

    fn api_method_names(&self) -> Vec<String> {
        self.declaration
            .api_operations()
            .map(|op| op.name.clone())
            .collect()
    }

    fn api_method_description(&self, method: &str) -> Option<String> {
        self.declaration
            .find_operation(method)?
            .markers
            .description()
            .map(str::to_string)
    }

    fn api_method_param_names(&self, method: &str) -> Option<Vec<String>> {
        Some(self.declaration.find_operation(method)?.parameter_names())
    }

    fn api_method_param_description(&self, method: &str, param: &str) -> Option<String> {
        self.parameter_or_warn(method, param)?
            .markers
            .description()
            .map(str::to_string)
    }

    fn api_method_param_full_description(
        &self,
        method: &str,
        param: &str,
    ) -> Option<ApiParamDescription> {
        self.parameter_or_warn(method, param)
            .map(param_full_description)
    }

    fn api_method_full_description(&self, method: &str) -> Option<ApiMethodDescription> {
        let Some(operation) = self.declaration.find_api_operation(method) else {
            debug!(
                "No unique #[api_method] `{}` on `{}`",
                method, self.declaration.name
            );
            return None;
        };

        let return_description = if operation.return_markers.is_empty() {
            None
        } else {
            Some(ApiParamDescription::from_markers(
                CommonDescription::unnamed(),
                &operation.return_markers,
            ))
        };

        Some(ApiMethodDescription {
            method_description: CommonDescription::new(
                operation.name.clone(),
                operation.markers.description().map(str::to_string),
            ),
            param_descriptions: operation
                .parameters
                .iter()
                .map(param_full_description)
                .collect(),
            return_description,
        })
    }
}
