//! Static declarations of a type's members and the markers attached to them.
//!
//! A [`TypeDeclaration`] is the immutable input of the [`Specifier`](crate::specifier::Specifier).
//! Declarations are produced either by the [`collector`](crate::collector) from parsed source
//! files or by hand through [`TypeDeclaration::builder`].
//!
//! # Example
//!
//! ```
//! use api_specifier::declaration::{OperationDeclaration, ParameterDeclaration, TypeDeclaration};
//!
//! let calc = TypeDeclaration::builder("Calc")
//!     .description("A tiny calculator")
//!     .operation(
//!         OperationDeclaration::builder("add")
//!             .api_method()
//!             .description("adds two numbers")
//!             .param(ParameterDeclaration::new("a").required(true))
//!             .param(ParameterDeclaration::new("b")),
//!     )
//!     .build();
//!
//! assert_eq!(calc.api_operations().count(), 1);
//! ```

use crate::marker::{Marker, MarkerSet, MarkerTarget};
use log::warn;

/// Visibility of a declared operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Declared `pub`
    Public,
    /// Declared `pub(crate)`, `pub(super)` or `pub(in ..)`
    Restricted,
    /// No visibility modifier
    Private,
}

/// How an operation is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Takes a `self` receiver
    Instance,
    /// Associated function without `self`
    Associated,
}

/// A declared parameter slot and its markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDeclaration {
    pub name: String,
    pub markers: MarkerSet,
}

/// A declared operation (method) of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDeclaration {
    pub name: String,
    pub visibility: Visibility,
    pub receiver: Receiver,
    /// Markers on the operation itself
    pub markers: MarkerSet,
    /// Parameters in declaration order, receiver excluded
    pub parameters: Vec<ParameterDeclaration>,
    /// Markers on the return slot
    pub return_markers: MarkerSet,
}

/// A type together with its directly declared operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    pub markers: MarkerSet,
    /// Operations in declaration order
    pub operations: Vec<OperationDeclaration>,
}

/// Attaches `marker` to `set` if the marker kind accepts `target`.
///
/// Markers that do not fit the site, and duplicates of a kind already present,
/// are dropped with a warning. Returns whether the marker was attached.
pub fn attach_marker(set: &mut MarkerSet, marker: Marker, target: MarkerTarget, site: &str) -> bool {
    if !marker.applies_to(target) {
        warn!(
            "Ignoring #[{}] on {}: not allowed on {:?} sites",
            marker.attribute_name(),
            site,
            target
        );
        return false;
    }
    let name = marker.attribute_name();
    if !set.insert(marker) {
        warn!("Ignoring duplicate #[{}] on {}", name, site);
        return false;
    }
    true
}

impl ParameterDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: MarkerSet::new(),
        }
    }

    /// Attaches an arbitrary marker to this parameter.
    pub fn marker(mut self, marker: Marker) -> Self {
        let site = format!("parameter `{}`", self.name);
        attach_marker(&mut self.markers, marker, MarkerTarget::Parameter, &site);
        self
    }

    pub fn description(self, text: impl Into<String>) -> Self {
        self.marker(Marker::Description(Some(text.into())))
    }

    pub fn required(self, required: bool) -> Self {
        self.marker(Marker::Required(required))
    }

    pub fn int_validation(self, min: Option<i64>, max: Option<i64>) -> Self {
        self.marker(Marker::IntValidation { min, max })
    }
}

impl OperationDeclaration {
    /// Starts a public instance operation named `name`.
    pub fn builder(name: impl Into<String>) -> OperationBuilder {
        OperationBuilder {
            operation: OperationDeclaration {
                name: name.into(),
                visibility: Visibility::Public,
                receiver: Receiver::Instance,
                markers: MarkerSet::new(),
                parameters: Vec::new(),
                return_markers: MarkerSet::new(),
            },
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_instance(&self) -> bool {
        self.receiver == Receiver::Instance
    }

    pub fn is_api_method(&self) -> bool {
        self.markers.is_method()
    }

    pub fn parameter_names(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.name.clone()).collect()
    }
}

/// Builder for [`OperationDeclaration`].
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    operation: OperationDeclaration,
}

impl OperationBuilder {
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.operation.visibility = visibility;
        self
    }

    pub fn receiver(mut self, receiver: Receiver) -> Self {
        self.operation.receiver = receiver;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        let site = format!("operation `{}`", self.operation.name);
        attach_marker(&mut self.operation.markers, marker, MarkerTarget::Operation, &site);
        self
    }

    pub fn api_method(self) -> Self {
        self.marker(Marker::Method)
    }

    pub fn description(self, text: impl Into<String>) -> Self {
        self.marker(Marker::Description(Some(text.into())))
    }

    pub fn param(mut self, parameter: ParameterDeclaration) -> Self {
        self.operation.parameters.push(parameter);
        self
    }

    /// Attaches a marker to the return slot.
    pub fn returns(mut self, marker: Marker) -> Self {
        let site = format!("return of `{}`", self.operation.name);
        attach_marker(
            &mut self.operation.return_markers,
            marker,
            MarkerTarget::Return,
            &site,
        );
        self
    }

    pub fn build(self) -> OperationDeclaration {
        self.operation
    }
}

impl From<OperationBuilder> for OperationDeclaration {
    fn from(builder: OperationBuilder) -> Self {
        builder.build()
    }
}

impl TypeDeclaration {
    /// Creates a declaration with no markers and no operations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: MarkerSet::new(),
            operations: Vec::new(),
        }
    }

    pub fn builder(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder {
            declaration: TypeDeclaration::new(name),
        }
    }

    /// Public operations in declaration order.
    pub fn public_operations(&self) -> impl Iterator<Item = &OperationDeclaration> {
        self.operations.iter().filter(|op| op.is_public())
    }

    /// Public operations taking a `self` receiver. Associated functions are
    /// not members of the API surface.
    pub fn public_instance_operations(&self) -> impl Iterator<Item = &OperationDeclaration> {
        self.public_operations().filter(|op| op.is_instance())
    }

    /// Public instance operations carrying the operation marker, in
    /// declaration order. Overloads sharing a name are all yielded.
    pub fn api_operations(&self) -> impl Iterator<Item = &OperationDeclaration> {
        self.public_instance_operations()
            .filter(|op| op.is_api_method())
    }

    /// Lenient-by-name resolution: the first public instance operation named
    /// `name`, whether or not it carries the operation marker.
    pub fn find_operation(&self, name: &str) -> Option<&OperationDeclaration> {
        self.public_instance_operations().find(|op| op.name == name)
    }

    /// Strict-marked-unique resolution: the single public instance operation
    /// named `name` that carries the operation marker. `None` if there are
    /// zero or several.
    pub fn find_api_operation(&self, name: &str) -> Option<&OperationDeclaration> {
        let mut matches = self
            .public_instance_operations()
            .filter(|op| op.name == name && op.is_api_method());
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first)
    }
}

/// Builder for [`TypeDeclaration`].
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    declaration: TypeDeclaration,
}

impl TypeBuilder {
    pub fn marker(mut self, marker: Marker) -> Self {
        let site = format!("type `{}`", self.declaration.name);
        attach_marker(&mut self.declaration.markers, marker, MarkerTarget::Type, &site);
        self
    }

    pub fn description(self, text: impl Into<String>) -> Self {
        self.marker(Marker::Description(Some(text.into())))
    }

    pub fn operation(mut self, operation: impl Into<OperationDeclaration>) -> Self {
        self.declaration.operations.push(operation.into());
        self
    }

    pub fn build(self) -> TypeDeclaration {
        self.declaration
    }
}

/// Binds a Rust type to its API declaration.
///
/// This is the registry side of the extractor: implement it by hand (usually
/// with the builder) to describe a type without going through source analysis.
pub trait ApiDeclared {
    fn api_declaration() -> TypeDeclaration;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overloaded() -> TypeDeclaration {
        TypeDeclaration::builder("Shapes")
            .operation(OperationDeclaration::builder("area").api_method())
            .operation(
                OperationDeclaration::builder("area")
                    .api_method()
                    .param(ParameterDeclaration::new("scale")),
            )
            .operation(OperationDeclaration::builder("perimeter").description("plain"))
            .operation(
                OperationDeclaration::builder("hidden")
                    .api_method()
                    .visibility(Visibility::Restricted),
            )
            .operation(
                OperationDeclaration::builder("unit")
                    .api_method()
                    .receiver(Receiver::Associated),
            )
            .build()
    }

    #[test]
    fn test_api_operations_filters_marker_visibility_and_receiver() {
        let decl = overloaded();
        let names: Vec<_> = decl.api_operations().map(|op| op.name.as_str()).collect();
        assert_eq!(names, vec!["area", "area"]);
    }

    #[test]
    fn test_lenient_lookup_ignores_marker() {
        let decl = overloaded();
        let op = decl.find_operation("perimeter").unwrap();
        assert!(!op.is_api_method());
        assert!(decl.find_operation("hidden").is_none());
        assert!(decl.find_operation("area").unwrap().parameters.is_empty());
    }

    #[test]
    fn test_associated_functions_do_not_resolve() {
        let decl = overloaded();
        assert!(decl.find_operation("unit").is_none());
        assert!(decl.find_api_operation("unit").is_none());

        // An instance overload is still found past an associated one
        let decl = TypeDeclaration::builder("Mixed")
            .operation(
                OperationDeclaration::builder("make")
                    .api_method()
                    .receiver(Receiver::Associated),
            )
            .operation(
                OperationDeclaration::builder("make")
                    .api_method()
                    .param(ParameterDeclaration::new("seed")),
            )
            .build();
        assert_eq!(decl.find_operation("make").unwrap().parameter_names(), vec!["seed"]);
        assert_eq!(decl.find_api_operation("make").unwrap().parameter_names(), vec!["seed"]);
    }

    #[test]
    fn test_strict_lookup_requires_unique_marked_match() {
        let decl = overloaded();
        assert!(decl.find_api_operation("area").is_none());
        assert!(decl.find_api_operation("perimeter").is_none());
        assert!(decl.find_api_operation("hidden").is_none());
    }

    #[test]
    fn test_attach_marker_rejects_wrong_site() {
        let op = OperationDeclaration::builder("run")
            .marker(Marker::Required(true))
            .api_method()
            .build();
        assert_eq!(op.markers.len(), 1);
        assert!(op.is_api_method());

        let param = ParameterDeclaration::new("x").marker(Marker::Method);
        assert!(param.markers.is_empty());
    }

    #[test]
    fn test_parameter_names_keep_duplicates() {
        let op = OperationDeclaration::builder("swap")
            .param(ParameterDeclaration::new("x"))
            .param(ParameterDeclaration::new("x"))
            .param(ParameterDeclaration::new("y"))
            .build();
        assert_eq!(op.parameter_names(), vec!["x", "x", "y"]);
    }
}
