//! Collects type declarations from parsed Rust source.
//!
//! Types are found through their item definitions (`struct`, `enum`, `union`)
//! and their inherent `impl` blocks. Trait impls are not members of the type
//! and are skipped, as are non-`fn` impl items. Operations from several impl
//! blocks, possibly in several files, are merged in file order then source order.
//!
//! Types are keyed by their bare identifier, so two types with the same name
//! in different modules end up in one declaration.
//!
//! # Example
//!
//! ```no_run
//! use api_specifier::collector::DeclarationCollector;
//! use api_specifier::parser::AstParser;
//! use std::path::Path;
//!
//! let parsed = AstParser::parse_file(Path::new("src/calc.rs")).unwrap();
//! let index = DeclarationCollector::collect(&[parsed]);
//! println!("Found {} types", index.len());
//! ```

use crate::attributes::{parse_markers, parse_return_markers};
use crate::declaration::{
    attach_marker, OperationDeclaration, ParameterDeclaration, Receiver, TypeDeclaration, Visibility,
};
use crate::marker::MarkerTarget;
use crate::parser::ParsedFile;
use log::debug;
use std::collections::HashMap;
use syn::visit::Visit;
use syn::{Attribute, FnArg, Pat};

/// Type declarations discovered in a set of parsed files, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    types: Vec<TypeDeclaration>,
}

impl DeclarationIndex {
    pub fn get(&self, name: &str) -> Option<&TypeDeclaration> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Visitor that builds [`TypeDeclaration`]s from syntax trees.
#[derive(Default)]
pub struct DeclarationCollector {
    types: Vec<TypeDeclaration>,
    positions: HashMap<String, usize>,
}

impl DeclarationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects declarations from all `parsed_files`.
    pub fn collect(parsed_files: &[ParsedFile]) -> DeclarationIndex {
        let mut collector = Self::new();
        for parsed_file in parsed_files {
            debug!("Collecting declarations from {}", parsed_file.path.display());
            collector.visit_file(&parsed_file.syntax_tree);
        }
        collector.finish()
    }

    pub fn finish(self) -> DeclarationIndex {
        debug!("Collected {} type declarations", self.types.len());
        DeclarationIndex { types: self.types }
    }

    fn entry(&mut self, name: &str) -> &mut TypeDeclaration {
        let index = match self.positions.get(name).copied() {
            Some(index) => index,
            None => {
                self.types.push(TypeDeclaration::new(name));
                self.positions.insert(name.to_string(), self.types.len() - 1);
                self.types.len() - 1
            }
        };
        &mut self.types[index]
    }

    fn record_type_item(&mut self, ident: &syn::Ident, attrs: &[Attribute]) {
        let name = ident.to_string();
        let site = format!("type `{}`", name);
        let found = parse_markers(attrs, MarkerTarget::Type, &site);

        let declaration = self.entry(&name);
        for marker in found.iter().cloned() {
            attach_marker(&mut declaration.markers, marker, MarkerTarget::Type, &site);
        }
    }

    fn record_impl(&mut self, node: &syn::ItemImpl) {
        let Some(type_name) = self_type_name(&node.self_ty) else {
            debug!("Skipping impl block with unsupported self type");
            return;
        };

        let operations: Vec<OperationDeclaration> = node
            .items
            .iter()
            .filter_map(|item| match item {
                syn::ImplItem::Fn(method) => Some(operation_from_fn(&type_name, method)),
                _ => None,
            })
            .collect();

        debug!("Found {} operations in impl {}", operations.len(), type_name);
        self.entry(&type_name).operations.extend(operations);
    }
}

impl<'ast> Visit<'ast> for DeclarationCollector {
    fn visit_item_struct(&mut self, node: &'ast syn::ItemStruct) {
        self.record_type_item(&node.ident, &node.attrs);
        syn::visit::visit_item_struct(self, node);
    }

    fn visit_item_enum(&mut self, node: &'ast syn::ItemEnum) {
        self.record_type_item(&node.ident, &node.attrs);
        syn::visit::visit_item_enum(self, node);
    }

    fn visit_item_union(&mut self, node: &'ast syn::ItemUnion) {
        self.record_type_item(&node.ident, &node.attrs);
        syn::visit::visit_item_union(self, node);
    }

    fn visit_item_impl(&mut self, node: &'ast syn::ItemImpl) {
        if node.trait_.is_none() {
            self.record_impl(node);
        }

        // Continue into fn bodies, which may declare nested items
        syn::visit::visit_item_impl(self, node);
    }
}

/// Name of the type an impl block is for, ignoring generic arguments.
fn self_type_name(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        syn::Type::Group(group) => self_type_name(&group.elem),
        syn::Type::Paren(paren) => self_type_name(&paren.elem),
        _ => None,
    }
}

fn operation_from_fn(type_name: &str, method: &syn::ImplItemFn) -> OperationDeclaration {
    let name = method.sig.ident.to_string();
    let site = format!("operation `{}::{}`", type_name, name);

    let visibility = match &method.vis {
        syn::Visibility::Public(_) => Visibility::Public,
        syn::Visibility::Restricted(_) => Visibility::Restricted,
        syn::Visibility::Inherited => Visibility::Private,
    };
    let receiver = if method.sig.receiver().is_some() {
        Receiver::Instance
    } else {
        Receiver::Associated
    };

    let parameters = method
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => Some(pat_type),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(position, pat_type)| {
            // `#N` is never a Rust identifier, so it cannot shadow a real parameter
            let param_name = match pat_type.pat.as_ref() {
                Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
                _ => format!("#{}", position),
            };
            let param_site = format!("parameter `{}` of `{}::{}`", param_name, type_name, name);
            ParameterDeclaration {
                markers: parse_markers(&pat_type.attrs, MarkerTarget::Parameter, &param_site),
                name: param_name,
            }
        })
        .collect();

    OperationDeclaration {
        markers: parse_markers(&method.attrs, MarkerTarget::Operation, &site),
        return_markers: parse_return_markers(&method.attrs, &site),
        name,
        visibility,
        receiver,
        parameters,
    }
}
