//! Symbol lookup: the seam between the pipeline and the host's semantic
//! resolution.
//!
//! The annotator never inspects member nodes itself; it asks a
//! [`SemanticModel`] for the declared symbol of each type and that symbol's
//! directly-declared members. Resolution is keyed by [`DeclPath`] against
//! the original, unmodified tree — a model is bound to exactly one tree and
//! asking it about a rebuilt tree is meaningless.
//!
//! [`SourceModel`] is the built-in implementation, deriving symbols from the
//! unit itself the way a single-file front-end would. Hosts with a real
//! compiler behind them implement [`SemanticModel`] instead.

use std::collections::HashMap;

use crate::ast::{Decl, DeclPath, Member, SourceUnit, TypeDecl};

// ============================================================================
// RESOLVED SYMBOLS
// ============================================================================

/// Kinds of member symbols a resolved type can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Field,
    Method,
    NestedType,
}

/// One member of a resolved type, before filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSymbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Whether the member can be referenced by its simple name.
    pub nameable: bool,
    /// Whether the compiler synthesized this member (default constructors,
    /// backing members, and the like).
    pub implicitly_declared: bool,
}

/// The semantic identity of a declared type: its simple name and its
/// directly-declared members in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSymbol {
    pub name: String,
    pub members: Vec<MemberSymbol>,
}

impl ResolvedSymbol {
    /// Member names the annotator records: not a nested type, referenceable
    /// by simple name, not implicitly declared. Declaration order is
    /// preserved; this method must never reorder.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter(|m| m.kind != SymbolKind::NestedType)
            .filter(|m| m.nameable)
            .filter(|m| !m.implicitly_declared)
            .map(|m| m.name.as_str())
    }
}

// ============================================================================
// MODEL SEAM
// ============================================================================

/// The host's semantic-resolution capability, read-only for the duration of
/// a pipeline run.
pub trait SemanticModel {
    /// Resolves the type declaration at `path` in the tree this model is
    /// bound to. `None` means the declaration has no corresponding symbol;
    /// the pipeline treats that as fatal for the unit.
    fn resolve(&self, path: &DeclPath) -> Option<ResolvedSymbol>;
}

// ============================================================================
// BUILT-IN MODEL
// ============================================================================

/// A semantic model derived from one source unit by symbol-table
/// construction over its original tree.
#[derive(Debug, Clone)]
pub struct SourceModel {
    symbols: HashMap<DeclPath, ResolvedSymbol>,
}

impl SourceModel {
    /// Binds a model to `unit`. Must be called on the tree that will be
    /// annotated, before any stage rebuilds it.
    pub fn bind(unit: &SourceUnit) -> Self {
        let mut symbols = HashMap::new();
        let root = DeclPath::root();
        for decl in &unit.decls {
            index_decl(decl, &root, &mut symbols);
        }
        Self { symbols }
    }

    /// Number of type declarations the model indexed.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }
}

impl SemanticModel for SourceModel {
    fn resolve(&self, path: &DeclPath) -> Option<ResolvedSymbol> {
        self.symbols.get(path).cloned()
    }
}

fn index_decl(decl: &Decl, scope: &DeclPath, symbols: &mut HashMap<DeclPath, ResolvedSymbol>) {
    match decl {
        Decl::Namespace(ns) => {
            let path = scope.child(&ns.name);
            for child in &ns.decls {
                index_decl(child, &path, symbols);
            }
        }
        Decl::Type(ty) => index_type(ty, scope, symbols),
    }
}

fn index_type(ty: &TypeDecl, scope: &DeclPath, symbols: &mut HashMap<DeclPath, ResolvedSymbol>) {
    let path = scope.child(&ty.name);
    let members = ty.members.iter().map(member_symbol).collect();
    symbols.insert(
        path.clone(),
        ResolvedSymbol {
            name: ty.name.clone(),
            members,
        },
    );
    for nested in ty.nested_types() {
        index_type(nested, &path, symbols);
    }
}

fn member_symbol(member: &Member) -> MemberSymbol {
    let kind = match member {
        Member::Type(_) => SymbolKind::NestedType,
        Member::Field(_) => SymbolKind::Field,
        Member::Method(_) => SymbolKind::Method,
    };
    MemberSymbol {
        name: member.name().to_string(),
        kind,
        nameable: true,
        implicitly_declared: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::{class, namespace, unit};
    use crate::ast::Modifier;

    fn sample_unit() -> SourceUnit {
        unit("Demo.cs")
            .namespace(
                namespace("N").class(
                    class("C")
                        .public()
                        .partial()
                        .field(Modifier::Public, "int", "x")
                        .method(Modifier::Public, "void", "Run")
                        .nested(class("D").private().partial()),
                ),
            )
            .build()
    }

    #[test]
    fn bind_indexes_types_at_every_depth() {
        let model = SourceModel::bind(&sample_unit());
        assert_eq!(model.symbol_count(), 2);
        let c = model.resolve(&DeclPath::root().child("N").child("C")).unwrap();
        assert_eq!(c.name, "C");
        let d = model
            .resolve(&DeclPath::root().child("N").child("C").child("D"))
            .unwrap();
        assert_eq!(d.name, "D");
        assert!(d.members.is_empty());
    }

    #[test]
    fn member_names_exclude_nested_types_and_keep_order() {
        let model = SourceModel::bind(&sample_unit());
        let c = model.resolve(&DeclPath::root().child("N").child("C")).unwrap();
        assert_eq!(c.members.len(), 3);
        let names: Vec<_> = c.member_names().collect();
        assert_eq!(names, ["x", "Run"]);
    }

    #[test]
    fn member_names_drop_unnameable_and_implicit_symbols() {
        let symbol = ResolvedSymbol {
            name: "C".to_string(),
            members: vec![
                MemberSymbol {
                    name: "x".to_string(),
                    kind: SymbolKind::Field,
                    nameable: true,
                    implicitly_declared: false,
                },
                MemberSymbol {
                    name: "this[]".to_string(),
                    kind: SymbolKind::Method,
                    nameable: false,
                    implicitly_declared: false,
                },
                MemberSymbol {
                    name: ".ctor".to_string(),
                    kind: SymbolKind::Method,
                    nameable: true,
                    implicitly_declared: true,
                },
            ],
        };
        assert_eq!(symbol.member_names().collect::<Vec<_>>(), ["x"]);
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        let model = SourceModel::bind(&sample_unit());
        assert!(model.resolve(&DeclPath::root().child("Missing")).is_none());
    }
}
