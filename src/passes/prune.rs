//! Stage 2: rebuild every scope keeping only partial type declarations.
//!
//! At the file and namespace levels, namespaces always survive and directly
//! nested types survive only when declared partial. At the type level, only
//! nested partial types survive; fields and methods are dropped entirely —
//! the synthesizer repopulates survivors from annotations, not from member
//! nodes. Pruning a non-partial type loses everything beneath it, including
//! its own partial descendants; that is the filter's contract.
//!
//! Every rebuilt node copies the corresponding pre-filter node's annotations
//! forward. This is the single most error-prone step in the pipeline:
//! forgetting it silently discards all stage-1 metadata and Stage 3 will
//! refuse to run.

use crate::annotations::Annotations;
use crate::ast::{Decl, Member, NamespaceDecl, SourceUnit, TypeDecl};

/// Runs Stage 2 on an annotated unit. Infallible: pruning can only narrow
/// the tree.
pub fn prune(unit: &SourceUnit) -> SourceUnit {
    SourceUnit {
        path: unit.path.clone(),
        usings: unit.usings.clone(),
        decls: unit.decls.iter().filter_map(prune_decl).collect(),
    }
}

fn prune_decl(decl: &Decl) -> Option<Decl> {
    match decl {
        Decl::Namespace(ns) => Some(Decl::Namespace(prune_namespace(ns))),
        Decl::Type(ty) if ty.is_partial() => Some(Decl::Type(prune_type(ty))),
        Decl::Type(_) => None,
    }
}

fn prune_namespace(ns: &NamespaceDecl) -> NamespaceDecl {
    NamespaceDecl {
        name: ns.name.clone(),
        usings: ns.usings.clone(),
        decls: ns.decls.iter().filter_map(prune_decl).collect(),
        annotations: ns.annotations.copy_forward_to(Annotations::default()),
    }
}

fn prune_type(ty: &TypeDecl) -> TypeDecl {
    let members = ty
        .members
        .iter()
        .filter_map(|member| match member {
            Member::Type(nested) if nested.is_partial() => {
                Some(Member::Type(prune_type(nested)))
            }
            _ => None,
        })
        .collect();
    TypeDecl {
        name: ty.name.clone(),
        modifiers: ty.modifiers.clone(),
        type_params: ty.type_params.clone(),
        members,
        annotations: ty.annotations.copy_forward_to(Annotations::default()),
    }
}
