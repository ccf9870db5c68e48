//! Stage 1: annotate every type declaration with its resolved name and
//! member names.
//!
//! The walk is depth-first pre-order over the *original* tree — the model
//! is bound to that tree, and resolving against rebuilt nodes is undefined.
//! Each type node is rebuilt carrying one `Type` annotation (the symbol's
//! simple name) and one `Type.Member` annotation per filtered member name,
//! attached before its children are visited. Non-type nodes pass through
//! structurally unchanged. A declaration that fails to resolve aborts the
//! whole unit; no partial output is ever produced for it.

use crate::ast::{Decl, DeclPath, Member, NamespaceDecl, SourceUnit, TypeDecl};
use crate::errors::GraftError;
use crate::semantics::SemanticModel;

/// Annotation category holding the type's simple name. Exactly one value
/// per annotated type.
pub const TYPE_CATEGORY: &str = "Type";

/// Annotation category holding one member name per value, in declaration
/// order.
pub const MEMBER_CATEGORY: &str = "Type.Member";

/// Runs Stage 1 on a unit, producing an isomorphic tree in which every type
/// declaration carries its name and member-name annotations.
pub fn annotate(unit: &SourceUnit, model: &dyn SemanticModel) -> Result<SourceUnit, GraftError> {
    let root = DeclPath::root();
    let decls = unit
        .decls
        .iter()
        .map(|decl| annotate_decl(decl, &root, model, &unit.path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SourceUnit {
        path: unit.path.clone(),
        usings: unit.usings.clone(),
        decls,
    })
}

fn annotate_decl(
    decl: &Decl,
    scope: &DeclPath,
    model: &dyn SemanticModel,
    unit_path: &str,
) -> Result<Decl, GraftError> {
    match decl {
        Decl::Namespace(ns) => {
            let path = scope.child(&ns.name);
            let decls = ns
                .decls
                .iter()
                .map(|child| annotate_decl(child, &path, model, unit_path))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Decl::Namespace(NamespaceDecl {
                name: ns.name.clone(),
                usings: ns.usings.clone(),
                decls,
                annotations: ns.annotations.clone(),
            }))
        }
        Decl::Type(ty) => annotate_type(ty, scope, model, unit_path).map(Decl::Type),
    }
}

fn annotate_type(
    ty: &TypeDecl,
    scope: &DeclPath,
    model: &dyn SemanticModel,
    unit_path: &str,
) -> Result<TypeDecl, GraftError> {
    let path = scope.child(&ty.name);
    let symbol = model
        .resolve(&path)
        .ok_or_else(|| GraftError::unresolved_type(&path, unit_path))?;

    // Attach before recursing: children annotate themselves independently.
    let mut annotations = ty.annotations.clone().with(TYPE_CATEGORY, &symbol.name);
    for member_name in symbol.member_names() {
        annotations = annotations.with(MEMBER_CATEGORY, member_name);
    }

    let members = ty
        .members
        .iter()
        .map(|member| match member {
            Member::Type(nested) => {
                annotate_type(nested, &path, model, unit_path).map(Member::Type)
            }
            other => Ok(other.clone()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TypeDecl {
        name: ty.name.clone(),
        modifiers: ty.modifiers.clone(),
        type_params: ty.type_params.clone(),
        members,
        annotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::{class, namespace, unit};
    use crate::ast::Modifier;
    use crate::errors::{ErrorCategory, ErrorKind};
    use crate::semantics::SourceModel;

    fn annotated_sample() -> SourceUnit {
        let source = unit("Demo.cs")
            .namespace(
                namespace("N").class(
                    class("C")
                        .public()
                        .partial()
                        .field(Modifier::Public, "int", "x")
                        .nested(class("D").private().partial()),
                ),
            )
            .build();
        let model = SourceModel::bind(&source);
        annotate(&source, &model).expect("annotation should succeed")
    }

    #[test]
    fn type_nodes_carry_name_and_member_annotations() {
        let annotated = annotated_sample();
        let ns = annotated.decls[0].as_namespace().unwrap();
        let c = ns.decls[0].as_type().unwrap();
        assert_eq!(c.annotations.values(TYPE_CATEGORY).collect::<Vec<_>>(), ["C"]);
        // Nested type D is a member symbol but not a nameable member name.
        assert_eq!(
            c.annotations.values(MEMBER_CATEGORY).collect::<Vec<_>>(),
            ["x"]
        );
    }

    #[test]
    fn nested_types_are_annotated_independently() {
        let annotated = annotated_sample();
        let ns = annotated.decls[0].as_namespace().unwrap();
        let c = ns.decls[0].as_type().unwrap();
        let d = c.nested_types().next().unwrap();
        assert_eq!(d.annotations.values(TYPE_CATEGORY).collect::<Vec<_>>(), ["D"]);
        assert_eq!(d.annotations.values(MEMBER_CATEGORY).count(), 0);
    }

    #[test]
    fn tree_shape_is_isomorphic_to_input() {
        let source = unit("Demo.cs")
            .namespace(
                namespace("N")
                    .class(class("C").partial().field(Modifier::Public, "int", "x"))
                    .class(class("E")),
            )
            .build();
        let model = SourceModel::bind(&source);
        let annotated = annotate(&source, &model).unwrap();
        let ns = annotated.decls[0].as_namespace().unwrap();
        assert_eq!(ns.decls.len(), 2);
        assert_eq!(ns.decls[1].name(), "E");
        let c = ns.decls[0].as_type().unwrap();
        assert_eq!(c.members.len(), 1);
    }

    #[test]
    fn unresolved_declaration_aborts_the_unit() {
        let source = unit("Demo.cs").class(class("C").partial()).build();
        // A model bound to a different tree cannot resolve C.
        let other = unit("Other.cs").class(class("X")).build();
        let model = SourceModel::bind(&other);
        let err = annotate(&source, &model).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Resolution);
        assert_eq!(
            err.kind,
            ErrorKind::UnresolvedType {
                path: "C".to_string()
            }
        );
        assert_eq!(err.unit.as_deref(), Some("Demo.cs"));
    }
}
