//! Stage 3: inject a synthesized member into every surviving non-static
//! type.
//!
//! The member is a `public string MyToString()` method whose body returns a
//! description built from the stage-1 annotations: the type's name, and its
//! member names in their original declaration order. Static types are
//! skipped (their nested types are still visited). A surviving type without
//! exactly one `Type` annotation means earlier-stage metadata was lost or
//! duplicated; that is an internal-consistency fault, not a user error.

use crate::ast::{Decl, Member, MethodBody, MethodDecl, Modifier, Modifiers, SourceUnit, TypeDecl};
use crate::errors::GraftError;
use crate::passes::annotate::{MEMBER_CATEGORY, TYPE_CATEGORY};

/// Name of the method appended to every surviving non-static type.
pub const SYNTHESIZED_METHOD: &str = "MyToString";

/// Runs Stage 3 on a pruned unit.
pub fn synthesize(unit: &SourceUnit) -> Result<SourceUnit, GraftError> {
    let decls = unit
        .decls
        .iter()
        .map(|decl| synthesize_decl(decl, &unit.path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SourceUnit {
        path: unit.path.clone(),
        usings: unit.usings.clone(),
        decls,
    })
}

fn synthesize_decl(decl: &Decl, unit_path: &str) -> Result<Decl, GraftError> {
    match decl {
        Decl::Namespace(ns) => {
            let mut rebuilt = ns.clone();
            rebuilt.decls = ns
                .decls
                .iter()
                .map(|child| synthesize_decl(child, unit_path))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Decl::Namespace(rebuilt))
        }
        Decl::Type(ty) => synthesize_type(ty, unit_path).map(Decl::Type),
    }
}

fn synthesize_type(ty: &TypeDecl, unit_path: &str) -> Result<TypeDecl, GraftError> {
    let mut members = ty
        .members
        .iter()
        .map(|member| match member {
            Member::Type(nested) => synthesize_type(nested, unit_path).map(Member::Type),
            other => Ok(other.clone()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if !ty.is_static() {
        let type_name = single_type_annotation(ty, unit_path)?;
        let member_names: Vec<&str> = ty.annotations.values(MEMBER_CATEGORY).collect();
        members.push(Member::Method(describe_method(type_name, &member_names)));
    }

    Ok(TypeDecl {
        name: ty.name.clone(),
        modifiers: ty.modifiers.clone(),
        type_params: ty.type_params.clone(),
        members,
        annotations: ty.annotations.clone(),
    })
}

/// Reads the `Type` annotation, which must have exactly one value.
fn single_type_annotation<'a>(ty: &'a TypeDecl, unit_path: &str) -> Result<&'a str, GraftError> {
    let found = ty.annotations.values(TYPE_CATEGORY).count();
    let mut values = ty.annotations.values(TYPE_CATEGORY);
    match (values.next(), values.next()) {
        (Some(name), None) => Ok(name),
        _ => Err(GraftError::malformed_annotations(
            TYPE_CATEGORY,
            &ty.name,
            found,
            unit_path,
        )),
    }
}

fn describe_method(type_name: &str, member_names: &[&str]) -> MethodDecl {
    MethodDecl {
        modifiers: Modifiers::new(vec![Modifier::Public]),
        return_type: "string".to_string(),
        name: SYNTHESIZED_METHOD.to_string(),
        body: MethodBody::ReturnStr(description(type_name, member_names)),
    }
}

/// The description string returned by the synthesized method.
pub fn description(type_name: &str, member_names: &[&str]) -> String {
    if member_names.is_empty() {
        format!("Type: {}", type_name)
    } else {
        format!("Type: {}, Members - {}", type_name, member_names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::Annotations;
    use crate::ast::builder::class;
    use crate::errors::ErrorCategory;

    fn annotated(ty: TypeDecl, name: &str, members: &[&str]) -> TypeDecl {
        let mut annotations = Annotations::default().with(TYPE_CATEGORY, name);
        for member in members {
            annotations = annotations.with(MEMBER_CATEGORY, member);
        }
        TypeDecl { annotations, ..ty }
    }

    #[test]
    fn description_formats_match_contract() {
        assert_eq!(description("Foo", &[]), "Type: Foo");
        assert_eq!(description("Foo", &["bar", "baz"]), "Type: Foo, Members - bar, baz");
    }

    #[test]
    fn non_static_types_gain_the_method() {
        let ty = annotated(class("C").partial().build(), "C", &["x"]);
        let result = synthesize_type(&ty, "Demo.cs").unwrap();
        assert_eq!(result.members.len(), 1);
        let method = result.members[0].as_method().unwrap();
        assert_eq!(method.name, SYNTHESIZED_METHOD);
        assert_eq!(method.return_type, "string");
        assert_eq!(
            method.body,
            MethodBody::ReturnStr("Type: C, Members - x".to_string())
        );
    }

    #[test]
    fn static_types_are_skipped_but_children_are_visited() {
        let nested = annotated(class("D").partial().build(), "D", &[]);
        let mut outer = annotated(class("P").static_().partial().build(), "P", &[]);
        outer.members.push(crate::ast::Member::Type(nested));
        let result = synthesize_type(&outer, "Demo.cs").unwrap();

        // Outer static type: nested type only, no synthesized method.
        assert_eq!(result.members.len(), 1);
        let d = result.members[0].as_type().unwrap();
        let method = d.members[0].as_method().unwrap();
        assert_eq!(method.body, MethodBody::ReturnStr("Type: D".to_string()));
    }

    #[test]
    fn missing_type_annotation_is_an_internal_fault() {
        let bare = class("C").partial().build();
        let err = synthesize_type(&bare, "Demo.cs").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn synthesized_method_is_appended_after_nested_types() {
        let nested = annotated(class("D").partial().build(), "D", &[]);
        let mut c = annotated(class("C").partial().build(), "C", &["x"]);
        c.members.push(crate::ast::Member::Type(nested));
        let result = synthesize_type(&c, "Demo.cs").unwrap();
        assert_eq!(result.members.len(), 2);
        assert_eq!(result.members[0].name(), "D");
        assert_eq!(result.members[1].name(), SYNTHESIZED_METHOD);
    }
}
