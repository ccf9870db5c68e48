//! Fluent construction helpers for declaration trees.
//!
//! Hosts without a serialized unit on disk (and the test suite) assemble
//! trees through these builders rather than filling struct literals. Each
//! builder is consumed by `build` and produces an unannotated node; the
//! pipeline attaches all metadata itself.

use crate::annotations::Annotations;
use crate::ast::{
    Decl, FieldDecl, Member, MethodBody, MethodDecl, Modifier, Modifiers, NamespaceDecl,
    SourceUnit, TypeDecl,
};

/// Starts a source unit rooted at `path`.
pub fn unit(path: &str) -> UnitBuilder {
    UnitBuilder {
        path: path.to_string(),
        usings: Vec::new(),
        decls: Vec::new(),
    }
}

/// Starts a namespace declaration.
pub fn namespace(name: &str) -> NamespaceBuilder {
    NamespaceBuilder {
        name: name.to_string(),
        usings: Vec::new(),
        decls: Vec::new(),
    }
}

/// Starts a class declaration with no modifiers.
pub fn class(name: &str) -> TypeBuilder {
    TypeBuilder {
        name: name.to_string(),
        modifiers: Vec::new(),
        type_params: Vec::new(),
        members: Vec::new(),
    }
}

#[derive(Debug)]
pub struct UnitBuilder {
    path: String,
    usings: Vec<String>,
    decls: Vec<Decl>,
}

impl UnitBuilder {
    pub fn using(mut self, directive: &str) -> Self {
        self.usings.push(directive.to_string());
        self
    }

    pub fn namespace(mut self, ns: NamespaceBuilder) -> Self {
        self.decls.push(Decl::Namespace(ns.build()));
        self
    }

    pub fn class(mut self, ty: TypeBuilder) -> Self {
        self.decls.push(Decl::Type(ty.build()));
        self
    }

    pub fn build(self) -> SourceUnit {
        SourceUnit {
            path: self.path,
            usings: self.usings,
            decls: self.decls,
        }
    }
}

#[derive(Debug)]
pub struct NamespaceBuilder {
    name: String,
    usings: Vec<String>,
    decls: Vec<Decl>,
}

impl NamespaceBuilder {
    pub fn using(mut self, directive: &str) -> Self {
        self.usings.push(directive.to_string());
        self
    }

    pub fn namespace(mut self, ns: NamespaceBuilder) -> Self {
        self.decls.push(Decl::Namespace(ns.build()));
        self
    }

    pub fn class(mut self, ty: TypeBuilder) -> Self {
        self.decls.push(Decl::Type(ty.build()));
        self
    }

    pub fn build(self) -> NamespaceDecl {
        NamespaceDecl {
            name: self.name,
            usings: self.usings,
            decls: self.decls,
            annotations: Annotations::default(),
        }
    }
}

#[derive(Debug)]
pub struct TypeBuilder {
    name: String,
    modifiers: Vec<Modifier>,
    type_params: Vec<String>,
    members: Vec<Member>,
}

impl TypeBuilder {
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn public(self) -> Self {
        self.modifier(Modifier::Public)
    }

    pub fn private(self) -> Self {
        self.modifier(Modifier::Private)
    }

    pub fn internal(self) -> Self {
        self.modifier(Modifier::Internal)
    }

    pub fn partial(self) -> Self {
        self.modifier(Modifier::Partial)
    }

    pub fn static_(self) -> Self {
        self.modifier(Modifier::Static)
    }

    pub fn type_param(mut self, name: &str) -> Self {
        self.type_params.push(name.to_string());
        self
    }

    pub fn field(mut self, visibility: Modifier, ty: &str, name: &str) -> Self {
        self.members.push(Member::Field(FieldDecl {
            modifiers: Modifiers::new(vec![visibility]),
            ty: ty.to_string(),
            name: name.to_string(),
        }));
        self
    }

    pub fn method(mut self, visibility: Modifier, return_type: &str, name: &str) -> Self {
        self.members.push(Member::Method(MethodDecl {
            modifiers: Modifiers::new(vec![visibility]),
            return_type: return_type.to_string(),
            name: name.to_string(),
            body: MethodBody::Empty,
        }));
        self
    }

    pub fn nested(mut self, ty: TypeBuilder) -> Self {
        self.members.push(Member::Type(ty.build()));
        self
    }

    pub fn build(self) -> TypeDecl {
        TypeDecl {
            name: self.name,
            modifiers: Modifiers::new(self.modifiers),
            type_params: self.type_params,
            members: self.members,
            annotations: Annotations::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_structure_in_declaration_order() {
        let unit = unit("Demo.cs")
            .using("System")
            .namespace(
                namespace("N")
                    .class(class("C").public().partial().field(Modifier::Public, "int", "x"))
                    .class(class("E").public()),
            )
            .build();

        assert_eq!(unit.usings, ["System"]);
        let ns = unit.decls[0].as_namespace().unwrap();
        assert_eq!(ns.name, "N");
        assert_eq!(ns.decls.len(), 2);
        let c = ns.decls[0].as_type().unwrap();
        assert!(c.is_partial());
        assert_eq!(c.members[0].name(), "x");
        assert!(!ns.decls[1].as_type().unwrap().is_partial());
    }

    #[test]
    fn built_nodes_start_unannotated() {
        let ty = class("C").partial().nested(class("D").private().partial()).build();
        assert!(ty.annotations.is_empty());
        assert!(ty.nested_types().next().unwrap().annotations.is_empty());
    }
}
