//! Declaration-tree model for the graft pipeline.
//!
//! This module provides the core tree types for representing one parsed
//! source file: namespaces, type declarations, and their members. The node
//! kinds form a closed set, so every pipeline stage dispatches over a tagged
//! union rather than an open visitor.
//!
//! Nodes are immutable once constructed: a stage that changes a node builds
//! a new one and may share unchanged children. Annotations are an explicit
//! field on each declaration node and must be carried forward whenever a
//! node is rebuilt (see [`crate::annotations`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::annotations::Annotations;

// ============================================================================
// SOURCE UNIT
// ============================================================================

/// The root of one parsed file: its origin path, using directives, and
/// top-level declarations in source order.
///
/// Units are produced by an external front-end (or the [`builder`] API),
/// consumed by one pipeline invocation, and replaced by the synthesized
/// output or discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub path: String,
    pub usings: Vec<String>,
    pub decls: Vec<Decl>,
}

impl SourceUnit {
    /// The file stem of the origin path, used to derive the generated name.
    pub fn base_name(&self) -> &str {
        let file = self
            .path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.path.as_str());
        match file.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file,
        }
    }

    /// True if any type declaration exists at any depth. The pipeline
    /// discards units for which this is false after the final stage.
    pub fn contains_type(&self) -> bool {
        self.decls.iter().any(Decl::contains_type)
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// A top-level or namespace-level declaration. The set of kinds is fixed;
/// stages match on this enum directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decl {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Namespace(ns) => &ns.name,
            Decl::Type(ty) => &ty.name,
        }
    }

    pub fn as_type(&self) -> Option<&TypeDecl> {
        match self {
            Decl::Type(ty) => Some(ty),
            Decl::Namespace(_) => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&NamespaceDecl> {
        match self {
            Decl::Namespace(ns) => Some(ns),
            Decl::Type(_) => None,
        }
    }

    fn contains_type(&self) -> bool {
        match self {
            Decl::Type(_) => true,
            Decl::Namespace(ns) => ns.decls.iter().any(Decl::contains_type),
        }
    }
}

/// A namespace declaration. Namespaces are never filtered out by the
/// pipeline; only the types directly inside them are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    pub name: String,
    pub usings: Vec<String>,
    pub decls: Vec<Decl>,
    #[serde(default)]
    pub annotations: Annotations,
}

/// A type (class) declaration with its modifiers, generic parameters, and
/// directly-declared members in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub modifiers: Modifiers,
    pub type_params: Vec<String>,
    pub members: Vec<Member>,
    #[serde(default)]
    pub annotations: Annotations,
}

impl TypeDecl {
    pub fn is_partial(&self) -> bool {
        self.modifiers.contains(Modifier::Partial)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifier::Static)
    }

    /// Directly-nested type declarations, in member order.
    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members.iter().filter_map(Member::as_type)
    }
}

// ============================================================================
// MEMBERS
// ============================================================================

/// A member declared directly inside a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Type(TypeDecl),
    Field(FieldDecl),
    Method(MethodDecl),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Type(ty) => &ty.name,
            Member::Field(f) => &f.name,
            Member::Method(m) => &m.name,
        }
    }

    pub fn as_type(&self) -> Option<&TypeDecl> {
        match self {
            Member::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDecl> {
        match self {
            Member::Method(m) => Some(m),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub modifiers: Modifiers,
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub return_type: String,
    pub name: String,
    pub body: MethodBody,
}

/// Method bodies stay minimal: the pipeline only ever synthesizes a single
/// return-a-string-literal body, and host-supplied bodies are opaque to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MethodBody {
    Empty,
    ReturnStr(String),
}

// ============================================================================
// MODIFIERS
// ============================================================================

/// Structural flags on a declaration. `Partial` is the filter stage's sole
/// retention criterion; `Static` suppresses member synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    Public,
    Private,
    Internal,
    Protected,
    Static,
    Partial,
}

impl Modifier {
    pub const fn keyword(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Internal => "internal",
            Modifier::Protected => "protected",
            Modifier::Static => "static",
            Modifier::Partial => "partial",
        }
    }
}

/// An ordered modifier list, preserved verbatim through every rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers(Vec<Modifier>);

impl Modifiers {
    pub fn new(modifiers: Vec<Modifier>) -> Self {
        Self(modifiers)
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }
}

// ============================================================================
// DECLARATION PATHS
// ============================================================================

/// A stable key for a declaration: the simple names of its enclosing scopes
/// from the unit root down, e.g. `N.C.D` for a type `D` nested in `C` inside
/// namespace `N`.
///
/// Symbol resolution is keyed by these paths against the *original* tree, so
/// stages that rebuild nodes never depend on node identity surviving the
/// rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclPath(Vec<String>);

impl DeclPath {
    /// The unit root, enclosing all top-level declarations.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// The path of a declaration named `name` inside this scope.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for DeclPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

// ============================================================================
// MODULE EXPORTS
// ============================================================================

pub mod builder;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_directory_and_extension() {
        let unit = SourceUnit {
            path: "src/app/Program.cs".to_string(),
            usings: vec![],
            decls: vec![],
        };
        assert_eq!(unit.base_name(), "Program");
    }

    #[test]
    fn base_name_handles_extensionless_paths() {
        let unit = SourceUnit {
            path: "Program".to_string(),
            usings: vec![],
            decls: vec![],
        };
        assert_eq!(unit.base_name(), "Program");
    }

    #[test]
    fn contains_type_sees_through_nested_namespaces() {
        let unit = SourceUnit {
            path: "a.cs".to_string(),
            usings: vec![],
            decls: vec![Decl::Namespace(NamespaceDecl {
                name: "Outer".to_string(),
                usings: vec![],
                decls: vec![Decl::Namespace(NamespaceDecl {
                    name: "Inner".to_string(),
                    usings: vec![],
                    decls: vec![Decl::Type(TypeDecl {
                        name: "C".to_string(),
                        modifiers: Modifiers::default(),
                        type_params: vec![],
                        members: vec![],
                        annotations: Annotations::default(),
                    })],
                    annotations: Annotations::default(),
                })],
                annotations: Annotations::default(),
            })],
        };
        assert!(unit.contains_type());
    }

    #[test]
    fn decl_path_display_joins_segments() {
        let path = DeclPath::root().child("N").child("C");
        assert_eq!(path.to_string(), "N.C");
        assert_eq!(path.segments(), ["N".to_string(), "C".to_string()]);
    }
}
