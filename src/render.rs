//! Normalized textual rendering of a declaration tree.
//!
//! Output is deterministic: four-space indentation, braces on their own
//! lines, one blank-free run of declarations. The pipeline emits this text
//! as the generated compilation input; no attempt is made to preserve the
//! original file's formatting.

use std::fmt::Write;

use crate::ast::{Decl, Member, MethodBody, Modifiers, NamespaceDecl, SourceUnit, TypeDecl};

const INDENT: &str = "    ";

/// Renders a full unit to source text.
pub fn render_unit(unit: &SourceUnit) -> String {
    let mut out = String::new();
    render_usings(&mut out, &unit.usings, 0);
    for decl in &unit.decls {
        render_decl(&mut out, decl, 0);
    }
    out
}

fn render_decl(out: &mut String, decl: &Decl, level: usize) {
    match decl {
        Decl::Namespace(ns) => render_namespace(out, ns, level),
        Decl::Type(ty) => render_type(out, ty, level),
    }
}

fn render_namespace(out: &mut String, ns: &NamespaceDecl, level: usize) {
    line(out, level, &format!("namespace {}", ns.name));
    line(out, level, "{");
    render_usings(out, &ns.usings, level + 1);
    for decl in &ns.decls {
        render_decl(out, decl, level + 1);
    }
    line(out, level, "}");
}

fn render_type(out: &mut String, ty: &TypeDecl, level: usize) {
    let mut header = String::new();
    push_modifiers(&mut header, &ty.modifiers);
    header.push_str("class ");
    header.push_str(&ty.name);
    if !ty.type_params.is_empty() {
        let _ = write!(header, "<{}>", ty.type_params.join(", "));
    }
    line(out, level, &header);
    line(out, level, "{");
    for member in &ty.members {
        render_member(out, member, level + 1);
    }
    line(out, level, "}");
}

fn render_member(out: &mut String, member: &Member, level: usize) {
    match member {
        Member::Type(ty) => render_type(out, ty, level),
        Member::Field(field) => {
            let mut text = String::new();
            push_modifiers(&mut text, &field.modifiers);
            let _ = write!(text, "{} {};", field.ty, field.name);
            line(out, level, &text);
        }
        Member::Method(method) => {
            let mut header = String::new();
            push_modifiers(&mut header, &method.modifiers);
            let _ = write!(header, "{} {}()", method.return_type, method.name);
            line(out, level, &header);
            line(out, level, "{");
            match &method.body {
                MethodBody::Empty => {}
                MethodBody::ReturnStr(text) => {
                    line(out, level + 1, &format!("return \"{}\";", escape(text)));
                }
            }
            line(out, level, "}");
        }
    }
}

fn render_usings(out: &mut String, usings: &[String], level: usize) {
    for using in usings {
        line(out, level, &format!("using {};", using));
    }
}

fn push_modifiers(out: &mut String, modifiers: &Modifiers) {
    for modifier in modifiers.iter() {
        out.push_str(modifier.keyword());
        out.push(' ');
    }
}

fn line(out: &mut String, level: usize, text: &str) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

// Host-supplied bodies may contain anything, so control characters get the
// C#-style escapes and the rest fall back to \uXXXX.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
