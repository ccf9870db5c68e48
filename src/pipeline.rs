//! The pipeline driver: stages 1→3 in sequence over one source unit.
//!
//! Each unit is an independent, side-effect-free transformation: the caller
//! may process many units in parallel with no coordination here. The stages
//! within one unit are strictly sequential — pruning needs the annotations,
//! synthesis needs the pruned tree.

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::ast::SourceUnit;
use crate::errors::GraftError;
use crate::passes::{annotate, prune, synthesize};
use crate::render::render_unit;
use crate::semantics::SemanticModel;

/// One generated compilation input: a collision-resistant name and the
/// rendered source text.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSource {
    pub name: String,
    pub text: String,
}

/// Runs the full pipeline on one unit.
///
/// Returns `Ok(None)` when the resulting tree contains no type declaration
/// at all — nothing to contribute, the unit is silently skipped. An
/// unresolved declaration aborts this unit only; no partial output is ever
/// produced.
pub fn run_unit(
    unit: &SourceUnit,
    model: &dyn SemanticModel,
) -> Result<Option<GeneratedSource>, GraftError> {
    let annotated = annotate(unit, model)?;
    let pruned = prune(&annotated);
    let synthesized = synthesize(&pruned)?;

    if !synthesized.contains_type() {
        return Ok(None);
    }

    Ok(Some(GeneratedSource {
        name: generated_name(unit),
        text: render_unit(&synthesized),
    }))
}

/// Entry point for hosts whose resolution context may be absent. A missing
/// model is a fatal configuration error for the whole run, distinct from a
/// per-unit resolution failure.
pub fn run_unit_with(
    unit: &SourceUnit,
    model: Option<&dyn SemanticModel>,
) -> Result<Option<GeneratedSource>, GraftError> {
    let model = model.ok_or_else(GraftError::missing_model)?;
    run_unit(unit, model)
}

/// The generated name for a unit: `{base-name}.Generated.{token}`.
pub fn generated_name(unit: &SourceUnit) -> String {
    format!("{}.Generated.{}", unit.base_name(), unique_token(&unit.path))
}

// The token is a truncated digest over the origin path rather than a fresh
// GUID: still collision-resistant across same-named files in different
// directories, but deterministic for a given input.
fn unique_token(path: &str) -> String {
    let digest = Sha256::digest(path.as_bytes());
    let mut token = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        let _ = write!(token, "{byte:02x}");
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::{class, unit};
    use crate::semantics::SourceModel;

    #[test]
    fn token_is_deterministic_and_path_sensitive() {
        let a = unique_token("src/App.cs");
        assert_eq!(a, unique_token("src/App.cs"));
        assert_ne!(a, unique_token("lib/App.cs"));
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_name_uses_the_base_name() {
        let source = unit("src/App.cs").build();
        let name = generated_name(&source);
        assert!(name.starts_with("App.Generated."));
    }

    #[test]
    fn missing_model_is_a_fatal_configuration_error() {
        let source = unit("Demo.cs").class(class("C").partial()).build();
        let err = run_unit_with(&source, None).unwrap_err();
        assert!(err.is_fatal_to_run());
    }

    #[test]
    fn run_unit_with_delegates_when_a_model_is_present() {
        let source = unit("Demo.cs").class(class("C").public().partial()).build();
        let model = SourceModel::bind(&source);
        let generated = run_unit_with(&source, Some(&model)).unwrap();
        assert!(generated.is_some());
    }

    #[test]
    fn unit_without_surviving_types_is_discarded() {
        let source = unit("Demo.cs").class(class("C").public()).build();
        let model = SourceModel::bind(&source);
        assert_eq!(run_unit(&source, &model).unwrap(), None);
    }

    #[test]
    fn surviving_types_produce_rendered_output() {
        let source = unit("Demo.cs").class(class("C").public().partial()).build();
        let model = SourceModel::bind(&source);
        let generated = run_unit(&source, &model).unwrap().expect("output expected");
        assert!(generated.name.starts_with("Demo.Generated."));
        assert!(generated.text.contains("public partial class C"));
        assert!(generated.text.contains("return \"Type: C\";"));
    }
}
