//! The three rewriting stages of the pipeline.
//!
//! Data flows strictly one direction: original tree → annotated tree →
//! pruned tree → synthesized tree. Each stage fully rebuilds the tree it
//! touches; no stage mutates state owned by another, and no stage starts
//! before the previous one's reconstruction completes.

pub mod annotate;
pub mod prune;
pub mod synthesize;

pub use annotate::{annotate, MEMBER_CATEGORY, TYPE_CATEGORY};
pub use prune::prune;
pub use synthesize::{synthesize, SYNTHESIZED_METHOD};
