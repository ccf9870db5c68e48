//! Annotation model: (category, value) metadata attached to declaration
//! nodes, surviving tree reconstruction.
//!
//! Later stages depend entirely on annotations produced by earlier stages,
//! and every stage rebuilds the nodes it touches. Annotations are therefore
//! an explicit field threaded through reconstruction, never side state keyed
//! by node identity. A stage that rebuilds an annotated node into a
//! structurally different shell must call [`Annotations::copy_forward_to`]
//! on the rebuilt node or all upstream metadata is silently lost.

use serde::{Deserialize, Serialize};

/// One (category, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub category: String,
    pub value: String,
}

/// An ordered annotation set. Order is attachment order and is significant:
/// member-name annotations are queried back in the order the resolver
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    /// Returns this set extended with one more (category, value) pair.
    /// Prior annotations are preserved.
    pub fn with(mut self, category: &str, value: &str) -> Self {
        self.0.push(Annotation {
            category: category.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// All values recorded under `category`, in attachment order. Empty if
    /// the category was never attached.
    pub fn values<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |a| a.category == category)
            .map(|a| a.value.as_str())
    }

    /// Returns `dest` extended so it carries at least as many occurrences
    /// of each (category, value) pair as `self` does. Duplicate pairs are
    /// meaningful — overloaded members annotate the same name once per
    /// declaration — so the merge counts occurrences instead of treating
    /// the set as unique. Idempotent: re-applying adds nothing new.
    pub fn copy_forward_to(&self, mut dest: Annotations) -> Annotations {
        for (index, annotation) in self.0.iter().enumerate() {
            let needed = self.0[..=index].iter().filter(|a| *a == annotation).count();
            let have = dest.0.iter().filter(|a| *a == annotation).count();
            if have < needed {
                dest.0.push(annotation.clone());
            }
        }
        dest
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
