//! Selectors – the small query language the edit operations use to find
//! their targets.
//!
//! Only the three shapes the report edits need are supported: a tag name,
//! a CSS class, and a direct-child combinator between two tags
//! (`center > h3`). Matches are always returned in document order.

use std::fmt;

use crate::dom::{Document, NodeId, Tag};

/// A declarative node query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Elements with the given tag (`h2`).
    Tag(Tag),
    /// Elements carrying the given class (`.data-table`).
    Class(String),
    /// `child` elements whose parent is a `parent` element (`center > h3`).
    Child { parent: Tag, child: Tag },
}

impl Selector {
    pub fn tag(tag: Tag) -> Self {
        Selector::Tag(tag)
    }

    pub fn class(class: &str) -> Self {
        Selector::Class(class.to_string())
    }

    pub fn child(parent: Tag, child: Tag) -> Self {
        Selector::Child { parent, child }
    }

    /// Whether `id` satisfies this selector.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(element) = doc.element(id) else {
            return false;
        };
        match self {
            Selector::Tag(tag) => &element.tag == tag,
            Selector::Class(class) => element.has_class(class),
            Selector::Child { parent, child } => {
                &element.tag == child
                    && doc
                        .parent(id)
                        .and_then(|p| doc.tag(p))
                        .is_some_and(|t| t == parent)
            }
        }
    }

    /// Every attached match, in document order.
    pub fn select_all(&self, doc: &Document) -> Vec<NodeId> {
        doc.descendants(doc.root())
            .into_iter()
            .filter(|&n| self.matches(doc, n))
            .collect()
    }

    /// The first attached match in document order.
    pub fn select_first(&self, doc: &Document) -> Option<NodeId> {
        doc.descendants(doc.root())
            .into_iter()
            .find(|&n| self.matches(doc, n))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => write!(f, "{}", tag.as_str()),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Child { parent, child } => {
                write!(f, "{} > {}", parent.as_str(), child.as_str())
            }
        }
    }
}
