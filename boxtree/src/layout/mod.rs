//! Layout runs on an element once it's closed, so its children are final
//! and, for nested containers, already laid out.

pub mod flex;

use crate::dom::{Document, NodeId};
use crate::style::Display;

/// Lays out the children of `id` according to its `display` value.
///
/// Only flex containers position their children; everything else keeps the
/// sizes it got from the cascade.
pub fn layout_node(document: &mut Document, id: NodeId) {
    let display = match document.element(id) {
        Some(element) => element.computed_style.display(),
        None => return,
    };
    match display {
        Display::Flex => flex::layout(document, id),
        Display::None | Display::Block | Display::Inline => {}
    }
}
