//! Depth-first traversal over a parsed markup tree.
//!
//! Uses an explicit work stack instead of recursion so pathological nesting
//! cannot exhaust the call stack. Visitation order is pre-order: a node is
//! visited before its children, children left to right.

use ego_tree::NodeRef;
use scraper::Node;

/// What the walker should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Continue into this node's children.
    Descend,
    /// Skip this node's children but keep walking the rest of the tree.
    Prune,
    /// Abandon the walk entirely.
    Stop,
}

/// Comment, doctype and processing-instruction nodes are never visited or
/// descended into.
fn is_skipped(node: &Node) -> bool {
    matches!(node, Node::Comment(_) | Node::Doctype(_) | Node::ProcessingInstruction(_))
}

/// Walk the subtree rooted at `start`, calling `visit` on every node in
/// pre-order.
pub fn walk<'a, F>(start: NodeRef<'a, Node>, mut visit: F)
where
    F: FnMut(NodeRef<'a, Node>) -> Visit,
{
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if is_skipped(node.value()) {
            continue;
        }

        match visit(node) {
            Visit::Descend => stack.extend(node.children().rev()),
            Visit::Prune => {}
            Visit::Stop => return,
        }
    }
}
