//! read-only access to a parsed configuration tree
//!
//! The flattening engine never touches a concrete DOM. It walks anything that implements
//! [TreeNode], which keeps the walker independent of the XML parser in use.
//! [roxmltree::Node] is the implementation used for real input.

/// Nesting limit for every recursive walk over a [TreeNode]
///
/// Real configuration documents are a handful of levels deep. Anything past this is
/// treated as cyclic or pathological input.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Element,
    Text,
    Comment,
    ProcessingInstruction,
}

/// A handle to one node of a document
pub trait TreeNode: Copy {
    fn kind(&self) -> NodeKind;

    /// Tag name, `None` for anything that is not an element
    fn tag_name(&self) -> Option<&str>;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Child nodes in document order, including text and comments
    fn children(&self) -> impl Iterator<Item = Self>;

    /// Concatenated text of all descendants
    fn text_content(&self) -> String;

    fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    fn has_tag_name(&self, tag: &str) -> bool {
        self.is_element() && self.tag_name() == Some(tag)
    }

    fn element_children(&self) -> impl Iterator<Item = Self> {
        self.children().filter(|child| child.is_element())
    }
}

impl<'a, 'input: 'a> TreeNode for roxmltree::Node<'a, 'input> {
    fn kind(&self) -> NodeKind {
        match self.node_type() {
            roxmltree::NodeType::Root => NodeKind::Root,
            roxmltree::NodeType::Element => NodeKind::Element,
            roxmltree::NodeType::Text => NodeKind::Text,
            roxmltree::NodeType::Comment => NodeKind::Comment,
            roxmltree::NodeType::PI => NodeKind::ProcessingInstruction,
        }
    }

    fn tag_name(&self) -> Option<&str> {
        self.is_element().then(|| roxmltree::Node::tag_name(self).name())
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attribute(self, name)
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        roxmltree::Node::children(self)
    }

    fn text_content(&self) -> String {
        self.descendants()
            .filter(|node| node.is_text())
            .filter_map(|node| node.text())
            .collect()
    }
}

/// First descendant element (pre-order, `node` itself excluded) with the given tag
///
/// Only enters children for which `descend` holds, a pruned child can still be the
/// match itself. Gives up below [MAX_DEPTH] and reports nothing found.
pub fn find_descendant_where<N, F>(node: &N, tag: &str, descend: F) -> Option<N>
where
    N: TreeNode,
    F: Fn(&N) -> bool,
{
    fn search<N, F>(node: &N, tag: &str, descend: &F, depth: usize) -> Option<N>
    where
        N: TreeNode,
        F: Fn(&N) -> bool,
    {
        if depth >= MAX_DEPTH {
            return None;
        }

        for child in node.element_children() {
            if child.has_tag_name(tag) {
                return Some(child);
            }
            if !descend(&child) {
                continue;
            }
            if let Some(found) = search(&child, tag, descend, depth + 1) {
                return Some(found);
            }
        }

        None
    }

    search(node, tag, &descend, 0)
}

/// All descendant elements with the given tag, in document order
pub fn find_descendants<N: TreeNode>(node: &N, tag: &str) -> Vec<N> {
    fn collect<N: TreeNode>(node: &N, tag: &str, depth: usize, found: &mut Vec<N>) {
        if depth >= MAX_DEPTH {
            return;
        }

        for child in node.element_children() {
            if child.has_tag_name(tag) {
                found.push(child);
            }
            collect(&child, tag, depth + 1, found);
        }
    }

    let mut found = vec![];
    collect(node, tag, 0, &mut found);
    found
}
