//! per-node field resolution
//!
//! Everything a [crate::flatten::Row] shows about a node is derived here, from the node's
//! attributes and its immediate children. None of these functions fail: missing data
//! resolves to an empty string.
use crate::tree::{self, TreeNode};

pub const CONTAINER: &str = "container";
pub const ITEM: &str = "item";
pub const LABEL: &str = "label";

/// Separator between path segments
pub const PATH_SEPARATOR: char = '/';

/// A node is repeating when it declares any cardinality bound
pub fn is_repeating<N: TreeNode>(node: &N) -> bool {
    node.has_attribute("min") || node.has_attribute("max")
}

/// Text of the first `label` element below `node`
///
/// The search goes as deep as needed but does not enter nested containers or items,
/// their labels belong to their own rows.
pub fn label<N: TreeNode>(node: &N) -> String {
    let owns_label = |child: &N| !child.has_tag_name(CONTAINER) && !child.has_tag_name(ITEM);
    tree::find_descendant_where(node, LABEL, owns_label)
        .map(|label| label.text_content())
        .unwrap_or_default()
}

/// Human readable type of a node
///
/// - containers: `Container`, or `Container (Min = .., Max = ..)` when repeating
/// - items: tag of the first typed child (i.e. not a `label`)
/// - anything else: its own tag
pub fn data_type<N: TreeNode>(node: &N) -> String {
    match node.tag_name() {
        Some(CONTAINER) if is_repeating(node) => format!(
            "Container (Min = {}, Max = {})",
            node.attribute("min").unwrap_or_default(),
            node.attribute("max").unwrap_or_default()
        ),
        Some(CONTAINER) => "Container".to_string(),
        Some(ITEM) => {
            let typed_child = node
                .element_children()
                .find(|child| child.tag_name().is_some_and(|tag| tag != LABEL));

            match typed_child.as_ref().and_then(TreeNode::tag_name) {
                Some(tag) => tag.to_string(),
                None => {
                    tracing::debug!(
                        pathid = node.attribute("pathid"),
                        "item has no typed child, data type left empty"
                    );
                    String::new()
                }
            }
        }
        Some(tag) => tag.to_string(),
        None => String::new(),
    }
}

/// An item is mandatory when one of its direct children says `required="t"`
pub fn is_mandatory<N: TreeNode>(node: &N) -> bool {
    if !node.has_tag_name(ITEM) {
        return false;
    }

    node.element_children()
        .any(|child| child.attribute("required") == Some("t"))
}

/// The attribute identifying a node within its parent: `pathid` for items, `name` otherwise
pub fn path_segment<N: TreeNode>(node: &N) -> &str {
    let key = if node.has_tag_name(ITEM) {
        "pathid"
    } else {
        "name"
    };
    node.attribute(key).unwrap_or_default()
}

/// Appends `segment` to `parent`, omitting the separator at the top level
pub fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        return segment.to_string();
    }

    let mut path = String::with_capacity(parent.len() + 1 + segment.len());
    path.push_str(parent);
    path.push(PATH_SEPARATOR);
    path.push_str(segment);
    path
}
