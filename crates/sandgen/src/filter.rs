//! decides which nodes become rows
use crate::attributes::{self, CONTAINER, ITEM};
use crate::tree::TreeNode;

/// Nodes with this name wrap content without being a field themselves
pub const STRUCTURAL_WRAPPER: &str = "dcr_content";

/// Data type of fields that are never shown to a user
pub const HIDDEN: &str = "hidden";

/// Localized copies of a document's tabs, never flattened whatever the settings say
pub const LOCALIZED_TABS: [&str; 2] = ["Traditional Chinese", "Simplified Chinese"];

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSettings {
    /// A node is dropped when its path segment contains any of these
    pub excluded_paths: Vec<String>,
    /// Tabs with these names are skipped on top of [LOCALIZED_TABS]
    pub excluded_tabs: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            excluded_paths: vec!["isReplicate".to_string()],
            excluded_tabs: vec![],
        }
    }
}

/// Why a node did not make it into the output
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Rejection {
    #[error("not an element")]
    NotElement,
    #[error("element without a tag name")]
    MissingTagName,
    #[error("tag `{0}` is neither container nor item")]
    TagNotAllowed(String),
    #[error("path segment `{segment}` contains excluded `{excluded}`")]
    PathExcluded { segment: String, excluded: String },
    #[error("node is hidden")]
    Hidden,
    #[error("structural wrapper")]
    StructuralWrapper,
}

#[derive(Debug, Default, derive_new::new)]
pub struct NodeFilter {
    settings: FilterSettings,
}

impl NodeFilter {
    /// Runs every check in order and stops at the first rejection
    pub fn admit<N: TreeNode>(&self, node: &N) -> Result<(), Rejection> {
        let result = self.check(node);
        if let Err(rejection) = &result {
            tracing::trace!(
                tag = node.tag_name(),
                segment = attributes::path_segment(node),
                %rejection,
                "skipped"
            );
        }
        result
    }

    fn check<N: TreeNode>(&self, node: &N) -> Result<(), Rejection> {
        if !node.is_element() {
            return Err(Rejection::NotElement);
        }

        let Some(tag) = node.tag_name() else {
            tracing::warn!("element node without tag name");
            return Err(Rejection::MissingTagName);
        };

        if tag != CONTAINER && tag != ITEM {
            return Err(Rejection::TagNotAllowed(tag.to_string()));
        }

        let segment = attributes::path_segment(node);
        if let Some(excluded) = self
            .settings
            .excluded_paths
            .iter()
            .find(|excluded| segment.contains(excluded.as_str()))
        {
            return Err(Rejection::PathExcluded {
                segment: segment.to_string(),
                excluded: excluded.clone(),
            });
        }

        if attributes::data_type(node) == HIDDEN {
            return Err(Rejection::Hidden);
        }

        if node.attribute("name") == Some(STRUCTURAL_WRAPPER) {
            return Err(Rejection::StructuralWrapper);
        }

        Ok(())
    }

    pub fn admit_tab(&self, name: &str) -> bool {
        let excluded = LOCALIZED_TABS.contains(&name)
            || self.settings.excluded_tabs.iter().any(|tab| tab == name);
        if excluded {
            tracing::debug!(tab = name, "skipped excluded tab");
        }
        !excluded
    }
}
