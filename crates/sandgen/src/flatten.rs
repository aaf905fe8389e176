//! turns the tabs of a configuration tree into ordered rows
//!
//! Each tab is walked depth-first in document order. Every child is put through the
//! [NodeFilter]; admitted children become a [Row], and admitted containers are walked
//! in turn with their own path and order label as the new prefix. Items are never walked,
//! their children only feed the item's own row.
use crate::attributes::{self, CONTAINER};
use crate::banding::BandingHint;
use crate::filter::NodeFilter;
use crate::numbering::{OrderLabel, SiblingCounter};
use crate::tree::{self, TreeNode, MAX_DEPTH};
use indexmap::IndexMap;

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Row {
    pub order: OrderLabel,
    /// The row's own node declares `min` or `max`
    pub is_repeating: bool,
    pub path: String,
    pub label: String,
    pub data_type: String,
    pub mandatory: bool,
    /// Left for manual annotation of the finished report
    pub description: String,
    #[serde(skip)]
    pub banding: BandingHint,
}

/// Rows of all tabs of one input file
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FlattenedDocument {
    pub title: String,
    pub tabs: IndexMap<String, Vec<Row>>,
}

#[derive(thiserror::Error, Debug)]
pub enum FlattenError {
    #[error("nesting deeper than {depth} levels at `{path}`")]
    Structural { depth: usize, path: String },
}

/// Where the walk currently is: the last admitted ancestor
struct Scope<'s> {
    path: &'s str,
    order: Option<&'s OrderLabel>,
    repeating: bool,
    depth: usize,
}

#[derive(derive_new::new)]
pub struct Flattener<'f> {
    filter: &'f NodeFilter,
}

impl<'f> Flattener<'f> {
    /// Flattens every admitted `tab` element found anywhere below `root`
    ///
    /// Tabs are keyed by their `name`. A later tab with an already seen name replaces the
    /// earlier one's rows.
    pub fn flatten_document<N: TreeNode>(
        &self,
        root: &N,
        title: impl Into<String>,
    ) -> Result<FlattenedDocument, FlattenError> {
        let mut tabs = IndexMap::new();

        for tab in tree::find_descendants(root, "tab") {
            let name = tab.attribute("name").unwrap_or_default();
            if !self.filter.admit_tab(name) {
                continue;
            }

            let rows = self.flatten_tab(&tab)?;
            tracing::debug!(tab = name, rows = rows.len(), "flattened tab");

            if tabs.insert(name.to_string(), rows).is_some() {
                tracing::warn!(tab = name, "duplicate tab name, earlier rows replaced");
            }
        }

        Ok(FlattenedDocument {
            title: title.into(),
            tabs,
        })
    }

    pub fn flatten_tab<N: TreeNode>(&self, tab: &N) -> Result<Vec<Row>, FlattenError> {
        let mut rows = vec![];
        let scope = Scope {
            path: "",
            order: None,
            repeating: false,
            depth: 0,
        };
        self.walk(tab, &scope, &mut rows)?;
        Ok(rows)
    }

    fn walk<N: TreeNode>(
        &self,
        parent: &N,
        scope: &Scope<'_>,
        rows: &mut Vec<Row>,
    ) -> Result<(), FlattenError> {
        if scope.depth >= MAX_DEPTH {
            return Err(FlattenError::Structural {
                depth: MAX_DEPTH,
                path: scope.path.to_string(),
            });
        }

        let mut counter = SiblingCounter::new(scope.order);

        for child in parent.children() {
            if self.filter.admit(&child).is_err() {
                continue;
            }

            let order = counter.next_label();
            let path = attributes::join_path(scope.path, attributes::path_segment(&child));
            let data_type = attributes::data_type(&child);
            let is_container = child.has_tag_name(CONTAINER);
            let is_repeating = attributes::is_repeating(&child);

            tracing::trace!(%order, %path, %data_type, "row");

            let row = Row {
                banding: BandingHint::compute(order.depth(), is_container, scope.repeating),
                is_repeating,
                label: attributes::label(&child),
                mandatory: attributes::is_mandatory(&child),
                description: String::new(),
                data_type,
                order,
                path,
            };
            let next_scope = is_container.then(|| (row.path.clone(), row.order.clone()));
            rows.push(row);

            if let Some((path, order)) = next_scope {
                let inner = Scope {
                    path: &path,
                    order: Some(&order),
                    repeating: is_repeating,
                    depth: scope.depth + 1,
                };
                self.walk(&child, &inner, rows)?;
            }
        }

        Ok(())
    }
}
