//! hierarchical order labels (`1`, `1.3`, `1.3.2`, ...)
use std::fmt::{Display, Formatter};

/// Position of a row within its tab, one 1-based segment per nesting level
///
/// Ordering compares segment by segment, so `1.10` sorts after `1.9`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderLabel(Vec<usize>);

impl OrderLabel {
    /// Number of segments, `1.3.2` has depth 3
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn parent(&self) -> Option<OrderLabel> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(OrderLabel(rest.to_vec())),
            _ => None,
        }
    }

    fn child(parent: Option<&OrderLabel>, position: usize) -> Self {
        let mut segments = parent.map(|p| p.0.clone()).unwrap_or_default();
        segments.push(position);
        OrderLabel(segments)
    }
}

impl Display for OrderLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut segments = self.0.iter();
        if let Some(first) = segments.next() {
            write!(f, "{first}")?;
        }
        for segment in segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for OrderLabel {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.')
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(OrderLabel)
    }
}

impl serde::Serialize for OrderLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Hands out order labels to the admitted children of one parent
///
/// Every parent gets its own counter. Only [SiblingCounter::next_label] advances it, so a
/// rejected sibling never uses up a number.
#[derive(Debug)]
pub struct SiblingCounter<'p> {
    parent: Option<&'p OrderLabel>,
    count: usize,
}

impl<'p> SiblingCounter<'p> {
    /// `None` numbers the direct children of a tab
    pub fn new(parent: Option<&'p OrderLabel>) -> Self {
        Self { parent, count: 0 }
    }

    pub fn next_label(&mut self) -> OrderLabel {
        self.count += 1;
        OrderLabel::child(self.parent, self.count)
    }
}
