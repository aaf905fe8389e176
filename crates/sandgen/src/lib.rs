//! # sandgen - data-capture configuration to report tables
//!
//! ## Introduction for developers
//!
//! Read this to understand how `sandgen` works internally.
//!
//! ### Configuration documents
//!
//! Input files (`*.cfg`) are XML documents describing a data-capture form. The parts we care
//! about:
//!
//! - a `tab` groups fields under a name, and becomes one table in the report
//! - a `container` groups fields; with `min`/`max` it is repeating
//! - an `item` is a single field. Its first child that is not a `label` carries the input
//!   type (`text`, `checkbox`, `textarea`, `browser`, ...)
//! - a `label` holds the text shown to the user
//!
//! ```xml
//! <tab name="General">
//!   <container name="grp" min="0" max="5">
//!     <label>Group</label>
//!     <item pathid="f1">
//!       <label>Name</label>
//!       <text required="t"/>
//!     </item>
//!   </container>
//! </tab>
//! ```
//!
//! ### Loading files
//!
//! [documents::discover] walks a directory for configuration files. Each one is read into a
//! [documents::ConfigSource] and parsed with [roxmltree]. The engine itself only sees the
//! [tree::TreeNode] trait, never the parser.
//!
//! ### Flattening
//!
//! see [flatten::Flattener]
//!
//! Every `tab` is walked depth-first. A child becomes a row only if [filter::NodeFilter]
//! admits it:
//!
//! - it is an element
//! - it is a `container` or an `item`
//! - its path segment contains none of the excluded strings (`isReplicate`)
//! - its data type is not `hidden`
//! - it is not named `dcr_content`
//!
//! Fields of a row are resolved in [attributes], the order label is handed out by
//! [numbering::SiblingCounter], and [banding::BandingHint] notes how the row should be
//! shaded. Containers are walked with their own path and order label as prefix.
//!
//! **Example**
//!
//! The document above flattens into
//!
//! | **order** | **repeating** | **path** | **label** | **data type**                  | **mandatory** |
//! |-----------|---------------|----------|-----------|--------------------------------|---------------|
//! | `1`       | Y             | `grp`    | Group     | `Container (Min = 0, Max = 5)` | N             |
//! | `1.1`     | N             | `grp/f1` | Name      | `text`                         | Y             |
//!
//! ### Output
//!
//! [batch::run] flattens each file on its own and collects a
//! [flatten::FlattenedDocument] per file. Files that fail are logged and skipped.
//! [report::render] turns the documents into HTML, Markdown, JSON or YAML.
//!
pub mod attributes;
pub mod banding;
pub mod batch;
pub mod config;
pub mod documents;
pub mod filter;
pub mod flatten;
pub mod numbering;
pub mod report;
pub mod tree;
