#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod blank_node;
pub mod graph;
mod literal;
mod triple;
mod uri;
pub mod vocab;

pub use crate::blank_node::BlankNode;
pub use crate::graph::Graph;
pub use crate::literal::Literal;
pub use crate::triple::{Node, Subject, Triple};
pub use crate::uri::{UriParseError, UriRef};
