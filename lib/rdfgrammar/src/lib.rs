#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod c14n;
mod error;
pub mod event;
mod parser;
mod productions;
pub mod terms;
mod utils;
mod xml;

pub use error::{RdfXmlErrorKind, RdfXmlParseError, RdfXmlSyntaxError, TextPosition};
pub use parser::{DEFAULT_BASE_URI, DEFAULT_BASE_URI_VAR, RdfXmlParser};
pub use productions::{ElementShape, classify, reify};
pub use xml::{XmlAttribute, XmlContent, XmlDocument, XmlElement};
