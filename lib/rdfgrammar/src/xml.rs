//! In-memory XML tree the RDF/XML grammar is matched against.
//!
//! The tree is fully materialized before matching: elements keep their namespace,
//! their attributes, their namespace declarations, their mixed content and their
//! position in the source.

use crate::error::{RdfXmlErrorKind, RdfXmlParseError, RdfXmlSyntaxError, TextPosition};
use crate::utils::*;
use quick_xml::NsReader;
use quick_xml::escape::{resolve_xml_entity, unescape_with};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use rdfterm::vocab::xml;
use std::collections::HashMap;
use std::io::Read;
use std::str;

pub(crate) const DEFAULT_MAX_DEPTH: usize = 512;

/// A well-formed XML document.
///
/// ```
/// use rdfgrammar::XmlDocument;
///
/// let document = XmlDocument::parse_str(
///     r#"<ex:a xmlns:ex="http://example.com/" ex:b="c">text<ex:d/></ex:a>"#,
/// )?;
/// let root = document.root();
/// assert_eq!(root.expanded_name(), "http://example.com/a");
/// assert_eq!(root.attributes()[0].value(), "c");
/// assert_eq!(root.child_elements().count(), 1);
/// assert_eq!(root.text(), "text");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Parses a document from a byte slice. It must be encoded in UTF-8.
    pub fn parse_slice(data: &[u8]) -> Result<Self, RdfXmlSyntaxError> {
        Self::parse_slice_with_max_depth(data, DEFAULT_MAX_DEPTH)
    }

    /// Parses a document from a string.
    pub fn parse_str(data: &str) -> Result<Self, RdfXmlSyntaxError> {
        Self::parse_slice(data.as_bytes())
    }

    /// Parses a document from a [`Read`] implementation.
    ///
    /// The full input is read in memory before parsing.
    pub fn parse_read(mut read: impl Read) -> Result<Self, RdfXmlParseError> {
        let mut data = Vec::new();
        read.read_to_end(&mut data)?;
        Ok(Self::parse_slice(&data)?)
    }

    pub(crate) fn parse_slice_with_max_depth(
        data: &[u8],
        max_depth: usize,
    ) -> Result<Self, RdfXmlSyntaxError> {
        XmlTreeBuilder {
            index: LineIndex::new(data),
            custom_entities: HashMap::new(),
            stack: Vec::new(),
            root: None,
            max_depth,
        }
        .build(data)
    }

    /// The document element.
    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

/// An XML element.
#[derive(Debug, Clone)]
pub struct XmlElement {
    prefix: Option<String>,
    namespace: Option<String>,
    local_name: String,
    namespace_declarations: Vec<(String, String)>,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlContent>,
    position: TextPosition,
}

impl XmlElement {
    /// The prefix of the element name, if any.
    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The namespace the element name resolves to, if any.
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// The name as written in the document, i.e. `prefix:local`.
    pub fn qualified_name(&self) -> String {
        qualified_name(self.prefix(), &self.local_name)
    }

    /// The concatenation of the namespace and the local name.
    pub fn expanded_name(&self) -> String {
        format!(
            "{}{}",
            self.namespace.as_deref().unwrap_or_default(),
            self.local_name
        )
    }

    /// The `xmlns` declarations carried by this element, as `(prefix, namespace)` pairs.
    ///
    /// The default namespace declaration has the empty prefix.
    pub fn namespace_declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespace_declarations
            .iter()
            .map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// The attributes of this element, namespace declarations excluded.
    #[inline]
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// The mixed content of this element in document order.
    #[inline]
    pub fn children(&self) -> &[XmlContent] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|c| match c {
            XmlContent::Element(e) => Some(e),
            XmlContent::Text(_) | XmlContent::ProcessingInstruction { .. } => None,
        })
    }

    /// The concatenation of the text children of this element.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            if let XmlContent::Text(t) = child {
                text.push_str(t);
            }
        }
        text
    }

    /// The position of the start tag in the source.
    #[inline]
    pub fn position(&self) -> TextPosition {
        self.position
    }
}

/// An attribute of an [`XmlElement`].
#[derive(Debug, Clone)]
pub struct XmlAttribute {
    prefix: Option<String>,
    namespace: Option<String>,
    local_name: String,
    value: String,
    position: TextPosition,
}

impl XmlAttribute {
    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The namespace the attribute name resolves to. Unprefixed attributes have no namespace.
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn qualified_name(&self) -> String {
        qualified_name(self.prefix(), &self.local_name)
    }

    /// The unescaped attribute value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn position(&self) -> TextPosition {
        self.position
    }
}

/// A child of an [`XmlElement`]: an element, some character data or a processing instruction.
///
/// Comments are not kept.
#[derive(Debug, Clone)]
pub enum XmlContent {
    Element(XmlElement),
    Text(String),
    ProcessingInstruction { target: String, data: String },
}

fn qualified_name(prefix: Option<&str>, local_name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{local_name}"),
        None => local_name.to_owned(),
    }
}

struct XmlTreeBuilder<'a> {
    index: LineIndex<'a>,
    custom_entities: HashMap<String, String>,
    stack: Vec<XmlElement>,
    root: Option<XmlElement>,
    max_depth: usize,
}

impl XmlTreeBuilder<'_> {
    fn build(mut self, data: &[u8]) -> Result<XmlDocument, RdfXmlSyntaxError> {
        let mut reader = NsReader::from_reader(data);
        reader.config_mut().expand_empty_elements = true;
        loop {
            let offset = self.index.markup_start(reader.buffer_position());
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(error) => {
                    return Err(RdfXmlSyntaxError::new(
                        error.into(),
                        self.index.position(reader.error_position()),
                    ));
                }
            };
            let position = self.index.position(offset);
            match event {
                Event::Start(tag) => {
                    if self.stack.len() >= self.max_depth {
                        return Err(RdfXmlSyntaxError::new(
                            RdfXmlErrorKind::NestingTooDeep {
                                max_depth: self.max_depth,
                            },
                            position,
                        ));
                    }
                    let element = self.build_element(&reader, &tag, offset)?;
                    self.stack.push(element);
                }
                Event::End(_) => {
                    let element = self
                        .stack
                        .pop()
                        .ok_or_else(|| RdfXmlSyntaxError::msg("Unexpected end tag", position))?;
                    if let Some(parent) = self.stack.last_mut() {
                        parent.children.push(XmlContent::Element(element));
                    } else if self.root.is_some() {
                        return Err(RdfXmlSyntaxError::msg(
                            "The document has more than one root element",
                            element.position,
                        ));
                    } else {
                        self.root = Some(element);
                    }
                }
                Event::Empty(_) => {
                    return Err(RdfXmlSyntaxError::msg(
                        "The expand_empty_elements option must be enabled",
                        position,
                    ));
                }
                Event::Text(text) => {
                    let text = text
                        .unescape_with(|e| self.resolve_entity(e))
                        .map_err(|e| RdfXmlSyntaxError::new(e.into(), position))?
                        .into_owned();
                    self.push_text(text, position)?;
                }
                Event::CData(cdata) => {
                    let text = str::from_utf8(&cdata)
                        .map_err(|_| RdfXmlSyntaxError::msg("Invalid UTF-8 in CDATA", position))?
                        .to_owned();
                    self.push_text(text, position)?;
                }
                Event::Decl(decl) => {
                    if let Some(encoding) = decl.encoding() {
                        let encoding = encoding.map_err(|e| {
                            RdfXmlSyntaxError::new(quick_xml::Error::InvalidAttr(e).into(), position)
                        })?;
                        if !is_utf8(&encoding) {
                            return Err(RdfXmlSyntaxError::msg(
                                "Only UTF-8 is supported by the RDF/XML parser",
                                position,
                            ));
                        }
                    }
                }
                Event::DocType(dt) => self.parse_doctype(&dt, position)?,
                Event::PI(pi) => {
                    let content = str::from_utf8(&pi).map_err(|_| {
                        RdfXmlSyntaxError::msg("Invalid UTF-8 in processing instruction", position)
                    })?;
                    let (target, data) = content
                        .split_once(|c: char| c.is_ascii_whitespace())
                        .unwrap_or((content, ""));
                    // Processing instructions outside of the root element are dropped
                    if let Some(parent) = self.stack.last_mut() {
                        parent.children.push(XmlContent::ProcessingInstruction {
                            target: target.to_owned(),
                            data: data.trim_start().to_owned(),
                        });
                    }
                }
                Event::Comment(_) => (),
                Event::Eof => break,
            }
        }
        if let Some(element) = self.stack.last() {
            return Err(RdfXmlSyntaxError::msg(
                format!("The element {} is not closed", element.qualified_name()),
                element.position,
            ));
        }
        let root = self.root.ok_or_else(|| {
            RdfXmlSyntaxError::msg("The document has no root element", None)
        })?;
        Ok(XmlDocument { root })
    }

    fn build_element(
        &self,
        reader: &NsReader<&[u8]>,
        tag: &BytesStart<'_>,
        offset: u64,
    ) -> Result<XmlElement, RdfXmlSyntaxError> {
        let position = self.index.position(offset);
        let name = tag.name();
        let prefix = name
            .prefix()
            .map(|p| decode(p.as_ref(), position).map(ToOwned::to_owned))
            .transpose()?;
        let local_name = decode(name.local_name().as_ref(), position)?.to_owned();
        let namespace = resolve_namespace(reader.resolve_element(name).0, position)?;

        let mut namespace_declarations = Vec::new();
        let mut attributes = Vec::new();
        for attribute in tag.attributes() {
            let attribute = attribute.map_err(|e| {
                RdfXmlSyntaxError::new(quick_xml::Error::InvalidAttr(e).into(), position)
            })?;
            let key = attribute.key;
            let attribute_position = self
                .index
                .position(offset + 1 + attribute_offset(tag, key.as_ref()));
            let value = attribute
                .decode_and_unescape_value_with(reader.decoder(), |e| self.resolve_entity(e))
                .map_err(|e| RdfXmlSyntaxError::new(e.into(), attribute_position))?
                .into_owned();
            if key.as_ref() == b"xmlns" {
                namespace_declarations.push((String::new(), value));
                continue;
            }
            if let Some(declared) = key.as_ref().strip_prefix(b"xmlns:") {
                namespace_declarations.push((decode(declared, attribute_position)?.to_owned(), value));
                continue;
            }
            let attribute_prefix = key
                .prefix()
                .map(|p| decode(p.as_ref(), attribute_position).map(ToOwned::to_owned))
                .transpose()?;
            let attribute_namespace = if attribute_prefix.as_deref() == Some("xml") {
                Some(xml::NAMESPACE.to_owned())
            } else {
                resolve_namespace(reader.resolve_attribute(key).0, attribute_position)?
            };
            attributes.push(XmlAttribute {
                prefix: attribute_prefix,
                namespace: attribute_namespace,
                local_name: decode(key.local_name().as_ref(), attribute_position)?.to_owned(),
                value,
                position: attribute_position,
            });
        }
        Ok(XmlElement {
            prefix,
            namespace,
            local_name,
            namespace_declarations,
            attributes,
            children: Vec::new(),
            position,
        })
    }

    fn push_text(&mut self, text: String, position: TextPosition) -> Result<(), RdfXmlSyntaxError> {
        let Some(parent) = self.stack.last_mut() else {
            return if is_whitespace_str(&text) {
                Ok(())
            } else {
                Err(RdfXmlSyntaxError::msg(
                    format!("Unexpected text outside of the root element: '{text}'"),
                    position,
                ))
            };
        };
        if let Some(XmlContent::Text(previous)) = parent.children.last_mut() {
            previous.push_str(&text);
        } else {
            parent.children.push(XmlContent::Text(text));
        }
        Ok(())
    }

    fn parse_doctype(
        &mut self,
        dt: &BytesText<'_>,
        position: TextPosition,
    ) -> Result<(), RdfXmlSyntaxError> {
        let dt = str::from_utf8(dt)
            .map_err(|_| RdfXmlSyntaxError::msg("Invalid UTF-8 in DOCTYPE", position))?;
        // we extract entities
        for input in dt.split('<').skip(1) {
            if let Some(input) = input.strip_prefix("!ENTITY") {
                let input = input.trim_start().strip_prefix('%').unwrap_or(input);
                let (entity_name, input) = input
                    .trim_start()
                    .split_once(|c: char| c.is_ascii_whitespace())
                    .ok_or_else(|| {
                        RdfXmlSyntaxError::msg(
                            "<!ENTITY declarations should contain both an entity name and an entity value",
                            position,
                        )
                    })?;
                let input = input.trim_start().strip_prefix('\"').ok_or_else(|| {
                    RdfXmlSyntaxError::msg(
                        "<!ENTITY values should be enclosed in double quotes",
                        position,
                    )
                })?;
                let (entity_value, input) = input.split_once('"').ok_or_else(|| {
                    RdfXmlSyntaxError::msg(
                        "<!ENTITY declarations values should be enclosed in double quotes",
                        position,
                    )
                })?;
                input.trim_start().strip_prefix('>').ok_or_else(|| {
                    RdfXmlSyntaxError::msg("<!ENTITY declarations values should end with >", position)
                })?;

                // Entities may reference previously declared entities
                let entity_value = unescape_with(entity_value, |e| self.resolve_entity(e))
                    .map_err(|e| RdfXmlSyntaxError::new(quick_xml::Error::from(e).into(), position))?
                    .into_owned();
                self.custom_entities
                    .insert(entity_name.to_owned(), entity_value);
            }
        }
        Ok(())
    }

    fn resolve_entity(&self, e: &str) -> Option<&str> {
        resolve_xml_entity(e).or_else(|| self.custom_entities.get(e).map(String::as_str))
    }
}

fn resolve_namespace(
    result: ResolveResult<'_>,
    position: TextPosition,
) -> Result<Option<String>, RdfXmlSyntaxError> {
    match result {
        ResolveResult::Bound(ns) => Ok(Some(decode(ns.as_ref(), position)?.to_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::UnknownPrefix {
                prefix: String::from_utf8_lossy(&prefix).into_owned(),
            },
            position,
        )),
    }
}

fn decode(bytes: &[u8], position: TextPosition) -> Result<&str, RdfXmlSyntaxError> {
    str::from_utf8(bytes).map_err(|_| RdfXmlSyntaxError::msg("Invalid UTF-8 in XML name", position))
}

/// Offset of the attribute `key` inside of the start tag content.
fn attribute_offset(tag: &[u8], key: &[u8]) -> u64 {
    let mut from = 0;
    while let Some(i) = tag[from..].windows(key.len()).position(|w| w == key) {
        let at = from + i;
        if at > 0 && is_whitespace(tag[at - 1]) {
            return u64::try_from(at).unwrap_or_default();
        }
        from = at + 1;
    }
    0
}

/// Maps byte offsets to lines and columns.
struct LineIndex<'a> {
    data: &'a [u8],
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(data: &'a [u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            data.iter()
                .enumerate()
                .filter(|(_, b)| **b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { data, line_starts }
    }

    /// Moves `offset` back on the `<` opening the markup if the reader already consumed it.
    fn markup_start(&self, offset: u64) -> u64 {
        let Ok(i) = usize::try_from(offset) else {
            return offset;
        };
        if self.data.get(i) != Some(&b'<') && i > 0 && self.data.get(i - 1) == Some(&b'<') {
            offset - 1
        } else {
            offset
        }
    }

    fn position(&self, offset: u64) -> TextPosition {
        let end = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(self.data.len());
        let line = match self.line_starts.binary_search(&end) {
            Ok(line) => line,
            Err(line) => line - 1,
        };
        let start = self.line_starts[line];
        // Counts code points: UTF-8 continuation bytes are skipped
        let column = self.data[start..end]
            .iter()
            .filter(|b| (**b & 0xC0) != 0x80)
            .count();
        TextPosition {
            line: u64::try_from(line).unwrap_or_default(),
            column: u64::try_from(column).unwrap_or_default(),
            offset,
        }
    }
}
