//! [Exclusive XML canonicalization](https://www.w3.org/TR/xml-exc-c14n/) of element content.
//!
//! Used to build the lexical form of `rdf:XMLLiteral` values.

use crate::xml::{XmlAttribute, XmlContent, XmlElement};
use quick_xml::Reader;
use quick_xml::errors::IllFormedError;
use quick_xml::events::Event;
use rdfterm::vocab::xml;

/// Serializes the content of `element` (its text and its child elements) in canonical form.
///
/// Only the namespace declarations visibly used by an element or by its attributes are written,
/// and only if an output ancestor did not already declare them with the same value.
pub fn canonicalize_content(element: &XmlElement) -> String {
    let mut output = String::new();
    let rendered: Vec<(String, String)> = Vec::new();
    for child in element.children() {
        write_content(child, &rendered, &mut output);
    }
    output
}

fn write_content(content: &XmlContent, rendered: &[(String, String)], output: &mut String) {
    match content {
        XmlContent::Text(text) => escape_text(text, output),
        XmlContent::Element(element) => write_element(element, rendered, output),
        XmlContent::ProcessingInstruction { target, data } => {
            output.push_str("<?");
            output.push_str(target);
            if !data.is_empty() {
                output.push(' ');
                output.push_str(data);
            }
            output.push_str("?>");
        }
    }
}

fn write_element(element: &XmlElement, rendered: &[(String, String)], output: &mut String) {
    let name = element.qualified_name();
    output.push('<');
    output.push_str(&name);

    let mut used = vec![(
        element.prefix().unwrap_or_default().to_owned(),
        element.namespace().unwrap_or_default().to_owned(),
    )];
    for attribute in element.attributes() {
        if let Some(prefix) = attribute.prefix() {
            if prefix != "xml" && !used.iter().any(|(p, _)| p == prefix) {
                used.push((
                    prefix.to_owned(),
                    attribute.namespace().unwrap_or_default().to_owned(),
                ));
            }
        }
    }
    used.sort();

    let mut in_scope = rendered.to_vec();
    for (prefix, namespace) in used {
        let previous = in_scope
            .iter()
            .rev()
            .find(|(p, _)| *p == prefix)
            .map(|(_, n)| n.as_str());
        let needed = match previous {
            Some(previous) => previous != namespace,
            // The empty default namespace does not need to be declared
            None => !(prefix.is_empty() && namespace.is_empty()),
        };
        if needed {
            if prefix.is_empty() {
                output.push_str(" xmlns=\"");
            } else {
                output.push_str(" xmlns:");
                output.push_str(&prefix);
                output.push_str("=\"");
            }
            escape_attribute_value(&namespace, output);
            output.push('"');
            in_scope.push((prefix, namespace));
        }
    }

    let mut attributes = element.attributes().iter().collect::<Vec<_>>();
    attributes.sort_by(|a, b| attribute_sort_key(a).cmp(&attribute_sort_key(b)));
    for attribute in attributes {
        output.push(' ');
        output.push_str(&attribute.qualified_name());
        output.push_str("=\"");
        escape_attribute_value(attribute.value(), output);
        output.push('"');
    }
    output.push('>');

    for child in element.children() {
        write_content(child, &in_scope, output);
    }
    output.push_str("</");
    output.push_str(&name);
    output.push('>');
}

fn attribute_sort_key(attribute: &XmlAttribute) -> (&str, &str) {
    let namespace = match attribute.prefix() {
        Some("xml") => xml::NAMESPACE,
        _ => attribute.namespace().unwrap_or_default(),
    };
    (namespace, attribute.local_name())
}

fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\r' => output.push_str("&#xD;"),
            _ => output.push(c),
        }
    }
}

fn escape_attribute_value(value: &str, output: &mut String) {
    for c in value.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '"' => output.push_str("&quot;"),
            '\t' => output.push_str("&#x9;"),
            '\n' => output.push_str("&#xA;"),
            '\r' => output.push_str("&#xD;"),
            _ => output.push(c),
        }
    }
}

/// Checks that `literal` is well-formed XML content by parsing it inside of a synthetic root element.
pub fn check_well_formed(literal: &str) -> Result<(), quick_xml::Error> {
    let wrapped = format!("<literal-root>{literal}</literal-root>");
    let mut reader = Reader::from_str(&wrapped);
    let mut open = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(tag) => open.push(tag.name().as_ref().to_vec()),
            Event::End(_) => {
                open.pop();
            }
            Event::Eof => break,
            _ => (),
        }
    }
    if let Some(name) = open.pop() {
        return Err(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(
            String::from_utf8_lossy(&name).into_owned(),
        )));
    }
    Ok(())
}
