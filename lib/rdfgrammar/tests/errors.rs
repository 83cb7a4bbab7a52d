use rdfgrammar::{RdfXmlErrorKind, RdfXmlParser, RdfXmlSyntaxError};
use std::error::Error;

const PREFIXES: &str = r#"xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/""#;

fn parse_error(content: &str) -> RdfXmlSyntaxError {
    RdfXmlParser::new()
        .with_base_iri("http://example.com/doc")
        .unwrap()
        .parse_str(&format!("<rdf:RDF {PREFIXES}>{content}</rdf:RDF>"))
        .unwrap_err()
}

#[test]
fn old_terms_are_rejected() {
    let error = parse_error(r#"<rdf:aboutEach rdf:about="x"/>"#);
    assert!(matches!(error.kind(), RdfXmlErrorKind::OldTerm { uri, .. } if uri.ends_with("#aboutEach")));
    let error = parse_error(r#"<rdf:Description><rdf:bagID>x</rdf:bagID></rdf:Description>"#);
    assert!(matches!(error.kind(), RdfXmlErrorKind::OldTerm { .. }));
    let error = parse_error(r#"<rdf:Description rdf:aboutEachPrefix="x"/>"#);
    assert!(matches!(error.kind(), RdfXmlErrorKind::OldTerm { .. }));
}

#[test]
fn id_must_be_a_name() {
    let error = parse_error(r#"<rdf:Description rdf:ID="a#b" ex:p="v"/>"#);
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::InvalidId { value, attribute: "rdf:ID" } if value == "a#b"
    ));
    let error = parse_error(r#"<rdf:Description rdf:nodeID="1a"/>"#);
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::InvalidId {
            attribute: "rdf:nodeID",
            ..
        }
    ));
}

#[test]
fn duplicate_id() {
    let error = parse_error(
        "<rdf:Description rdf:ID=\"x\" ex:p=\"1\"/>\n<rdf:Description rdf:ID=\"x\" ex:p=\"2\"/>",
    );
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::DuplicateId { uri } if uri == "http://example.com/doc#x"
    ));
    let location = error.location().unwrap();
    assert_eq!(location.line, 1);
    assert_eq!(location.column, 17);
}

#[test]
fn same_id_with_other_base_is_allowed() {
    RdfXmlParser::new()
        .parse_str(&format!(
            r#"<rdf:RDF {PREFIXES}><rdf:Description rdf:ID="x" ex:p="1"/><rdf:Description xml:base="http://other.example/" rdf:ID="x" ex:p="2"/></rdf:RDF>"#
        ))
        .unwrap();
}

#[test]
fn missing_rdf_element() {
    let error = RdfXmlParser::new()
        .parse_str(r#"<ex:doc xmlns:ex="http://example.com/"/>"#)
        .unwrap_err();
    assert!(matches!(error.kind(), RdfXmlErrorKind::NoRdfElement));
}

#[test]
fn rdf_element_attributes() {
    let error = RdfXmlParser::new()
        .parse_str(&format!(r#"<rdf:RDF {PREFIXES} ex:a="b"/>"#))
        .unwrap_err();
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::RdfAttributesNotAllowed { uri } if uri == "http://example.com/a"
    ));
}

#[test]
fn syntax_terms_as_node_elements() {
    let error = parse_error("<rdf:resource/>");
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::CoreSyntaxTerm {
            production: "node element",
            ..
        }
    ));
    let error = parse_error("<rdf:li/>");
    assert!(matches!(error.kind(), RdfXmlErrorKind::ListItemNotAllowed { .. }));
    let error = parse_error("<rdf:RDF/>");
    assert!(matches!(error.kind(), RdfXmlErrorKind::CoreSyntaxTerm { .. }));
}

#[test]
fn nested_rdf_elements_are_node_elements() {
    let error = parse_error("<rdf:RDF><rdf:Description rdf:about=\"x\"/></rdf:RDF>");
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::CoreSyntaxTerm {
            uri,
            production: "node element",
        } if uri == "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF"
    ));
    assert_eq!(error.location().unwrap().column, 96);
}

#[test]
fn syntax_terms_as_property_elements() {
    let error = parse_error("<rdf:Description><rdf:Description/></rdf:Description>");
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::DescriptionNotAllowed {
            production: "property element"
        }
    ));
    let error = parse_error("<rdf:Description><rdf:about>x</rdf:about></rdf:Description>");
    assert!(matches!(error.kind(), RdfXmlErrorKind::CoreSyntaxTerm { .. }));
}

#[test]
fn syntax_terms_as_property_attributes() {
    let error = parse_error(r#"<rdf:Description rdf:li="x"/>"#);
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::ListItemNotAllowed {
            production: "property attribute"
        }
    ));
    let error = parse_error(r#"<rdf:Description rdf:Description="x"/>"#);
    assert!(matches!(error.kind(), RdfXmlErrorKind::DescriptionNotAllowed { .. }));
    let error = parse_error(r#"<rdf:Description rdf:resource="x"/>"#);
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::CoreSyntaxTerm {
            production: "property attribute",
            ..
        }
    ));
}

#[test]
fn rdf_namespace_terms() {
    let error = parse_error("<rdf:_01/>");
    assert!(matches!(error.kind(), RdfXmlErrorKind::InvalidContainerNumber { .. }));
    let error = parse_error("<rdf:Description><rdf:_0>x</rdf:_0></rdf:Description>");
    assert!(matches!(error.kind(), RdfXmlErrorKind::InvalidContainerNumber { .. }));
    let error = parse_error("<rdf:Thing/>");
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::UnknownRdfTerm { uri } if uri.ends_with("#Thing")
    ));
}

#[test]
fn conflicting_subject_attributes() {
    let error = parse_error(r#"<rdf:Description rdf:about="x" rdf:nodeID="y"/>"#);
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::ConflictingSubjectAttributes
    ));
}

#[test]
fn property_element_attributes() {
    let error =
        parse_error(r#"<rdf:Description><ex:p rdf:resource="x">text</ex:p></rdf:Description>"#);
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::UnexpectedAttribute {
            production: "literal property element",
            ..
        }
    ));
    let error = parse_error(
        r#"<rdf:Description><ex:p ex:q="x"><rdf:Description/></ex:p></rdf:Description>"#,
    );
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::UnexpectedAttribute {
            production: "resource property element",
            ..
        }
    ));
    let error = parse_error(
        r#"<rdf:Description><ex:p rdf:parseType="Resource" rdf:datatype="x"/></rdf:Description>"#,
    );
    assert!(matches!(error.kind(), RdfXmlErrorKind::UnexpectedAttribute { .. }));
    let error = parse_error(
        r#"<rdf:Description><ex:p rdf:about="x"/></rdf:Description>"#,
    );
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::UnexpectedAttribute {
            production: "empty property element",
            ..
        }
    ));
}

#[test]
fn duplicate_attribute() {
    let error = RdfXmlParser::new()
        .parse_str(&format!(
            r#"<rdf:RDF {PREFIXES} xmlns:r="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><rdf:Description><ex:p rdf:ID="a" r:ID="b">v</ex:p></rdf:Description></rdf:RDF>"#
        ))
        .unwrap_err();
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::DuplicateAttribute { .. }
    ));
}

#[test]
fn conflicting_object_attributes() {
    let error = parse_error(
        r#"<rdf:Description><ex:p rdf:resource="x" rdf:nodeID="y"/></rdf:Description>"#,
    );
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::ConflictingObjectAttributes
    ));
}

#[test]
fn resource_property_element_has_a_single_child() {
    let error = parse_error(
        "<rdf:Description><ex:p><rdf:Description/><rdf:Description/></ex:p></rdf:Description>",
    );
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::SingleChildElementExpected { count: 2 }
    ));
}

#[test]
fn other_parse_types_are_unsupported() {
    let error = parse_error(
        r#"<rdf:Description><ex:p rdf:parseType="Other"><ex:a/></ex:p></rdf:Description>"#,
    );
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::UnsupportedParseType { value } if value == "Other"
    ));
}

#[test]
fn invalid_uris() {
    let error = parse_error(r#"<rdf:Description rdf:about="http://exa mple.com/"/>"#);
    assert!(matches!(error.kind(), RdfXmlErrorKind::InvalidUri(_)));
    assert!(error.source().is_some());
    let error = RdfXmlParser::new()
        .expect_rdf_root(false)
        .parse_str(r#"<doc/>"#)
        .unwrap_err();
    assert!(matches!(error.kind(), RdfXmlErrorKind::InvalidUri(_)));
}

#[test]
fn malformed_xml() {
    let error = RdfXmlParser::new().parse_str("<a></b>").unwrap_err();
    assert!(matches!(error.kind(), RdfXmlErrorKind::Xml(_)));
    let error = RdfXmlParser::new().parse_str("<foo:bar/>").unwrap_err();
    assert!(matches!(
        error.kind(),
        RdfXmlErrorKind::UnknownPrefix { prefix } if prefix == "foo"
    ));
    let error = RdfXmlParser::new()
        .parse_str(r#"<?xml version="1.0" encoding="UTF-16"?><a/>"#)
        .unwrap_err();
    assert!(matches!(error.kind(), RdfXmlErrorKind::InvalidXml(_)));
}

#[test]
fn errors_are_located() {
    let error = parse_error("\n  <rdf:Description>\n    <rdf:Description/>\n  </rdf:Description>");
    let location = error.location().unwrap();
    assert_eq!(location.line, 2);
    assert_eq!(location.column, 4);
    assert!(
        error
            .to_string()
            .starts_with("Parser error at line 3 column 5: ")
    );
}
