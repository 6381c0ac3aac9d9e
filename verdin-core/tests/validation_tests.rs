// End-to-end tests for the validation entry point over crawled content.

use verdin_core::{
    Finding, RdfFormat, RelationCategory, ValidationError, validate_content,
};

// A crawled snapshot: one declaring page, one target page with two
// members, in the shape the crawler merges into the accumulated graph.
fn snapshot(relation: &str, member_blocks: &str) -> String {
    format!(
        r#"
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix tree: <https://w3id.org/tree#> .
        @prefix ldes: <https://w3id.org/ldes#> .
        @prefix crawl: <http://example.org/> .
        @prefix dct: <http://purl.org/dc/terms/> .

        _:n0 a tree:Node ;
            rdf:subject <https://example.org/page1> ;
            tree:relation _:r0 .
        _:r0 {relation} ;
            tree:node <https://example.org/page2> .

        <https://example.org/page2> a crawl:CrawledPage ;
            crawl:hasPageSource "https://example.org/page2" ;
            crawl:has_contents _:e0 {member_blocks}
        "#
    )
}

#[test]
fn test_lexical_prefix_run_passes() {
    let content = snapshot(
        r#"a tree:PrefixRelation ;
            tree:value "urn:item:" ;
            tree:path dct:identifier"#,
        r#", _:e1 .
        _:e0 a ldes:EventStream ;
            rdf:subject <https://example.org/stream> ;
            tree:member <https://example.org/item/1> .
        _:e1 rdf:subject <https://example.org/item/1> ;
            dct:identifier "urn:item:42" ."#,
    );
    let failures =
        validate_content(&content, RdfFormat::Turtle, RelationCategory::Lexical).unwrap();
    assert!(failures.is_empty(), "unexpected failures: {failures:?}");
}

#[test]
fn test_failures_are_ordered_by_member_discovery() {
    let content = snapshot(
        r#"a tree:PrefixRelation ;
            tree:value "urn:item:" ;
            tree:path dct:identifier"#,
        r#", _:e1, _:e2 .
        _:e0 a ldes:EventStream ;
            rdf:subject <https://example.org/stream> ;
            tree:member <https://example.org/item/1>, <https://example.org/item/2> .
        _:e1 rdf:subject <https://example.org/item/1> ;
            dct:identifier "urn:other:1" .
        _:e2 rdf:subject <https://example.org/item/2> ."#,
    );
    let failures =
        validate_content(&content, RdfFormat::Turtle, RelationCategory::Lexical).unwrap();
    assert_eq!(failures.len(), 2);
    assert!(matches!(&failures[0], Finding::PredicateViolation { member, .. }
        if member == "https://example.org/item/1"));
    assert!(matches!(&failures[1], Finding::MissingProperty { member, path, .. }
        if member == "https://example.org/item/2"
            && path == "http://purl.org/dc/terms/identifier"));
}

#[test]
fn test_existential_semantics_over_member_values() {
    // One of the member's two timestamps satisfies the bound, so the
    // member passes and the run reports nothing.
    let content = snapshot(
        r#"a tree:GreaterThanRelation ;
            tree:value "2020-06-01"^^<http://www.w3.org/2001/XMLSchema#date> ;
            tree:path dct:date"#,
        r#", _:e1 .
        _:e0 a ldes:EventStream ;
            rdf:subject <https://example.org/stream> ;
            tree:member <https://example.org/item/1> .
        _:e1 rdf:subject <https://example.org/item/1> ;
            dct:date "2020-01-01"^^<http://www.w3.org/2001/XMLSchema#date>,
                "2021-01-01"^^<http://www.w3.org/2001/XMLSchema#date> ."#,
    );
    let failures =
        validate_content(&content, RdfFormat::Turtle, RelationCategory::Temporal).unwrap();
    assert!(failures.is_empty(), "unexpected failures: {failures:?}");
}

#[test]
fn test_unknown_relation_kind_is_surfaced() {
    let content = snapshot(
        r#"a <https://w3id.org/tree#DiagonalRelation> ;
            tree:value "x" ;
            tree:path dct:identifier"#,
        r#" .
        _:e0 a ldes:EventStream ;
            rdf:subject <https://example.org/stream> ;
            tree:member <https://example.org/item/1> ."#,
    );
    let err = validate_content(&content, RdfFormat::Turtle, RelationCategory::Lexical)
        .unwrap_err();
    assert!(matches!(err, ValidationError::UnknownRelationKind(iri)
        if iri == "https://w3id.org/tree#DiagonalRelation"));
}

#[test]
fn test_unknown_temporal_datatype_is_surfaced() {
    let content = snapshot(
        r#"a tree:GreaterThanRelation ;
            tree:value "2020"^^<http://www.w3.org/2001/XMLSchema#gYear> ;
            tree:path dct:date"#,
        r#", _:e1 .
        _:e0 a ldes:EventStream ;
            rdf:subject <https://example.org/stream> ;
            tree:member <https://example.org/item/1> .
        _:e1 rdf:subject <https://example.org/item/1> ;
            dct:date "2020-01-01"^^<http://www.w3.org/2001/XMLSchema#date> ."#,
    );
    let err = validate_content(&content, RdfFormat::Turtle, RelationCategory::Temporal)
        .unwrap_err();
    assert!(matches!(err, ValidationError::UnknownDatatype(tag)
        if tag == "http://www.w3.org/2001/XMLSchema#gYear"));
}

#[test]
fn test_unknown_format_tag_is_rejected() {
    assert!(matches!(
        "rdfxml".parse::<RdfFormat>(),
        Err(ValidationError::UnknownFormat(_))
    ));
}
