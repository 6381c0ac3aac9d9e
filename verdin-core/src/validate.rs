//! The validation entry point: content + format + relation category in,
//! ordered failure list out.

use crate::error::{Result, ValidationError};
use crate::evaluate::{RelationCategory, evaluate};
use crate::graph::{Graph, RdfFormat};
use crate::member::{members_of, values_of};
use crate::relation::extract_relations;
use crate::report::{Finding, Report};
use tracing::debug;

/// Validate serialized crawled content against the selected relation
/// category. Returns the ordered failure list; empty means the stream's
/// advertised fragmentation holds.
pub fn validate_content(
    content: &str,
    format: RdfFormat,
    category: RelationCategory,
) -> Result<Vec<Finding>> {
    let graph = Graph::parse(content, format, None)?;
    validate_graph(&graph, category)
}

/// Validate an already-parsed accumulated graph.
pub fn validate_graph(graph: &Graph, category: RelationCategory) -> Result<Vec<Finding>> {
    let relations = extract_relations(graph)?;
    let mut report = Report::new(category);

    for relation in &relations {
        if !category.allows(relation.kind) {
            return Err(ValidationError::KindNotInCategory {
                kind: relation.kind.to_string(),
                category: category.to_string(),
            });
        }
        debug!("Validating relation {:?}", relation);
        report.note_relation();

        let members = members_of(graph, &relation.target_page);
        for member in &members {
            report.note_member();
            let values = values_of(graph, member, &relation.path);
            if values.is_empty() {
                report.missing_property(relation, member);
                continue;
            }

            let mut valid_values = Vec::new();
            for value in &values {
                if evaluate(category, relation.kind, &relation.value, value)? {
                    valid_values.push(value.lexical_form().to_string());
                }
            }

            if valid_values.is_empty() {
                let all_values: Vec<String> =
                    values.iter().map(|v| v.lexical_form().to_string()).collect();
                report.violation(relation, member, &all_values);
            } else {
                report.pass(relation, member, &valid_values);
            }
        }
    }

    Ok(report.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    // One declaring page plus one crawled target page, in the shape the
    // crawler merges into the accumulated graph.
    fn crawled_stream(member_values: &str) -> String {
        format!(
            r#"
            @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
            @prefix tree: <https://w3id.org/tree#> .
            @prefix ldes: <https://w3id.org/ldes#> .
            @prefix crawl: <http://example.org/> .
            @prefix sosa: <http://www.w3.org/ns/sosa/> .

            _:n0 a tree:Node ;
                rdf:subject <https://example.org/page1> ;
                tree:relation _:r0 .
            _:r0 a tree:GreaterThanRelation ;
                tree:node <https://example.org/page2> ;
                tree:value "2020-06-01"^^<http://www.w3.org/2001/XMLSchema#date> ;
                tree:path sosa:resultTime .

            <https://example.org/page2> a crawl:CrawledPage ;
                crawl:hasPageSource "https://example.org/page2" ;
                crawl:has_contents _:e0, _:e1 .
            _:e0 a ldes:EventStream ;
                rdf:subject <https://example.org/stream> ;
                tree:member <https://example.org/obs/1> .
            _:e1 rdf:subject <https://example.org/obs/1> {member_values} .
            "#
        )
    }

    #[test]
    fn test_existential_semantics_pass() {
        // One of the two values satisfies the assertion, so no failures.
        let content = crawled_stream(
            r#"; sosa:resultTime "2020-01-01"^^<http://www.w3.org/2001/XMLSchema#date>,
                "2021-01-01"^^<http://www.w3.org/2001/XMLSchema#date>"#,
        );
        let failures =
            validate_content(&content, RdfFormat::Turtle, RelationCategory::Temporal).unwrap();
        assert!(failures.is_empty(), "unexpected failures: {failures:?}");
    }

    #[test]
    fn test_predicate_violation() {
        let content = crawled_stream(
            r#"; sosa:resultTime "2021-01-01"^^<http://www.w3.org/2001/XMLSchema#date>"#,
        );
        let failures =
            validate_content(&content, RdfFormat::Turtle, RelationCategory::Temporal).unwrap();
        assert_eq!(failures.len(), 1);
        assert!(matches!(&failures[0], Finding::PredicateViolation { member, .. }
            if member == "https://example.org/obs/1"));
    }

    #[test]
    fn test_missing_property_finding() {
        let content = crawled_stream(
            r#"; <http://example.org/somethingElse> "x""#,
        );
        let failures =
            validate_content(&content, RdfFormat::Turtle, RelationCategory::Temporal).unwrap();
        assert_eq!(failures.len(), 1);
        assert!(matches!(&failures[0], Finding::MissingProperty { member, path, .. }
            if member == "https://example.org/obs/1"
                && path == "http://www.w3.org/ns/sosa/resultTime"));
    }

    #[test]
    fn test_category_mismatch_is_fatal() {
        let content = crawled_stream(
            r#"; sosa:resultTime "2021-01-01"^^<http://www.w3.org/2001/XMLSchema#date>"#,
        );
        let err = validate_content(&content, RdfFormat::Turtle, RelationCategory::Geospatial)
            .unwrap_err();
        assert!(matches!(err, ValidationError::KindNotInCategory { .. }));
    }

    #[test]
    fn test_no_members_summary_failure() {
        // The relation points at a page the crawl never recorded members
        // for, so the run closes with one summary failure.
        let content = r#"
            @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
            @prefix tree: <https://w3id.org/tree#> .
            _:n0 a tree:Node ;
                rdf:subject <https://example.org/page1> ;
                tree:relation _:r0 .
            _:r0 a tree:PrefixRelation ;
                tree:node <https://example.org/page2> ;
                tree:value "urn:item:" ;
                tree:path <http://purl.org/dc/terms/identifier> .
        "#;
        let failures =
            validate_content(content, RdfFormat::Turtle, RelationCategory::Lexical).unwrap();
        assert_eq!(failures.len(), 1);
        assert!(matches!(&failures[0], Finding::NoMembers { category } if category == "lexical"));
    }

    #[test]
    fn test_geospatial_end_to_end() {
        let content = r#"
            @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
            @prefix tree: <https://w3id.org/tree#> .
            @prefix ldes: <https://w3id.org/ldes#> .
            @prefix crawl: <http://example.org/> .
            @prefix geom: <http://www.opengis.net/ont/geosparql#> .

            _:n0 a tree:Node ;
                rdf:subject <https://example.org/page1> ;
                tree:relation _:r0 .
            _:r0 a tree:GeospatiallyContainsRelation ;
                tree:node <https://example.org/page2> ;
                tree:value "POLYGON((0 0,0 10,10 10,10 0,0 0))" ;
                tree:path geom:asWKT .

            <https://example.org/page2> a crawl:CrawledPage ;
                crawl:hasPageSource "https://example.org/page2" ;
                crawl:has_contents _:e0, _:e1, _:e2 .
            _:e0 a ldes:EventStream ;
                rdf:subject <https://example.org/stream> ;
                tree:member <https://example.org/obs/in>, <https://example.org/obs/out> .
            _:e1 rdf:subject <https://example.org/obs/in> ;
                geom:asWKT "POINT(5 5)" .
            _:e2 rdf:subject <https://example.org/obs/out> ;
                geom:asWKT "POINT(50 50)" .
        "#;
        let failures =
            validate_content(content, RdfFormat::Turtle, RelationCategory::Geospatial).unwrap();
        assert_eq!(failures.len(), 1);
        assert!(matches!(&failures[0], Finding::PredicateViolation { member, .. }
            if member == "https://example.org/obs/out"));
    }
}
