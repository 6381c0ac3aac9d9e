//! Structural checks on the accumulated graph, independent of any
//! relation category: well-formedness of the stream's own advertisement.

use crate::error::Result;
use crate::geometry::extract_wkt;
use crate::graph::Graph;
use crate::term::Term;
use crate::vocab::{rdf, tree};
use regex::Regex;

/// Every object of `tree:node` must itself be typed `tree:Node`.
/// Returns one failure per violating target, in discovery order.
pub fn untyped_relation_targets(graph: &Graph) -> Vec<String> {
    let tree_node = Term::Iri(tree::NODE.to_string());
    let mut failures = Vec::new();
    let mut reported = std::collections::HashSet::new();

    for triple in graph.triples_matching(None, Some(tree::NODE_PROP), None) {
        let Some(target) = triple.object.to_subject() else {
            continue;
        };
        if graph.contains(&target, rdf::TYPE, &tree_node) {
            continue;
        }
        if reported.insert(target.clone()) {
            failures.push(format!(
                "[{}] is tree:node of a tree:Relation, but not typed as tree:Node.",
                triple.object.lexical_form()
            ));
        }
    }

    failures
}

/// Every `tree:value` on a geospatial relation must carry a WKT shape.
pub fn values_without_wkt(graph: &Graph) -> Vec<String> {
    let geo_relation = Term::Iri(tree::GEOSPATIALLY_CONTAINS_RELATION.to_string());
    let mut failures = Vec::new();

    for relation in graph.subjects_with(rdf::TYPE, &geo_relation) {
        for value in graph.objects(relation, tree::VALUE) {
            if extract_wkt(value.lexical_form()).is_none() {
                failures.push(format!(
                    "Current value [{}] does not contain a WKT literal.",
                    value.lexical_form()
                ));
            }
        }
    }

    failures
}

/// Every value of `path` anywhere in the graph must match `pattern`.
pub fn values_not_matching(graph: &Graph, path: &str, pattern: &str) -> Result<Vec<String>> {
    let re = Regex::new(pattern)?;
    let mut failures = Vec::new();

    for triple in graph.triples_matching(None, Some(path), None) {
        let value = triple.object.lexical_form();
        if !re.is_match(value) {
            failures.push(format!(
                "Current value [{}] does not match the regular expression [{}].",
                value, pattern
            ));
        }
    }

    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RdfFormat;

    const STREAM: &str = r#"
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix tree: <https://w3id.org/tree#> .
        <https://example.org/page1> a tree:Node ;
            tree:relation _:r0, _:r1 .
        _:r0 a tree:GeospatiallyContainsRelation ;
            tree:node <https://example.org/page2> ;
            tree:value "POLYGON((0 0,0 1,1 1,1 0,0 0))" ;
            tree:path <http://www.opengis.net/ont/geosparql#asWKT> .
        _:r1 a tree:PrefixRelation ;
            tree:node <https://example.org/page3> ;
            tree:value "urn:item:" ;
            tree:path <http://purl.org/dc/terms/identifier> .
        <https://example.org/page2> a tree:Node .
    "#;

    #[test]
    fn test_untyped_target_reported_once() {
        let graph = Graph::parse(STREAM, RdfFormat::Turtle, None).unwrap();
        let failures = untyped_relation_targets(&graph);
        // page2 is typed, page3 is not.
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("https://example.org/page3"));
    }

    #[test]
    fn test_geospatial_value_carries_wkt() {
        let graph = Graph::parse(STREAM, RdfFormat::Turtle, None).unwrap();
        assert!(values_without_wkt(&graph).is_empty());

        let broken = STREAM.replace("POLYGON((0 0,0 1,1 1,1 0,0 0))", "not a shape");
        let graph = Graph::parse(&broken, RdfFormat::Turtle, None).unwrap();
        let failures = values_without_wkt(&graph);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("not a shape"));
    }

    #[test]
    fn test_values_regex_check() {
        let graph = Graph::parse(STREAM, RdfFormat::Turtle, None).unwrap();
        let failures =
            values_not_matching(&graph, "https://w3id.org/tree#value", "^urn:|^POLYGON").unwrap();
        assert!(failures.is_empty());

        let failures =
            values_not_matching(&graph, "https://w3id.org/tree#value", "^urn:").unwrap();
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let graph = Graph::parse(STREAM, RdfFormat::Turtle, None).unwrap();
        assert!(values_not_matching(&graph, "https://w3id.org/tree#value", "(unclosed").is_err());
    }
}
