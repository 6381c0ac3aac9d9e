//! Member resolution over the accumulated graph.
//!
//! A page's members live behind two hops: the page entity links its
//! anonymized content entities via `crawl:has_contents`, and the content
//! entity typed `ldes:EventStream` lists members via `tree:member`.
//! Member property values are read off the anonymized entity whose
//! `rdf:subject` provenance points back at the member's original IRI.

use crate::graph::Graph;
use crate::term::{Literal, Term};
use crate::vocab::{crawl, ldes, rdf, tree};
use rustc_hash::FxHashSet;

/// The member entities recorded under a crawled page.
pub fn members_of(graph: &Graph, target_page: &str) -> Vec<Term> {
    let crawled_page = Term::Iri(crawl::CRAWLED_PAGE.to_string());
    let event_stream = Term::Iri(ldes::EVENT_STREAM.to_string());
    let source = Term::Literal(Literal::plain(target_page));

    let mut seen = FxHashSet::default();
    let mut members = Vec::new();

    for page in graph.subjects_with(rdf::TYPE, &crawled_page) {
        if !graph.contains(page, crawl::HAS_PAGE_SOURCE, &source) {
            continue;
        }
        for content_term in graph.objects(page, crawl::HAS_CONTENTS) {
            let Some(content) = content_term.to_subject() else {
                continue;
            };
            if !graph.contains(&content, rdf::TYPE, &event_stream) {
                continue;
            }
            for member in graph.objects(&content, tree::MEMBER) {
                if seen.insert(member.clone()) {
                    members.push(member.clone());
                }
            }
        }
    }

    members
}

/// Every recorded value of `path` for the given member.
///
/// Members may carry several values for one property; all of them are
/// returned so the caller can apply existential semantics.
pub fn values_of(graph: &Graph, member: &Term, path: &str) -> Vec<Term> {
    let mut values = Vec::new();
    for entity in graph.subjects_with(rdf::SUBJECT, member) {
        for value in graph.objects(entity, path) {
            values.push(value.clone());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RdfFormat;

    // The shape the crawler produces after anonymizing one page.
    const CRAWLED: &str = r#"
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix tree: <https://w3id.org/tree#> .
        @prefix ldes: <https://w3id.org/ldes#> .
        @prefix crawl: <http://example.org/> .
        <https://example.org/page2> a crawl:CrawledPage ;
            crawl:hasPageSource "https://example.org/page2" ;
            crawl:has_contents _:e0, _:e1 .
        _:e0 a ldes:EventStream ;
            rdf:subject <https://example.org/stream> ;
            tree:member <https://example.org/obs/1> .
        _:e1 rdf:subject <https://example.org/obs/1> ;
            <http://www.w3.org/ns/sosa/resultTime>
                "2023-01-01"^^<http://www.w3.org/2001/XMLSchema#date>,
                "2024-01-01"^^<http://www.w3.org/2001/XMLSchema#date> .
    "#;

    #[test]
    fn test_members_of_target_page() {
        let graph = Graph::parse(CRAWLED, RdfFormat::Turtle, None).unwrap();
        let members = members_of(&graph, "https://example.org/page2");
        assert_eq!(
            members,
            vec![Term::Iri("https://example.org/obs/1".to_string())]
        );
    }

    #[test]
    fn test_members_of_unknown_page_is_empty() {
        let graph = Graph::parse(CRAWLED, RdfFormat::Turtle, None).unwrap();
        assert!(members_of(&graph, "https://example.org/nowhere").is_empty());
    }

    #[test]
    fn test_values_of_returns_all_values() {
        let graph = Graph::parse(CRAWLED, RdfFormat::Turtle, None).unwrap();
        let member = Term::Iri("https://example.org/obs/1".to_string());
        let values = values_of(&graph, &member, "http://www.w3.org/ns/sosa/resultTime");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_values_of_missing_property() {
        let graph = Graph::parse(CRAWLED, RdfFormat::Turtle, None).unwrap();
        let member = Term::Iri("https://example.org/obs/1".to_string());
        assert!(values_of(&graph, &member, "http://example.org/missing").is_empty());
    }
}
