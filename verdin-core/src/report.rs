//! Finding collection for one validation run.
//!
//! Passing checks are logged, never reported. Failures accumulate in
//! discovery order (relations, then members within each relation) so two
//! runs over the same graph produce the same list.

use crate::evaluate::RelationCategory;
use crate::relation::RelationAssertion;
use crate::term::Term;
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub enum Finding {
    PredicateViolation {
        page: String,
        kind: String,
        related_page: String,
        member: String,
        values: Vec<String>,
        path: String,
        asserted: String,
    },
    MissingProperty {
        page: String,
        related_page: String,
        member: String,
        path: String,
    },
    NoMembers {
        category: String,
    },
}

fn join_values(values: &[String]) -> String {
    values.join(", ")
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::PredicateViolation {
                page,
                kind,
                related_page,
                member,
                values,
                path,
                asserted,
            } => write!(
                f,
                "Page [{}] has a [{}] relation with page [{}], but member [{}] defines invalid value(s): [{}] for property [{}] considering the relation's value of [{}].",
                page,
                kind,
                related_page,
                member,
                join_values(values),
                path,
                asserted
            ),
            Finding::MissingProperty {
                page,
                related_page,
                member,
                path,
            } => write!(
                f,
                "Page [{}] relates to page [{}], but member [{}] does not define the expected relation property [{}].",
                page, related_page, member, path
            ),
            Finding::NoMembers { category } => write!(
                f,
                "No members found for the provided page(s) with {} relations.",
                category
            ),
        }
    }
}

/// Collects pass/fail outcomes for one validation run.
#[derive(Debug)]
pub struct Report {
    category: RelationCategory,
    failures: Vec<Finding>,
    relations_checked: usize,
    members_seen: usize,
}

impl Report {
    pub fn new(category: RelationCategory) -> Self {
        Self {
            category,
            failures: Vec::new(),
            relations_checked: 0,
            members_seen: 0,
        }
    }

    pub fn note_relation(&mut self) {
        self.relations_checked += 1;
    }

    pub fn note_member(&mut self) {
        self.members_seen += 1;
    }

    /// A passing (relation, member) pair is logged, not reported.
    pub fn pass(&mut self, relation: &RelationAssertion, member: &Term, valid_values: &[String]) {
        debug!(
            "Member [{}] passed check [{}] for relation value [{}] with valid value(s): {}",
            member.lexical_form(),
            relation.kind,
            relation.value.lexical_form(),
            join_values(valid_values)
        );
    }

    pub fn violation(&mut self, relation: &RelationAssertion, member: &Term, values: &[String]) {
        self.failures.push(Finding::PredicateViolation {
            page: relation.page.clone(),
            kind: relation.kind.to_string(),
            related_page: relation.target_page.clone(),
            member: member.lexical_form().to_string(),
            values: values.to_vec(),
            path: relation.path.clone(),
            asserted: relation.value.lexical_form().to_string(),
        });
    }

    pub fn missing_property(&mut self, relation: &RelationAssertion, member: &Term) {
        self.failures.push(Finding::MissingProperty {
            page: relation.page.clone(),
            related_page: relation.target_page.clone(),
            member: member.lexical_form().to_string(),
            path: relation.path.clone(),
        });
    }

    /// Close the run: when relations were checked but no members were ever
    /// reachable, one summary failure is appended for the category.
    pub fn finish(mut self) -> Vec<Finding> {
        if self.relations_checked > 0 && self.members_seen == 0 {
            self.failures.push(Finding::NoMembers {
                category: self.category.to_string(),
            });
        }
        self.failures
    }
}
