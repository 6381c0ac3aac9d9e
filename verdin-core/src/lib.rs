pub mod error;
pub mod evaluate;
pub mod geometry;
pub mod graph;
pub mod member;
pub mod relation;
pub mod report;
pub mod shape;
pub mod temporal;
pub mod term;
pub mod validate;
pub mod vocab;

pub use error::ValidationError;
pub use evaluate::RelationCategory;
pub use graph::{Graph, RdfFormat};
pub use relation::{RelationAssertion, RelationKind};
pub use report::Finding;
pub use term::{Literal, Subject, Term, Triple};
pub use validate::{validate_content, validate_graph};
