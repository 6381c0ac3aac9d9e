use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("RDF parse error: {0}")]
    Parse(String),

    #[error("Unknown serialization format: {0}")]
    UnknownFormat(String),

    #[error("Unknown relation category: {0}")]
    UnknownCategory(String),

    #[error("Unknown relation type [{0}]")]
    UnknownRelationKind(String),

    #[error("Relation type [{kind}] is not valid for {category} validation")]
    KindNotInCategory { kind: String, category: String },

    #[error("Unexpected type [{0}] for date-based property")]
    UnknownDatatype(String),

    #[error("Invalid WKT geometry: {0}")]
    InvalidWkt(String),

    #[error("Invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
