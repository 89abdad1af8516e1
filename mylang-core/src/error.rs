use thiserror::Error;

use crate::types::Type;

/// Every way a pipeline run can fail.
///
/// All variants except `InvariantViolation` describe user errors in the
/// source program. `InvariantViolation` signals a bug in the pipeline
/// itself and is unreachable for instruction sequences lowered from a
/// program that passed analysis.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("lex error at byte {position}: unexpected character {character:?}")]
    LexError { position: usize, character: char },
    #[error("parse error: expected {expected}, found {found}")]
    ParseError { expected: String, found: String },
    #[error("parse error: unknown statement starting with {found}")]
    UnknownStatement { found: String },
    #[error("variable '{0}' is already declared")]
    DuplicateDeclaration(String),
    #[error("undeclared variable '{0}'")]
    UndeclaredVariable(String),
    #[error("type mismatch in '+': {left} vs {right}")]
    TypeMismatch { left: Type, right: Type },
    #[error("runtime invariant violated: {0}")]
    InvariantViolation(&'static str),
}
