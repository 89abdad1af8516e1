//! Pipeline orchestration: one call from source text to executed output.

use crate::analyzer::{self, SymbolTable};
use crate::ast::Program;
use crate::error::CoreError;
use crate::interpreter;
use crate::ir::{self, Instr};
use crate::lexer::{self, Token};
use crate::optimizer;
use crate::parser;
use crate::value::Value;

/// Everything one run produces, stage by stage.
///
/// Each field is the complete output of its stage. Drivers that want
/// to show intermediate results read the fields directly; the printed
/// program output is `output`.
#[derive(Debug)]
pub struct RunArtifact {
    pub tokens: Vec<Token>,
    pub ast: Program,
    pub symbols: SymbolTable,
    pub optimized: Program,
    pub ir: Vec<Instr>,
    pub output: Vec<Value>,
}

/// Run the whole pipeline over one source string.
///
/// Stages run strictly in order and the first error short-circuits the
/// rest: execution never starts for a program that failed an earlier
/// stage. Every run builds its own state and shares nothing with other
/// runs.
pub fn run(source: &str) -> Result<RunArtifact, CoreError> {
    let tokens = lexer::lex(source)?;
    let ast = parser::parse(&tokens)?;
    let symbols = analyzer::analyze(&ast)?;
    let optimized = optimizer::optimize(&ast);
    let ir = ir::lower(&optimized);
    let output = interpreter::execute(&ir)?;
    Ok(RunArtifact {
        tokens,
        ast,
        symbols,
        optimized,
        ir,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Stmt};
    use crate::interpreter::execute;
    use crate::ir::lower;
    use crate::lexer::TokenKind;
    use crate::optimizer::optimize;

    #[test]
    fn runs_declaration_and_print() {
        let artifact = run("let x = 5; print(x + 2);").expect("run");
        assert_eq!(
            artifact.ir,
            vec![
                Instr::Push(Value::Int(5)),
                Instr::Store("x".into()),
                Instr::Load("x".into()),
                Instr::Push(Value::Int(2)),
                Instr::Add,
                Instr::Print,
            ]
        );
        assert_eq!(artifact.output, vec![Value::Int(7)]);
        assert!(matches!(
            artifact.tokens.last().map(|t| &t.kind),
            Some(TokenKind::Eof)
        ));
    }

    #[test]
    fn folds_constants_before_lowering() {
        let artifact = run("let y = 1 + 2; print(y);").expect("run");
        if let Stmt::VarDecl { expr, .. } = &artifact.optimized.body[0] {
            assert_eq!(*expr, Expr::Number(Value::Int(3)));
        } else {
            panic!("unexpected statement variant");
        }
        assert_eq!(
            artifact.ir,
            vec![
                Instr::Push(Value::Int(3)),
                Instr::Store("y".into()),
                Instr::Load("y".into()),
                Instr::Print,
            ]
        );
        assert_eq!(artifact.output, vec![Value::Int(3)]);
    }

    #[test]
    fn undeclared_variable_stops_the_run_before_execution() {
        let err = run("print(z);").unwrap_err();
        assert!(matches!(err, CoreError::UndeclaredVariable(name) if name == "z"));
    }

    #[test]
    fn duplicate_declaration_stops_the_run() {
        let err = run("let a = 1; let a = 2; print(a);").unwrap_err();
        assert!(matches!(err, CoreError::DuplicateDeclaration(name) if name == "a"));
    }

    #[test]
    fn chained_addition_is_a_parse_error() {
        let err = run("let a = 1 + 2 + 3;").unwrap_err();
        assert!(matches!(err, CoreError::ParseError { .. }));
    }

    #[test]
    fn optimizing_twice_yields_identical_execution_output() {
        let artifact = run("let y = 1 + 2; let z = y + 3; print(z);").expect("run");
        let twice = optimize(&artifact.optimized);
        let output = execute(&lower(&twice)).expect("execute");
        assert_eq!(output, artifact.output);
    }

    #[test]
    fn float_output_keeps_its_decimal_point() {
        let artifact = run("print(1.5 + 1.5);").expect("run");
        assert_eq!(artifact.output[0].to_string(), "3.0");
    }

    #[test]
    fn runs_share_no_state() {
        let first = run("let x = 1; print(x);").expect("run");
        // a second run must not see the first run's bindings
        let err = run("print(x);").unwrap_err();
        assert!(matches!(err, CoreError::UndeclaredVariable(_)));
        assert_eq!(first.output, vec![Value::Int(1)]);
    }
}
