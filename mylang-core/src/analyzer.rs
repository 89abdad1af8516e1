//! Semantic analysis: declaration checking and type inference.
//!
//! One depth-first pass over the AST in source order, threading a
//! symbol table. The table is returned to the caller on success, so a
//! run's bindings stay inspectable and the pass is reentrant: nothing
//! survives between separate calls.

use std::collections::HashMap;

use crate::ast::{BinOp, Expr, Program, Stmt};
use crate::error::CoreError;
use crate::types::Type;

/// Symbol table for a single analysis run.
///
/// Maps each declared variable name to its inferred type, built left
/// to right as declarations are encountered.
#[derive(Debug, Default, PartialEq)]
pub struct SymbolTable {
    entries: HashMap<String, Type>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: HashMap::new(),
        }
    }

    fn insert(&mut self, name: String, ty: Type) {
        self.entries.insert(name, ty);
    }

    pub fn lookup(&self, name: &str) -> Option<Type> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Analyze a whole program, producing its final symbol table.
///
/// The first violation aborts the pass; later pipeline stages must not
/// run on a program that failed here.
pub fn analyze(program: &Program) -> Result<SymbolTable, CoreError> {
    let mut symbols = SymbolTable::new();
    for stmt in &program.body {
        analyze_stmt(stmt, &mut symbols)?;
    }
    Ok(symbols)
}

fn analyze_stmt(stmt: &Stmt, symbols: &mut SymbolTable) -> Result<(), CoreError> {
    match stmt {
        Stmt::VarDecl { name, expr } => {
            if symbols.contains(name) {
                return Err(CoreError::DuplicateDeclaration(name.clone()));
            }
            let ty = type_of(expr, symbols)?;
            symbols.insert(name.clone(), ty);
            Ok(())
        }
        Stmt::Print { expr } => {
            // validation only, no binding produced
            type_of(expr, symbols)?;
            Ok(())
        }
    }
}

/// Infer the type of an expression against the bindings seen so far.
pub fn type_of(expr: &Expr, symbols: &SymbolTable) -> Result<Type, CoreError> {
    match expr {
        Expr::Number(_) => Ok(Type::Number),
        Expr::Identifier(name) => symbols
            .lookup(name)
            .ok_or_else(|| CoreError::UndeclaredVariable(name.clone())),
        Expr::Binary {
            op: BinOp::Add,
            left,
            right,
        } => {
            let left = type_of(left, symbols)?;
            let right = type_of(right, symbols)?;
            if left != right {
                return Err(CoreError::TypeMismatch { left, right });
            }
            Ok(left)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn parse_source(source: &str) -> Program {
        parse(&lex(source).expect("lex")).expect("parse")
    }

    #[test]
    fn binds_declared_variables_to_number() {
        let symbols = analyze(&parse_source("let x = 1; print(x);")).expect("analyze");
        assert_eq!(symbols.lookup("x"), Some(Type::Number));
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn print_produces_no_binding() {
        let symbols = analyze(&parse_source("print(1 + 2);")).expect("analyze");
        assert!(symbols.is_empty());
    }

    #[test]
    fn rejects_duplicate_declaration() {
        let err = analyze(&parse_source("let a = 1; let a = 2;")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateDeclaration(name) if name == "a"));
    }

    #[test]
    fn rejects_duplicate_declaration_regardless_of_values() {
        let err = analyze(&parse_source("let a = 1; let a = 1;")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateDeclaration(name) if name == "a"));
    }

    #[test]
    fn rejects_use_before_declaration() {
        let err = analyze(&parse_source("print(z);")).unwrap_err();
        assert!(matches!(err, CoreError::UndeclaredVariable(name) if name == "z"));
    }

    #[test]
    fn rejects_use_in_own_initializer() {
        let err = analyze(&parse_source("let a = a + 1;")).unwrap_err();
        assert!(matches!(err, CoreError::UndeclaredVariable(name) if name == "a"));
    }

    #[test]
    fn later_statements_see_earlier_bindings() {
        let symbols = analyze(&parse_source("let a = 1; let b = a + 2;")).expect("analyze");
        assert_eq!(symbols.lookup("b"), Some(Type::Number));
    }

    #[test]
    fn type_of_is_independently_callable_per_subtree() {
        let symbols = analyze(&parse_source("let a = 1;")).expect("analyze");
        let expr = Expr::Identifier("a".to_string());
        assert_eq!(type_of(&expr, &symbols).expect("type"), Type::Number);
    }
}
