use std::collections::HashMap;
use std::mem;

use crate::error::ErrorReporter;
use crate::expr::{Expr, ExprId};
use crate::interpreter::Interpreter;
use crate::stmt::Stmt;
use crate::token::Token;

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Static pre-pass over the AST that computes, for every variable
/// reference, how many enclosing scopes up its binding lives. Also the
/// home of every check that's syntactically valid but semantically
/// wrong: `this`/`return`/`super` misuse, self-inheriting classes,
/// re-declaration in one scope, and reading a local from inside its
/// own initializer.
pub struct Resolver<'a, 'b> {
    interpreter: &'a mut Interpreter<'b>,
    reporter: &'a mut ErrorReporter,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'b> Resolver<'a, 'b> {
    pub fn new(interpreter: &'a mut Interpreter<'b>, reporter: &'a mut ErrorReporter) -> Self {
        Resolver {
            interpreter,
            reporter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve(&data.statements);
                self.end_scope();
            }
            Stmt::Class(data) => self.resolve_class(data),
            Stmt::Expression(data) => self.resolve_expr(&data.expr),
            Stmt::Function(data) => {
                self.declare(&data.name);
                self.define(&data.name);
                self.resolve_function(&data.params, &data.body, FunctionType::Function);
            }
            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::Print(data) => self.resolve_expr(&data.expr),
            Stmt::Return(data) => {
                if self.current_function == FunctionType::None {
                    self.reporter.resolve_error(&data.keyword, "Can't return from top-level code.");
                }

                if let Some(value) = &data.value {
                    if self.current_function == FunctionType::Initializer {
                        self.reporter
                            .resolve_error(&data.keyword, "Can't return a value from an initializer.");
                    }
                    self.resolve_expr(value);
                }
            }
            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            }
            Stmt::While(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.body);
            }
        }
    }

    fn resolve_class(&mut self, data: &crate::stmt::ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&data.name);
        self.define(&data.name);

        if let Some(superclass) = &data.superclass {
            let Expr::Variable(variable) = superclass else { unreachable!("parser only emits Variable for superclass") };

            if data.name.lexeme == variable.name.lexeme {
                self.reporter.resolve_error(&variable.name, "A class can't inherit from itself.");
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            self.begin_scope();
            self.scopes.last_mut().expect("scope just pushed").insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes.last_mut().expect("scope just pushed").insert("this".to_string(), true);

        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!("class body only contains Function stmts") };

            let kind = if function.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(&function.params, &function.body, kind);
        }

        self.end_scope();

        if data.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(data.id, &data.name);
            }
            Expr::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            }
            Expr::Call(data) => {
                self.resolve_expr(&data.callee);
                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            }
            Expr::Get(data) => self.resolve_expr(&data.object),
            Expr::Grouping(data) => self.resolve_expr(&data.expr),
            Expr::Literal(_) => {}
            Expr::Logical(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            }
            Expr::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            }
            Expr::Super(data) => {
                match self.current_class {
                    ClassType::Subclass => {}
                    ClassType::None => {
                        self.reporter.resolve_error(&data.keyword, "Can't use 'super' outside of a class.");
                    }
                    ClassType::Class => {
                        self.reporter
                            .resolve_error(&data.keyword, "Can't use 'super' in a class with no superclass.");
                    }
                }
                self.resolve_local(data.id, &data.keyword);
            }
            Expr::This(data) => {
                if self.current_class == ClassType::None {
                    self.reporter.resolve_error(&data.keyword, "Can't use 'this' outside of a class.");
                    return;
                }
                self.resolve_local(data.id, &data.keyword);
            }
            Expr::Unary(data) => self.resolve_expr(&data.expr),
            Expr::Variable(data) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&data.name.lexeme) == Some(&false) {
                        self.reporter
                            .resolve_error(&data.name, "Can't read local variable in its own initializer.");
                    }
                }
                self.resolve_local(data.id, &data.name);
            }
        }
    }

    fn resolve_function(&mut self, params: &[Token], body: &[Stmt], kind: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.reporter.resolve_error(name, "Already a variable with this name in this scope.");
        }
        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        scope.insert(name.lexeme.clone(), true);
    }

    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, depth);
                return;
            }
        }
        // Not found in any scope: treated as global, resolved at call time.
    }
}
