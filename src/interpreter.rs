use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{ErrorReporter, RuntimeError};
use crate::expr::{BinaryData, CallData, Expr, ExprId, SuperData};
use crate::function::Function;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{ClassData, Stmt};
use crate::token::{Token, Type};

/// Walks the AST and executes it. Borrows its output sink for the
/// duration of a single [`crate::Lox::run`] call — `globals` and the
/// resolver's depth table outlive it, owned by the caller, so state
/// persists across REPL inputs while the sink doesn't have to.
pub struct Interpreter<'a> {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: &'a mut HashMap<ExprId, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        globals: Rc<RefCell<Environment>>,
        locals: &'a mut HashMap<ExprId, usize>,
        output: &'a mut dyn Write,
    ) -> Self {
        Interpreter { environment: Rc::clone(&globals), globals, locals, output }
    }

    /// Records the resolver's computed scope distance for an
    /// expression, keyed by its parse-time [`ExprId`].
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Runs a program's statement list, top to bottom. A runtime error
    /// aborts the rest of the program and reports a single diagnostic.
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut ErrorReporter) {
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                reporter.runtime_error(&error);
                return;
            }
        }
    }

    /// Runs `statements` in `environment`, restoring the previous
    /// environment on every exit path including an early return or a
    /// propagated error.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<Option<Object>, RuntimeError> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(None);
        for statement in statements {
            match self.execute(statement) {
                Ok(Some(value)) => {
                    result = Ok(Some(value));
                    break;
                }
                Ok(None) => continue,
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }

        self.environment = previous;
        result
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Option<Object>, RuntimeError> {
        match stmt {
            Stmt::Block(data) => {
                let scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
                self.execute_block(&data.statements, scope)
            }
            Stmt::Class(data) => {
                self.execute_class(data)?;
                Ok(None)
            }
            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(None)
            }
            Stmt::Function(data) => {
                let function = Function::new(
                    data.name.clone(),
                    data.params.clone(),
                    data.body.clone(),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment
                    .borrow_mut()
                    .define(&data.name.lexeme, Object::Function(Rc::new(function)));
                Ok(None)
            }
            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(None)
                }
            }
            Stmt::Print(data) => {
                let value = self.evaluate(&data.expr)?;
                writeln!(self.output, "{value}").expect("output sink accepts writes");
                Ok(None)
            }
            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::nil(),
                };
                Ok(Some(value))
            }
            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::nil(),
                };
                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(None)
            }
            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.is_truthy() {
                    if let Some(value) = self.execute(&data.body)? {
                        return Ok(Some(value));
                    }
                }
                Ok(None)
            }
        }
    }

    fn execute_class(&mut self, data: &ClassData) -> Result<(), RuntimeError> {
        let superclass = match &data.superclass {
            Some(expr) => {
                let value = self.evaluate(expr)?;
                match value {
                    Object::Class(class) => Some(class),
                    _ => {
                        let Expr::Variable(variable) = expr else {
                            unreachable!("parser only emits Variable for a superclass expression")
                        };
                        return Err(RuntimeError::new(variable.name.clone(), "Superclass must be a class."));
                    }
                }
            }
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::nil());

        let method_environment = match &superclass {
            Some(superclass) => {
                let scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
                scope.borrow_mut().define("super", Object::Class(Rc::clone(superclass)));
                scope
            }
            None => Rc::clone(&self.environment),
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function_data) = method else {
                unreachable!("class bodies only contain Function statements")
            };

            let is_initializer = function_data.name.lexeme == "init";
            let function = Function::new(
                function_data.name.clone(),
                function_data.params.clone(),
                function_data.body.clone(),
                Rc::clone(&method_environment),
                is_initializer,
            );
            methods.insert(function_data.name.lexeme.clone(), Rc::new(function));
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);
        self.environment
            .borrow_mut()
            .assign(&data.name, Object::Class(Rc::new(RefCell::new(class))))?;

        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        match expr {
            Expr::Assign(data) => {
                let value = self.evaluate(&data.value)?;
                match self.locals.get(&data.id) {
                    Some(&distance) => {
                        self.environment.borrow_mut().assign_at(distance, &data.name, value.clone());
                    }
                    None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
                }
                Ok(value)
            }
            Expr::Binary(data) => self.evaluate_binary(data),
            Expr::Call(data) => self.evaluate_call(data),
            Expr::Get(data) => {
                let object = self.evaluate(&data.object)?;
                match &object {
                    Object::Instance(instance) => instance.borrow().get(&data.name, &object),
                    _ => Err(RuntimeError::new(data.name.clone(), "Only instances have properties.")),
                }
            }
            Expr::Grouping(data) => self.evaluate(&data.expr),
            Expr::Literal(literal) => Ok(Object::Literal(literal.clone())),
            Expr::Logical(data) => {
                let left = self.evaluate(&data.left)?;

                if data.operator.r#type == Type::Or {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }

                self.evaluate(&data.right)
            }
            Expr::Set(data) => {
                let object = self.evaluate(&data.object)?;
                match object {
                    Object::Instance(instance) => {
                        let value = self.evaluate(&data.value)?;
                        instance.borrow_mut().set(&data.name, value.clone());
                        Ok(value)
                    }
                    _ => Err(RuntimeError::new(data.name.clone(), "Only instances have fields.")),
                }
            }
            Expr::Super(data) => self.evaluate_super(data),
            Expr::This(data) => self.lookup_variable(data.id, &data.keyword),
            Expr::Unary(data) => {
                let right = self.evaluate(&data.expr)?;
                match data.operator.r#type {
                    Type::Bang => Ok(Object::from(!right.is_truthy())),
                    Type::Minus => match right {
                        Object::Literal(Literal::Number(n)) => Ok(Object::from(-n)),
                        _ => Err(RuntimeError::new(data.operator.clone(), "Operand must be a number.")),
                    },
                    _ => unreachable!("scanner/parser never produce other unary operators"),
                }
            }
            Expr::Variable(data) => self.lookup_variable(data.id, &data.name),
        }
    }

    fn lookup_variable(&self, id: ExprId, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(&distance) => self.environment.borrow().get_at(distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn evaluate_binary(&mut self, data: &BinaryData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::BangEqual => Ok(Object::from(!left.lox_eq(&right))),
            Type::EqualEqual => Ok(Object::from(left.lox_eq(&right))),
            Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual | Type::Minus
            | Type::Slash | Type::Star => {
                let (l, r) = Self::as_numbers(&data.operator, &left, &right)?;
                Ok(match data.operator.r#type {
                    Type::Greater => Object::from(l > r),
                    Type::GreaterEqual => Object::from(l >= r),
                    Type::Less => Object::from(l < r),
                    Type::LessEqual => Object::from(l <= r),
                    Type::Minus => Object::from(l - r),
                    Type::Slash => Object::from(l / r),
                    Type::Star => Object::from(l * r),
                    _ => unreachable!(),
                })
            }
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => {
                    Ok(Object::from(l + r))
                }
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::String(r))) => {
                    Ok(Object::from(format!("{l}{r}")))
                }
                _ => Err(RuntimeError::new(
                    data.operator.clone(),
                    "Operands must be two numbers or two strings.",
                )),
            },
            _ => unreachable!("scanner/parser never produce other binary operators"),
        }
    }

    fn as_numbers(operator: &Token, left: &Object, right: &Object) -> Result<(f64, f64), RuntimeError> {
        match (left, right) {
            (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok((*l, *r)),
            _ => Err(RuntimeError::new(operator.clone(), "Operands must be numbers.")),
        }
    }

    fn evaluate_call(&mut self, data: &CallData) -> Result<Object, RuntimeError> {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(function) => function.arity(),
            Object::NativeFunction(function) => function.arity(),
            Object::Class(class) => class.borrow().arity(),
            _ => return Err(RuntimeError::new(data.paren.clone(), "Can only call functions and classes.")),
        };

        if arguments.len() != arity {
            return Err(RuntimeError::new(
                data.paren.clone(),
                format!("Expected {arity} arguments but got {}.", arguments.len()),
            ));
        }

        match callee {
            Object::Function(function) => function.call(self, arguments),
            Object::NativeFunction(function) => function.call(self, arguments),
            Object::Class(class) => {
                let class_value = class.borrow().clone();
                class_value.call(self, arguments)
            }
            _ => unreachable!("arity check above already rejected non-callables"),
        }
    }

    fn evaluate_super(&mut self, data: &SuperData) -> Result<Object, RuntimeError> {
        let distance = *self
            .locals
            .get(&data.id)
            .expect("resolver always annotates 'super' expressions with a depth");

        let superclass = match self.environment.borrow().get_at(distance, &data.keyword)? {
            Object::Class(class) => class,
            _ => unreachable!("'super' always resolves to a Class value"),
        };

        let this_token = Token::new(Type::This, "this".to_string(), None, data.keyword.location);
        let instance = match self.environment.borrow().get_at(distance - 1, &this_token)? {
            Object::Instance(instance) => instance,
            _ => unreachable!("'this' always resolves to an Instance value one scope closer than 'super'"),
        };

        let method = superclass.borrow().get_method(&data.method.lexeme).ok_or_else(|| {
            RuntimeError::new(data.method.clone(), format!("Undefined property '{}'.", data.method.lexeme))
        })?;

        Ok(Object::Function(Rc::new(method.bind(Object::Instance(instance)))))
    }
}
