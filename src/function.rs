use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::{Token, Type};

/// A user-defined function or method, closed over the environment it
/// was declared in. `is_initializer` marks `init` methods, which
/// implicitly return `this` regardless of an explicit `return`.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(
        name: Token,
        params: Vec<Token>,
        body: Vec<Stmt>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Function { name, params, body, closure, is_initializer }
    }

    /// Produces the method bound to `instance`: a fresh environment,
    /// parented by the method's original closure, with `this` defined.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);

        Function {
            name: self.name.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, arg) in self.params.iter().zip(arguments.into_iter()) {
            environment.define(&param.lexeme, arg);
        }

        let result = interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment)))?;

        if self.is_initializer {
            return self.closure.borrow().get_at(0, &Token::new(
                Type::This,
                "this".to_string(),
                None,
                self.name.location,
            ));
        }

        Ok(result.unwrap_or_else(Object::nil))
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

/// A builtin implemented in Rust rather than Lox source. Only `clock`
/// is part of the closed surface — an interactive `input` builtin
/// isn't in scope here.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: for<'i> fn(&mut Interpreter<'i>, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl NativeFunction {
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![NativeFunction {
            name: "clock",
            arity: 0,
            function: |_, _| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .expect("system clock to be after the Unix epoch")
                    .as_secs_f64();
                Ok(Object::from(now))
            },
        }]
    }
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
