use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A lexical scope: a name-to-value map chained to its enclosing scope.
/// Globals are the root environment (`enclosing: None`); every block,
/// function call, and loop iteration pushes a new one.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    pub variables: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            variables: HashMap::new(),
        }
    }

    /// `var` always succeeds, shadowing any outer binding of the same
    /// name — redeclaration in the same scope is a resolver-time
    /// error, not an environment-time one.
    pub fn define(&mut self, name: &str, value: Object) {
        self.variables.insert(name.to_string(), value);
    }

    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self
            .enclosing
            .clone()
            .expect("resolver-computed distance to match the live environment chain");

        for _ in 1..distance {
            let parent = environment
                .borrow()
                .enclosing
                .clone()
                .expect("resolver-computed distance to match the live environment chain");
            environment = parent;
        }

        environment
    }

    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError::new(
            name.clone(),
            format!("Undefined variable '{}'.", name.lexeme),
        ))
    }

    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance)
                .borrow_mut()
                .variables
                .insert(name.lexeme.clone(), value);
        } else {
            self.variables.insert(name.lexeme.clone(), value);
        }
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(variable) = self.variables.get(&name.lexeme) {
            return Ok(variable.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError::new(
            name.clone(),
            format!("Undefined variable '{}'.", name.lexeme),
        ))
    }

    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        if distance > 0 {
            match self.ancestor(distance).borrow().variables.get(&name.lexeme) {
                Some(variable) => Ok(variable.clone()),
                None => Err(RuntimeError::new(
                    name.clone(),
                    format!("Undefined variable '{}'.", name.lexeme),
                )),
            }
        } else {
            match self.variables.get(&name.lexeme) {
                Some(variable) => Ok(variable.clone()),
                None => Err(RuntimeError::new(
                    name.clone(),
                    format!("Undefined variable '{}'.", name.lexeme),
                )),
            }
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Location, Type};

    fn name(lexeme: &str) -> Token {
        Token::new(Type::Identifier, lexeme.to_string(), None, Location::new(0, 0))
    }

    #[test]
    fn shadowing_define_overwrites_in_same_scope() {
        let mut env = Environment::default();
        env.define("x", Object::from(1.0));
        env.define("x", Object::from(2.0));
        assert!(matches!(env.get(&name("x")), Ok(Object::Literal(crate::literal::Literal::Number(n))) if n == 2.0));
    }

    #[test]
    fn assign_walks_enclosing_chain() {
        let global = Rc::new(RefCell::new(Environment::default()));
        global.borrow_mut().define("x", Object::from(1.0));
        let mut local = Environment::new(Some(Rc::clone(&global)));
        local.assign(&name("x"), Object::from(9.0)).unwrap();
        assert!(matches!(global.borrow().get(&name("x")), Ok(Object::Literal(crate::literal::Literal::Number(n))) if n == 9.0));
    }

    #[test]
    fn undefined_get_is_runtime_error() {
        let env = Environment::default();
        assert!(env.get(&name("missing")).is_err());
    }
}
