use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::Function;
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::token::Token;

/// A class declaration. `superclass` links the single-inheritance
/// chain; method lookup walks it on a local miss.
#[derive(Clone)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<RefCell<Class>>>,
    pub methods: HashMap<String, Rc<Function>>,
}

impl Class {
    pub fn new(
        name: String,
        superclass: Option<Rc<RefCell<Class>>>,
        methods: HashMap<String, Rc<Function>>,
    ) -> Self {
        Class { name, superclass, methods }
    }

    pub fn get_method(&self, name: &str) -> Option<Rc<Function>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }

        self.superclass.as_ref()?.borrow().get_method(name)
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Callable for Class {
    /// A class's arity is its initializer's, or 0 if it declares none.
    fn arity(&self) -> usize {
        self.get_method("init").map(|init| init.arity()).unwrap_or(0)
    }

    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let class = Rc::new(RefCell::new(self.clone()));
        let instance = Rc::new(RefCell::new(Instance::new(class)));

        if let Some(initializer) = self.get_method("init") {
            let bound = initializer.bind(Object::Instance(Rc::clone(&instance)));
            bound.call(interpreter, arguments)?;
        }

        Ok(Object::Instance(instance))
    }
}

/// A live object: a class pointer plus an open-ended field map.
/// Methods are resolved through the class, not stored per-instance.
#[derive(Debug, Clone)]
pub struct Instance {
    pub class: Rc<RefCell<Class>>,
    pub fields: HashMap<String, Object>,
}

impl Instance {
    pub fn new(class: Rc<RefCell<Class>>) -> Self {
        Instance { class, fields: HashMap::new() }
    }

    pub fn get(&self, name: &Token, this: &Object) -> Result<Object, RuntimeError> {
        if let Some(field) = self.fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        if let Some(method) = self.class.borrow().get_method(&name.lexeme) {
            return Ok(Object::Function(Rc::new(method.bind(this.clone()))));
        }

        Err(RuntimeError::new(
            name.clone(),
            format!("Undefined property '{}'.", name.lexeme),
        ))
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.borrow().name)
    }
}

impl Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.name)
    }
}
