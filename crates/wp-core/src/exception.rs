use serde::{Deserialize, Serialize};

pub const GENERIC_ERROR_CLASS: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionClass {
    name: String,
    // Ancestor names, nearest parent first. Matching walks this table
    // instead of any host-runtime reflection.
    lineage: Vec<String>,
    exception: bool,
}

impl ExceptionClass {
    pub fn error() -> Self {
        Self {
            name: GENERIC_ERROR_CLASS.to_string(),
            lineage: Vec::new(),
            exception: true,
        }
    }

    pub fn non_exception(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lineage: Vec::new(),
            exception: false,
        }
    }

    pub fn subclass(&self, name: impl Into<String>) -> Self {
        let mut lineage = Vec::with_capacity(self.lineage.len() + 1);
        lineage.push(self.name.clone());
        lineage.extend(self.lineage.iter().cloned());
        Self {
            name: name.into(),
            lineage,
            exception: self.exception,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_exception(&self) -> bool {
        self.exception
    }

    pub fn is_a(&self, other: &ExceptionClass) -> bool {
        self.name == other.name || self.lineage.iter().any(|ancestor| ancestor == &other.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exception {
    class: ExceptionClass,
    message: String,
}

impl Exception {
    pub fn new(class: ExceptionClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }

    pub fn of_class(class: ExceptionClass) -> Self {
        let message = class.name().to_string();
        Self { class, message }
    }

    pub fn class(&self) -> &ExceptionClass {
        &self.class
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_a(&self, class: &ExceptionClass) -> bool {
        self.class.is_a(class)
    }
}
