//! Killing test specifications.

use std::fmt;
use std::hash::{Hash, Hasher};

const UNKNOWN_METHOD: &str = "unknown";

/// A test parsed from PIT's `killingTest` value, e.g.
/// `com.example.FooTest.testBar(com.example.FooTest)`.
///
/// Nested test classes collapse onto their top-level class, and two
/// descriptors are equal when their class names are equal.
#[derive(Debug, Clone)]
pub struct TestDescriptor {
    spec: String,
    class_name: String,
    method_name: String,
}

impl TestDescriptor {
    pub fn parse(spec: &str) -> Self {
        let (class_part, method_name) = match spec.find('(') {
            Some(paren) => match spec[..paren].rfind('.') {
                Some(dot) => (&spec[..dot], &spec[dot + 1..paren]),
                None => (spec, UNKNOWN_METHOD),
            },
            None => (spec, UNKNOWN_METHOD),
        };
        let class_name = match spec.find('$') {
            Some(nested) => &spec[..nested],
            None => class_part,
        };

        Self {
            spec: spec.to_string(),
            class_name: class_name.to_string(),
            method_name: method_name.to_string(),
        }
    }

    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }
}

impl PartialEq for TestDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
    }
}

impl Eq for TestDescriptor {}

impl Hash for TestDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_name.hash(state);
    }
}

impl fmt::Display for TestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TestDescriptor{{class='{}', method='{}'}}",
            self.class_name, self.method_name
        )
    }
}
