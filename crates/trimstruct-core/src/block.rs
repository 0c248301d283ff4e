use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::constants::{BASE_NAMESPACE, COMPATIBILITY_VERSION, STRUCTURE_VOID};
use crate::error::StructureError;
use crate::value::{Map, Value};

/// Value of a single block state (e.g. `color = "red"`, `age = 3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i32),
    String(String),
}

impl StateValue {
    /// Narrow a native value to a state value. Integers must fit in 32 bits.
    pub fn from_value(value: &Value) -> Option<StateValue> {
        match value {
            Value::Bool(b) => Some(StateValue::Bool(*b)),
            Value::Int(i) => i32::try_from(*i).ok().map(StateValue::Int),
            Value::String(s) => Some(StateValue::String(s.clone())),
            _ => None,
        }
    }
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        StateValue::Bool(v)
    }
}

impl From<i32> for StateValue {
    fn from(v: i32) -> Self {
        StateValue::Int(v)
    }
}

impl From<&str> for StateValue {
    fn from(v: &str) -> Self {
        StateValue::String(v.to_owned())
    }
}

impl From<String> for StateValue {
    fn from(v: String) -> Self {
        StateValue::String(v)
    }
}

impl From<StateValue> for Value {
    fn from(v: StateValue) -> Self {
        match v {
            StateValue::Bool(b) => Value::Bool(b),
            StateValue::Int(i) => Value::Int(i as i64),
            StateValue::String(s) => Value::String(s),
        }
    }
}

/// Block states keyed by name. Key order carries no meaning.
pub type BlockStates = BTreeMap<String, StateValue>;

/// A cell descriptor: namespaced block type, its states, per-instance extra
/// data and the compatibility version.
///
/// Equality and hashing cover identifier, states and version only. Two blocks
/// that differ just in `extra_data` are the same palette entry.
#[derive(Debug, Clone)]
pub struct Block {
    namespace: String,
    name: String,
    states: BlockStates,
    extra_data: Map,
    version: i32,
}

impl Block {
    /// Create a stateless block at the current compatibility version.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            states: BlockStates::new(),
            extra_data: Map::new(),
            version: COMPATIBILITY_VERSION,
        }
    }

    /// Parse `namespace:name`. Without a prefix (or with an empty one) the
    /// namespace is [`BASE_NAMESPACE`].
    pub fn from_identifier(identifier: &str) -> Result<Self, StructureError> {
        let (namespace, name) = match identifier.split_once(':') {
            Some((ns, name)) if !ns.is_empty() => (ns, name),
            Some((_, name)) => (BASE_NAMESPACE, name),
            None => (BASE_NAMESPACE, identifier),
        };
        if name.is_empty() {
            return Err(StructureError::InvalidIdentifier(identifier.to_owned()));
        }
        Ok(Self::new(namespace, name))
    }

    /// Parse an identifier and attach states and a version in one step.
    pub fn from_identifier_with<I, K, V>(
        identifier: &str,
        states: I,
        version: i32,
    ) -> Result<Self, StructureError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<StateValue>,
    {
        let mut block = Self::from_identifier(identifier)?.with_version(version);
        block.add_states(states);
        Ok(block)
    }

    /// The sentinel returned for void cells.
    pub fn void(version: i32) -> Self {
        Self::new(BASE_NAMESPACE, STRUCTURE_VOID).with_version(version)
    }

    pub fn is_void(&self) -> bool {
        self.namespace == BASE_NAMESPACE && self.name == STRUCTURE_VOID
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn with_state(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.states.insert(key.into(), value.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_data.insert(key, value);
        self
    }

    /// Merge states; existing keys are overwritten.
    pub fn add_states<I, K, V>(&mut self, states: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<StateValue>,
    {
        for (k, v) in states {
            self.states.insert(k.into(), v.into());
        }
    }

    /// Merge extra data; existing keys are overwritten.
    pub fn add_extra_data(&mut self, extra: &Map) {
        self.extra_data.merge(extra);
    }

    /// Copy with extra data cleared, i.e. the form stored in a palette.
    pub fn without_extra_data(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            states: self.states.clone(),
            extra_data: Map::new(),
            version: self.version,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace_and_name(&self) -> (&str, &str) {
        (&self.namespace, &self.name)
    }

    pub fn identifier(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    pub fn states(&self) -> &BlockStates {
        &self.states
    }

    pub fn extra_data(&self) -> &Map {
        &self.extra_data
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    /// Human-readable form: `namespace:name ["key":value,...]`.
    /// Display only, never written to a file.
    pub fn render(&self, with_namespace: bool, with_states: bool) -> String {
        let mut out = String::new();
        if with_namespace {
            out.push_str(&self.namespace);
            out.push(':');
        }
        out.push_str(&self.name);
        if with_states {
            let json = serde_json::to_string(&self.states).unwrap_or_default();
            let inner = json
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .unwrap_or("");
            out.push_str(" [");
            out.push_str(inner);
            out.push(']');
        }
        out
    }

    /// The `{name, states, version}` mapping written to `block_palette`.
    /// Extra data is never part of it.
    pub fn to_palette_value(&self) -> Value {
        let states: Map = self
            .states
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.clone())))
            .collect();
        let mut entry = Map::with_capacity(3);
        entry.insert("name", self.identifier());
        entry.insert("states", states);
        entry.insert("version", self.version);
        Value::Map(entry)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace
            && self.name == other.name
            && self.states == other.states
            && self.version == other.version
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.name.hash(state);
        self.states.hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true, true))
    }
}
