use serde::{Deserialize, Serialize};

/// The attributed configuration tree parsed from a node's settings document.
///
/// Every settings document, and the workflow descriptor itself, is consumed in
/// this uniform shape: a `Leaf` carries one scalar value (with an optional type
/// tag from the source markup), a `Node` carries an ordered list of children.
/// Children are addressed by key; on duplicate keys the first match wins. This
/// is a documented assumption of the source format, not something we enforce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigElement {
    Leaf {
        key: String,
        #[serde(default)]
        type_tag: Option<String>,
        value: String,
    },
    Node {
        key: String,
        children: Vec<ConfigElement>,
    },
}

impl ConfigElement {
    /// Convenience constructor for a plain string leaf.
    pub fn leaf(key: &str, value: &str) -> Self {
        ConfigElement::Leaf {
            key: key.to_string(),
            type_tag: None,
            value: value.to_string(),
        }
    }

    /// Convenience constructor for a typed leaf.
    pub fn typed_leaf(key: &str, type_tag: &str, value: &str) -> Self {
        ConfigElement::Leaf {
            key: key.to_string(),
            type_tag: Some(type_tag.to_string()),
            value: value.to_string(),
        }
    }

    /// Convenience constructor for an inner node.
    pub fn node(key: &str, children: Vec<ConfigElement>) -> Self {
        ConfigElement::Node {
            key: key.to_string(),
            children,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ConfigElement::Leaf { key, .. } => key,
            ConfigElement::Node { key, .. } => key,
        }
    }

    /// Returns the first child (leaf or node) with the given key.
    ///
    /// Absence is "not configured", never an error; all accessors on this type
    /// fail closed the same way.
    pub fn find_child(&self, key: &str) -> Option<&ConfigElement> {
        match self {
            ConfigElement::Node { children, .. } => children.iter().find(|c| c.key() == key),
            ConfigElement::Leaf { .. } => None,
        }
    }

    /// Returns the scalar value of the first leaf child with the given key.
    pub fn get_value(&self, key: &str) -> Option<&str> {
        match self.find_child(key)? {
            ConfigElement::Leaf { value, .. } => Some(value),
            ConfigElement::Node { .. } => None,
        }
    }

    /// Returns the boolean value of the first leaf child with the given key.
    ///
    /// Leaves tagged as booleans by the source markup parse via their scalar
    /// value; untagged leaves are accepted when the value is literally `true`
    /// or `false`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get_value(key)? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Own scalar value, if this element is a leaf.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            ConfigElement::Leaf { value, .. } => Some(value),
            ConfigElement::Node { .. } => None,
        }
    }

    /// Reads an indexed list: children keyed by sequential stringified
    /// integers ("0", "1", ...), returned in numeric order. Children whose
    /// key does not parse as an integer are skipped.
    pub fn indexed_children(&self) -> Vec<&ConfigElement> {
        let mut indexed: Vec<(u64, &ConfigElement)> = match self {
            ConfigElement::Node { children, .. } => children
                .iter()
                .filter_map(|c| c.key().parse::<u64>().ok().map(|i| (i, c)))
                .collect(),
            ConfigElement::Leaf { .. } => Vec::new(),
        };
        indexed.sort_by_key(|(i, _)| *i);
        indexed.into_iter().map(|(_, c)| c).collect()
    }

    /// Converts a pre-decoded JSON document into the attributed tree.
    ///
    /// This is the boundary helper for container dumps that have already been
    /// decoded from their native markup: objects become inner nodes, arrays
    /// become indexed lists, scalars become typed leaves.
    pub fn from_json(key: &str, value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Object(map) => ConfigElement::Node {
                key: key.to_string(),
                children: map
                    .iter()
                    .map(|(k, v)| ConfigElement::from_json(k, v))
                    .collect(),
            },
            Value::Array(items) => ConfigElement::Node {
                key: key.to_string(),
                children: items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| ConfigElement::from_json(&i.to_string(), v))
                    .collect(),
            },
            Value::String(s) => Self::typed_leaf(key, "xstring", s),
            Value::Number(n) => {
                let tag = if n.is_i64() { "xint" } else { "xdouble" };
                Self::typed_leaf(key, tag, &n.to_string())
            }
            Value::Bool(b) => Self::typed_leaf(key, "xboolean", &b.to_string()),
            Value::Null => ConfigElement::Leaf {
                key: key.to_string(),
                type_tag: None,
                value: String::new(),
            },
        }
    }
}
