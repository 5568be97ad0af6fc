//! The attribute table that is attached to every graph, node and edge.
//!
//! Attributes are stored as raw strings, in insertion order. The typed
//! accessors parse the raw value on every call, and return None if the
//! attribute is missing or if the value does not parse as the requested type.

use crate::gv::parser::ast::{AttributeList, DotString};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    list: Vec<(String, DotString)>,
}

fn warn_unparsable(_name: &str, _value: &str, _kind: &str) {
    #[cfg(feature = "log")]
    log::warn!(
        "Can't parse attribute {}=\"{}\" as {}",
        _name,
        _value,
        _kind
    );
}

impl AttributeTable {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Sets the attribute \p name. An existing value is overwritten in place,
    /// so the original insertion order is kept.
    pub fn set(&mut self, name: &str, value: DotString) {
        for pair in self.list.iter_mut() {
            if pair.0 == name {
                pair.1 = value;
                return;
            }
        }
        self.list.push((name.to_string(), value));
    }

    pub fn set_str(&mut self, name: &str, value: &str) {
        self.set(name, DotString::String(value.to_string()));
    }

    /// Copies all of the attributes in \p other into this table. Values in
    /// \p other win.
    pub fn merge(&mut self, other: &AttributeTable) {
        for (name, value) in other.iter() {
            self.set(name, value.clone());
        }
    }

    pub fn merge_list(&mut self, other: &AttributeList) {
        for (name, value) in other.iter() {
            self.set(name, value.clone());
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<DotString> {
        let idx = self.list.iter().position(|pair| pair.0 == name)?;
        Some(self.list.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&DotString> {
        self.list
            .iter()
            .find(|pair| pair.0 == name)
            .map(|pair| &pair.1)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<(String, DotString)> {
        self.list.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|pair| pair.0.as_str())
    }

    /// Returns the raw text of the attribute. Html strings are returned
    /// without the enclosing brackets.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).map(|v| v.as_str())
    }

    pub fn get_real(&self, name: &str) -> Option<f64> {
        let value = self.get_string(name)?;
        match value.trim().parse::<f64>() {
            Result::Ok(x) => Some(x),
            Result::Err(_) => {
                warn_unparsable(name, value, "a number");
                None
            }
        }
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        let value = self.get_string(name)?;
        match value.trim().parse::<i64>() {
            Result::Ok(x) => Some(x),
            Result::Err(_) => {
                warn_unparsable(name, value, "an integer");
                None
            }
        }
    }

    /// Parses a list of numbers that are separated by commas and/or spaces,
    /// such as "pos" ("x,y") or "bb" ("llx,lly,urx,ury"). A trailing '!'
    /// (a pinned position) is ignored.
    pub fn get_reals(&self, name: &str) -> Option<Vec<f64>> {
        let value = self.get_string(name)?;
        let text = value.trim();
        let text = text.strip_suffix('!').unwrap_or(text);

        let mut result = Vec::new();
        for part in text.split(|c: char| c == ',' || c.is_whitespace()) {
            if part.is_empty() {
                continue;
            }
            match part.parse::<f64>() {
                Result::Ok(x) => result.push(x),
                Result::Err(_) => {
                    warn_unparsable(name, value, "a list of numbers");
                    return None;
                }
            }
        }
        if result.is_empty() {
            warn_unparsable(name, value, "a list of numbers");
            return None;
        }
        Some(result)
    }

    /// Parses a boolean: true/false, yes/no (any case), or an integer where
    /// anything but zero is true.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        let value = self.get_string(name)?;
        let text = value.trim();
        match text.to_ascii_lowercase().as_str() {
            "true" | "yes" => return Some(true),
            "false" | "no" => return Some(false),
            _ => {}
        }
        match text.parse::<i64>() {
            Result::Ok(x) => Some(x != 0),
            Result::Err(_) => {
                warn_unparsable(name, value, "a boolean");
                None
            }
        }
    }
}

impl From<&AttributeList> for AttributeTable {
    fn from(list: &AttributeList) -> Self {
        let mut table = AttributeTable::new();
        table.merge_list(list);
        table
    }
}

#[test]
fn test_attribute_order() {
    let mut table = AttributeTable::new();
    table.set_str("color", "red");
    table.set_str("shape", "box");
    table.set_str("color", "blue");

    let names: Vec<&str> = table.names().collect();
    assert_eq!(names, vec!["color", "shape"]);
    assert_eq!(table.get_string("color"), Some("blue"));
    assert_eq!(table.len(), 2);

    assert_eq!(table.remove("color"), Some(DotString::String("blue".into())));
    assert!(!table.has("color"));
}

#[test]
fn test_typed_accessors() {
    let mut table = AttributeTable::new();
    table.set_str("width", "0.75");
    table.set_str("pos", "27,18!");
    table.set_str("bb", "0 0 54.0 108");
    table.set_str("label", "hello");
    table.set_str("fixedsize", "Yes");
    table.set_str("center", "0");

    assert_eq!(table.get_real("width"), Some(0.75));
    assert_eq!(table.get_reals("pos"), Some(vec![27., 18.]));
    assert_eq!(table.get_reals("bb"), Some(vec![0., 0., 54., 108.]));
    assert_eq!(table.get_bool("fixedsize"), Some(true));
    assert_eq!(table.get_bool("center"), Some(false));

    // Present, but not of the requested type.
    assert_eq!(table.get_real("label"), None);
    assert_eq!(table.get_reals("label"), None);
    assert_eq!(table.get_bool("label"), None);
    assert_eq!(table.get_integer("width"), None);

    // Missing.
    assert_eq!(table.get_real("height"), None);
    assert_eq!(table.get_string("height"), None);
}
