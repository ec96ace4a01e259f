use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of objects the Scheme domain can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjType {
    Function,
}

impl ObjType {
    pub const ALL: &'static [ObjType] = &[ObjType::Function];

    /// Key used in directive names and inventories.
    pub fn key(&self) -> &'static str {
        match self {
            ObjType::Function => "function",
        }
    }

    /// Human label, as shown in index entries.
    pub fn label(&self) -> &'static str {
        match self {
            ObjType::Function => "Scheme function",
        }
    }

    /// Cross-reference roles that may target this type.
    pub fn roles(&self) -> &'static [&'static str] {
        match self {
            ObjType::Function => &["func"],
        }
    }

    pub fn from_key(key: &str) -> Option<ObjType> {
        Self::ALL.iter().copied().find(|t| t.key() == key)
    }

    pub fn from_role(role: &str) -> Option<ObjType> {
        Self::ALL.iter().copied().find(|t| t.roles().contains(&role))
    }
}

impl fmt::Display for ObjType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_taxonomy() {
        let t = ObjType::Function;
        assert_eq!((t.key(), t.label(), t.roles()), ("function", "Scheme function", &["func"][..]));
        assert_eq!(ObjType::from_key("function"), Some(t));
        assert_eq!(ObjType::from_role("func"), Some(t));
        assert_eq!(ObjType::from_role("function"), None);
        assert_eq!(serde_json::to_string(&t).unwrap(), r#""function""#);
    }
}
