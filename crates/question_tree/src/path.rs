use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered chain of sibling-scoped ids from a root node down to a node.
///
/// Ids are only unique among siblings, so a node is addressed by the ids of
/// every ancestor plus its own, e.g. `["Collections", "Spring"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path of a child with the given id.
    pub fn child(&self, id: impl Into<String>) -> Self {
        let mut ids = Vec::with_capacity(self.0.len() + 1);
        ids.extend(self.0.iter().cloned());
        ids.push(id.into());
        Self(ids)
    }

    /// The path of the parent node, or `None` for root-level nodes (and the empty path).
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self(rest.to_vec())),
            _ => None,
        }
    }

    /// Whether `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Canonical lookup key: the JSON array encoding of the ids.
    pub fn key(&self) -> PathKey {
        let encoded = Value::from_iter(self.0.iter().map(String::as_str)).to_string();
        PathKey(encoded)
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<String>> for Path {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

impl From<&[&str]> for Path {
    fn from(ids: &[&str]) -> Self {
        Self::new(ids.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(ids: [&str; N]) -> Self {
        Self::new(ids)
    }
}

/// Tree-wide unique lookup key for a node, derived from its [`Path`].
///
/// This is only a map key. Display identity stays with the node id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathKey(String);

impl PathKey {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the key back into a [`Path`]. Returns `None` for strings that were not
    /// produced by [`Path::key`].
    pub fn to_path(&self) -> Option<Path> {
        serde_json::from_str::<Vec<String>>(&self.0)
            .ok()
            .map(Path::from)
    }
}

impl From<&Path> for PathKey {
    fn from(path: &Path) -> Self {
        path.key()
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_compact_json_array() {
        let path = Path::from(["Collections", "Spring"]);
        assert_eq!(path.key().as_str(), r#"["Collections","Spring"]"#);
    }

    #[test]
    fn key_escapes_ids() {
        let path = Path::from(["a\"b", "c,d"]);
        let key = path.key();
        assert_eq!(key.as_str(), r#"["a\"b","c,d"]"#);
        assert_eq!(key.to_path(), Some(path));
    }

    #[test]
    fn keys_differ_where_joined_ids_would_collide() {
        let a = Path::from(["a,b"]);
        let b = Path::from(["a", "b"]);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn parent_and_child() {
        let path = Path::from(["Collections"]).child("Spring");
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some("Spring"));
        assert_eq!(path.parent(), Some(Path::from(["Collections"])));
        assert_eq!(Path::from(["Home"]).parent(), None);
        assert!(path.starts_with(&Path::from(["Collections"])));
        assert!(!Path::from(["Collections"]).starts_with(&path));
    }

    #[test]
    fn foreign_strings_do_not_decode() {
        let path = Path::from(["x"]);
        let mut key = path.key();
        key.0.push('!');
        assert_eq!(key.to_path(), None);
    }
}
