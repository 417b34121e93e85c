//! # Token to Vector Map

use crate::types::{Vector, WTHashMap, hash_map_with_capacity};

/// A ``{ token -> vector }`` map which preserves first-encounter order.
///
/// Re-inserting a token replaces its vector but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorMap {
    tokens: Vec<String>,
    vectors: Vec<Vector>,
    index: WTHashMap<String, usize>,
}

impl VectorMap {
    /// Create an empty map with room for `capacity` tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
            vectors: Vec::with_capacity(capacity),
            index: hash_map_with_capacity(capacity),
        }
    }

    /// Insert or replace the vector for `token`.
    ///
    /// ## Returns
    /// The previous vector, if the token was already present.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        vector: Vector,
    ) -> Option<Vector> {
        let token = token.into();
        match self.index.get(&token) {
            Some(&pos) => Some(core::mem::replace(&mut self.vectors[pos], vector)),
            None => {
                self.index.insert(token.clone(), self.tokens.len());
                self.tokens.push(token);
                self.vectors.push(vector);
                None
            }
        }
    }

    /// Get the vector for `token`.
    pub fn get(
        &self,
        token: &str,
    ) -> Option<&[f32]> {
        self.index.get(token).map(|&pos| self.vectors[pos].as_slice())
    }

    /// Check if `token` is present.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.index.contains_key(token)
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in first-encounter order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// ``(token, vector)`` pairs in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.tokens
            .iter()
            .zip(self.vectors.iter())
            .map(|(token, vector)| (token.as_str(), vector.as_slice()))
    }
}

impl<S: Into<String>> FromIterator<(S, Vector)> for VectorMap {
    fn from_iter<I: IntoIterator<Item = (S, Vector)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (token, vector) in iter {
            map.insert(token, vector);
        }
        map
    }
}
