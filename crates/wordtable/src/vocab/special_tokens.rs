//! # Special Tokens

use crate::{
    errors::{WTResult, WordtableError},
    types::{TokenType, WTHashMap, WTHashSet, token_index},
};

/// An ordered, validated set of reserved tokens with caller-fixed ids.
///
/// Token strings and ids are each unique. Reserved ids are expected to be
/// contiguous from 0; gaps are accepted but logged.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialTokens<T: TokenType> {
    entries: Vec<(String, T)>,
    index: WTHashMap<String, T>,
}

impl<T: TokenType> Default for SpecialTokens<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: WTHashMap::default(),
        }
    }
}

impl<T: TokenType> SpecialTokens<T> {
    /// Build a special-token set from ordered ``(token, id)`` pairs.
    ///
    /// ## Returns
    /// A `Config` error if a token or an id appears more than once.
    pub fn try_from_pairs<W, S>(pairs: W) -> WTResult<Self>
    where
        W: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut tokens = Self::default();
        for (token, id) in pairs {
            tokens.try_add(token.as_ref(), id)?;
        }
        tokens.check_contiguous();
        Ok(tokens)
    }

    /// Add a reserved token.
    pub fn try_add(
        &mut self,
        token: &str,
        id: T,
    ) -> WTResult<()> {
        if self.index.contains_key(token) {
            return Err(WordtableError::Config(format!(
                "duplicate special token {token:?}"
            )));
        }
        if let Some((other, _)) = self.entries.iter().find(|(_, t)| *t == id) {
            return Err(WordtableError::Config(format!(
                "special tokens {other:?} and {token:?} share id {id}"
            )));
        }

        self.index.insert(token.to_string(), id);
        self.entries.push((token.to_string(), id));
        Ok(())
    }

    fn check_contiguous(&self) {
        let ids: WTHashSet<usize> = self
            .entries
            .iter()
            .filter_map(|(_, id)| token_index(*id).ok())
            .collect();
        if (0..self.len()).any(|i| !ids.contains(&i)) {
            log::warn!(
                "Special token ids are not contiguous from 0: {:?}",
                self.entries
            );
        }
    }

    /// The number of special tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no special tokens.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate ``(token, id)`` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> {
        self.entries.iter().map(|(token, id)| (token.as_str(), *id))
    }

    /// Return the reserved id for `token`, if it is special.
    pub fn lookup_id(
        &self,
        token: &str,
    ) -> Option<T> {
        self.index.get(token).copied()
    }

    /// Check if `token` is special.
    pub fn contains_token(
        &self,
        token: &str,
    ) -> bool {
        self.index.contains_key(token)
    }

    /// The set of reserved ids.
    pub fn reserved_ids(&self) -> WTHashSet<T> {
        self.entries.iter().map(|(_, id)| *id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_tokens() {
        type T = u32;
        let specials: SpecialTokens<T> =
            SpecialTokens::try_from_pairs([("PAD", 0), ("EOS", 1)]).unwrap();

        assert_eq!(specials.len(), 2);
        assert!(!specials.is_empty());
        assert_eq!(specials.lookup_id("EOS"), Some(1));
        assert_eq!(specials.lookup_id("the"), None);
        assert!(specials.contains_token("PAD"));
        assert_eq!(
            specials.iter().collect::<Vec<_>>(),
            vec![("PAD", 0), ("EOS", 1)]
        );
        assert_eq!(
            specials.reserved_ids(),
            [0, 1].into_iter().collect::<WTHashSet<T>>()
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        type T = u32;
        assert!(matches!(
            SpecialTokens::<T>::try_from_pairs([("PAD", 0), ("PAD", 1)]),
            Err(WordtableError::Config(_))
        ));
        assert!(matches!(
            SpecialTokens::<T>::try_from_pairs([("PAD", 0), ("EOS", 0)]),
            Err(WordtableError::Config(_))
        ));
    }

    #[test]
    fn test_accepts_gaps() {
        type T = u16;
        let specials = SpecialTokens::<T>::try_from_pairs([("PAD", 0), ("EOS", 1), ("the", 5)])
            .unwrap();
        assert_eq!(specials.lookup_id("the"), Some(5));
    }
}
