//! # Embedding Table

use crate::{
    embedding::EmbeddingMatrix,
    errors::{WTResult, WordtableError},
    tokenize::SentenceTokenizer,
    types::{TokenType, WTHashMap, WTHashSet, hash_map_with_capacity, token_index},
    vocab::VectorMap,
};

/// An immutable vocabulary snapshot.
///
/// Every token has exactly one vector and exactly one id, and no two tokens
/// share an id.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding<T: TokenType> {
    dim: usize,
    vectors: VectorMap,
    ids: WTHashMap<String, T>,
}

impl<T: TokenType> Embedding<T> {
    /// Assemble an embedding from its maps, checking their consistency.
    ///
    /// ## Arguments
    /// * `dim` - the vector dimension.
    /// * `vectors` - the ``{ token -> vector }`` map.
    /// * `ids` - the ``{ token -> id }`` map.
    ///
    /// ## Returns
    /// A `Config` error if the maps disagree on their tokens, or two tokens share an id.
    pub fn from_parts(
        dim: usize,
        vectors: VectorMap,
        ids: WTHashMap<String, T>,
    ) -> WTResult<Self> {
        if vectors.len() != ids.len() {
            return Err(WordtableError::Config(format!(
                "vector map has {} tokens but id map has {}",
                vectors.len(),
                ids.len()
            )));
        }

        if let Some(token) = vectors.tokens().find(|token| !ids.contains_key(*token)) {
            return Err(WordtableError::Config(format!(
                "token {token:?} has a vector but no id"
            )));
        }

        let mut seen: WTHashSet<T> = WTHashSet::default();
        for (token, id) in &ids {
            if !seen.insert(*id) {
                return Err(WordtableError::Config(format!(
                    "id {id} is assigned more than once (at {token:?})"
                )));
            }
        }

        Ok(Self { dim, vectors, ids })
    }

    /// The number of tokens.
    pub fn size(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// The vector dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The ``{ token -> vector }`` map.
    pub fn vectors(&self) -> &VectorMap {
        &self.vectors
    }

    /// The ``{ token -> id }`` map.
    pub fn ids(&self) -> &WTHashMap<String, T> {
        &self.ids
    }

    /// Get the vector for `token`.
    pub fn vector(
        &self,
        token: &str,
    ) -> Option<&[f32]> {
        self.vectors.get(token)
    }

    /// Get the id for `token`.
    pub fn id(
        &self,
        token: &str,
    ) -> Option<T> {
        self.ids.get(token).copied()
    }

    /// The largest assigned id.
    pub fn max_id(&self) -> Option<T> {
        self.ids.values().max().copied()
    }

    /// Build the ``{ id -> token }`` view.
    ///
    /// ## Returns
    /// An `EmptyState` error if there are no ids.
    pub fn reverse_vocabulary(&self) -> WTResult<WTHashMap<T, String>> {
        if self.ids.is_empty() {
            return Err(WordtableError::EmptyState("id map"));
        }

        let mut reverse = hash_map_with_capacity(self.ids.len());
        reverse.extend(self.ids.iter().map(|(token, &id)| (id, token.clone())));
        Ok(reverse)
    }

    /// Tokens sorted by id.
    pub fn tokens_by_id(&self) -> Vec<(T, &str)> {
        let mut items: Vec<(T, &str)> = self
            .ids
            .iter()
            .map(|(token, &id)| (id, token.as_str()))
            .collect();
        items.sort_by_key(|(id, _)| *id);
        items
    }

    /// Look up the id of each token in a sequence.
    pub fn lookup_ids<S: AsRef<str>>(
        &self,
        tokens: impl IntoIterator<Item = S>,
    ) -> Vec<Option<T>> {
        tokens
            .into_iter()
            .map(|token| self.id(token.as_ref()))
            .collect()
    }

    /// Map a token sequence to ids, substituting `unknown` for missing tokens.
    pub fn encode<S: AsRef<str>>(
        &self,
        tokens: impl IntoIterator<Item = S>,
        unknown: T,
    ) -> Vec<T> {
        tokens
            .into_iter()
            .map(|token| self.id(token.as_ref()).unwrap_or(unknown))
            .collect()
    }

    /// Tokenize `text` and map the tokens to ids.
    pub fn encode_text(
        &self,
        tokenizer: &impl SentenceTokenizer,
        text: &str,
        unknown: T,
    ) -> Vec<T> {
        self.encode(tokenizer.tokenize(text), unknown)
    }

    fn check_dimensions(&self) -> WTResult<()> {
        match self
            .vectors
            .iter()
            .find(|(_, vector)| vector.len() != self.dim)
        {
            Some((token, vector)) => Err(WordtableError::DimensionMismatch {
                token: token.to_string(),
                expected: self.dim,
                actual: vector.len(),
            }),
            None => Ok(()),
        }
    }

    /// Build the dense ``(max_id + 1, dim)`` embedding matrix.
    ///
    /// Row `i` holds the vector of the token with id `i`; rows for unassigned
    /// ids are zero. The matrix is rebuilt on every call.
    ///
    /// ## Returns
    /// A `DimensionMismatch` error if any vector's length differs from [`dim`](Self::dim);
    /// a `TokenOutOfRange` or `MatrixTooLarge` error if the largest id cannot index a matrix.
    pub fn build_matrix(&self) -> WTResult<EmbeddingMatrix> {
        log::info!("Building embedding matrix...");
        self.check_dimensions()?;

        let rows = match self.max_id() {
            Some(id) => token_index(id)?
                .checked_add(1)
                .ok_or(WordtableError::TokenOutOfRange {
                    id: id.to_u64().unwrap_or(u64::MAX),
                })?,
            None => 0,
        };
        let mut matrix = EmbeddingMatrix::zeros(rows, self.dim)?;
        self.fill_rows(&mut matrix)?;

        log::debug!("Embedding matrix shape: {:?}", matrix.shape());
        Ok(matrix)
    }

    #[cfg(not(feature = "rayon"))]
    fn fill_rows(
        &self,
        matrix: &mut EmbeddingMatrix,
    ) -> WTResult<()> {
        for (token, &id) in &self.ids {
            if let Some(vector) = self.vectors.get(token) {
                matrix.row_mut(token_index(id)?).copy_from_slice(vector);
            }
        }
        Ok(())
    }

    #[cfg(feature = "rayon")]
    fn fill_rows(
        &self,
        matrix: &mut EmbeddingMatrix,
    ) -> WTResult<()> {
        use rayon::prelude::*;

        let dim = matrix.dim();
        if dim == 0 {
            return Ok(());
        }

        let mut sources: Vec<Option<&[f32]>> = vec![None; matrix.rows()];
        for (token, &id) in &self.ids {
            sources[token_index(id)?] = self.vectors.get(token);
        }

        matrix
            .data_mut()
            .par_chunks_mut(dim)
            .zip(sources.par_iter())
            .for_each(|(row, source)| {
                if let Some(source) = source {
                    row.copy_from_slice(source);
                }
            });
        Ok(())
    }
}
