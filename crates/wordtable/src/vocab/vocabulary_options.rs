//! # Vocabulary Options

use crate::{
    errors::{WTResult, WordtableError},
    types::TokenType,
    vocab::SpecialTokens,
};

/// Default mean of randomly initialized vectors.
pub const DEFAULT_INIT_MEAN: f32 = 0.0;

/// Default standard deviation of randomly initialized vectors.
pub const DEFAULT_INIT_STD: f32 = 0.1;

/// Where token vectors come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorSource {
    /// Parse vectors from the file's numeric fields.
    #[default]
    File,

    /// Use only the token field; sample vectors from a normal distribution.
    Random,
}

/// Options for configuring a [`VocabularyBuilder`](super::VocabularyBuilder).
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyOptions<T: TokenType> {
    /// The vector dimension.
    ///
    /// Required in [`VectorSource::Random`] mode, or when special tokens are set.
    pub dim: Option<usize>,

    /// Reserved tokens with fixed ids.
    pub special_tokens: Option<SpecialTokens<T>>,

    /// Where token vectors come from.
    pub source: VectorSource,

    /// Mean of randomly initialized vectors.
    pub init_mean: f32,

    /// Standard deviation of randomly initialized vectors.
    pub init_std: f32,

    /// Seed for random initialization; entropy-seeded when unset.
    pub seed: Option<u64>,

    /// The expected number of body lines, for progress display only.
    pub expected_lines: Option<usize>,
}

impl<T: TokenType> Default for VocabularyOptions<T> {
    fn default() -> Self {
        Self {
            dim: None,
            special_tokens: None,
            source: VectorSource::default(),
            init_mean: DEFAULT_INIT_MEAN,
            init_std: DEFAULT_INIT_STD,
            seed: None,
            expected_lines: None,
        }
    }
}

impl<T: TokenType> VocabularyOptions<T> {
    /// Sets the vector dimension.
    pub fn with_dim(
        mut self,
        dim: usize,
    ) -> Self {
        self.dim = Some(dim);
        self
    }

    /// Sets the special tokens.
    pub fn with_special_tokens(
        mut self,
        special_tokens: SpecialTokens<T>,
    ) -> Self {
        self.special_tokens = Some(special_tokens);
        self
    }

    /// Sets the vector source.
    pub fn with_source(
        mut self,
        source: VectorSource,
    ) -> Self {
        self.source = source;
        self
    }

    /// Sets the normal distribution used in random mode.
    pub fn with_init_distribution(
        mut self,
        mean: f32,
        std: f32,
    ) -> Self {
        self.init_mean = mean;
        self.init_std = std;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(
        mut self,
        seed: Option<u64>,
    ) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the expected number of body lines.
    pub fn with_expected_lines(
        mut self,
        expected_lines: Option<usize>,
    ) -> Self {
        self.expected_lines = expected_lines;
        self
    }

    /// Returns true if special tokens are configured and non-empty.
    pub fn has_special_tokens(&self) -> bool {
        self.special_tokens.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Check that the options are internally consistent.
    pub fn validate(&self) -> WTResult<()> {
        let needs_dim = if self.source == VectorSource::Random {
            Some("random vector initialization")
        } else if self.has_special_tokens() {
            Some("special tokens")
        } else {
            None
        };

        if let Some(reason) = needs_dim {
            match self.dim {
                None => {
                    return Err(WordtableError::Config(format!(
                        "a vector dimension is required for {reason}"
                    )));
                }
                Some(0) => {
                    return Err(WordtableError::Config(format!(
                        "vector dimension must be > 0 for {reason}"
                    )));
                }
                Some(_) => {}
            }
        }

        if self.source == VectorSource::Random
            && !(self.init_mean.is_finite() && self.init_std.is_finite() && self.init_std > 0.0)
        {
            return Err(WordtableError::Config(format!(
                "invalid init distribution: mean={}, std={}",
                self.init_mean, self.init_std
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type T = u32;

    #[test]
    fn test_defaults() {
        let options = VocabularyOptions::<T>::default();
        assert_eq!(options.source, VectorSource::File);
        assert_eq!(options.init_mean, 0.0);
        assert_eq!(options.init_std, 0.1);
        assert!(!options.has_special_tokens());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_dim_required() {
        let options = VocabularyOptions::<T>::default().with_source(VectorSource::Random);
        assert!(matches!(options.validate(), Err(WordtableError::Config(_))));
        assert!(options.clone().with_dim(4).validate().is_ok());
        assert!(options.with_dim(0).validate().is_err());

        let specials = SpecialTokens::try_from_pairs([("PAD", 0)]).unwrap();
        let options = VocabularyOptions::<T>::default().with_special_tokens(specials);
        assert!(matches!(options.validate(), Err(WordtableError::Config(_))));
        assert!(options.with_dim(2).validate().is_ok());
    }

    #[test]
    fn test_bad_distribution() {
        let options = VocabularyOptions::<T>::default()
            .with_source(VectorSource::Random)
            .with_dim(3)
            .with_init_distribution(0.0, -1.0);
        assert!(options.validate().is_err());
    }
}
