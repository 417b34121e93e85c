//! # Vocabulary Builder

use std::path::Path;

use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

use crate::{
    embedding::Embedding,
    errors::{WTResult, WordtableError},
    reader::{ProgressFn, RawLine, VectorFileReader},
    types::{TokenType, Vector, WTHashMap, hash_map_with_capacity, try_token_id},
    vocab::{
        VectorMap,
        VectorSource,
        VocabularyOptions,
        line_parser::{parse_token_field, parse_vector_line},
    },
};

/// Upper bound on the token capacity reserved up front from `expected_lines`.
pub const MAX_PREALLOCATED_TOKENS: usize = 1 << 20;

/// Build progress of a [`VocabularyBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Nothing loaded.
    Unbuilt,

    /// The ``{ token -> vector }`` map is populated, special tokens included.
    VectorsLoaded,

    /// The ``{ token -> id }`` map is populated.
    IdsAssigned,

    /// The snapshot has been handed out.
    Ready,
}

impl BuildState {
    /// A short name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BuildState::Unbuilt => "Unbuilt",
            BuildState::VectorsLoaded => "VectorsLoaded",
            BuildState::IdsAssigned => "IdsAssigned",
            BuildState::Ready => "Ready",
        }
    }
}

/// Builds an [`Embedding`] from a stream of vector-file lines.
///
/// Steps must run in order:
/// 1. [`load_vectors`](Self::load_vectors),
/// 2. [`assign_ids`](Self::assign_ids),
/// 3. [`build`](Self::build).
///
/// A failed step leaves the builder's maps untouched.
#[derive(Debug)]
pub struct VocabularyBuilder<T: TokenType> {
    options: VocabularyOptions<T>,
    state: BuildState,
    dim: Option<usize>,
    vectors: VectorMap,
    ids: WTHashMap<String, T>,
}

impl<T: TokenType> VocabularyBuilder<T> {
    /// Create a builder, validating `options`.
    pub fn new(options: VocabularyOptions<T>) -> WTResult<Self> {
        options.validate()?;
        Ok(Self {
            dim: options.dim,
            options,
            state: BuildState::Unbuilt,
            vectors: VectorMap::default(),
            ids: WTHashMap::default(),
        })
    }

    /// Build an [`Embedding`] from the vector file at `path`.
    pub fn build_from_file(
        options: VocabularyOptions<T>,
        path: impl AsRef<Path>,
    ) -> WTResult<Embedding<T>> {
        let builder = Self::new(options)?;
        let lines = builder.reader(path).open()?;
        builder.run(lines)
    }

    /// Build an [`Embedding`] from the vector file at `path`, reporting progress.
    pub fn build_from_file_with_progress(
        options: VocabularyOptions<T>,
        path: impl AsRef<Path>,
        progress: ProgressFn<'_>,
    ) -> WTResult<Embedding<T>> {
        let builder = Self::new(options)?;
        let lines = builder.reader(path).open_with_progress(progress)?;
        builder.run(lines)
    }

    /// Build an [`Embedding`] from raw body lines.
    pub fn build_from_lines<I>(
        options: VocabularyOptions<T>,
        lines: I,
    ) -> WTResult<Embedding<T>>
    where
        I: IntoIterator<Item = WTResult<RawLine>>,
    {
        Self::new(options)?.run(lines)
    }

    fn reader(
        &self,
        path: impl AsRef<Path>,
    ) -> VectorFileReader {
        VectorFileReader::new(path).with_expected_lines(self.options.expected_lines)
    }

    fn run<I>(
        mut self,
        lines: I,
    ) -> WTResult<Embedding<T>>
    where
        I: IntoIterator<Item = WTResult<RawLine>>,
    {
        self.load_vectors(lines)?;
        self.assign_ids()?;
        self.build()
    }

    /// The options this builder was created with.
    pub fn options(&self) -> &VocabularyOptions<T> {
        &self.options
    }

    /// The current build state.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// The vector dimension; configured, or inferred from the first parsed vector.
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    fn expect_state(
        &self,
        expected: BuildState,
        operation: &'static str,
    ) -> WTResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(WordtableError::State {
                operation,
                state: self.state.name(),
            })
        }
    }

    /// Populate the ``{ token -> vector }`` map, then zero-fill special tokens.
    pub fn load_vectors<I>(
        &mut self,
        lines: I,
    ) -> WTResult<()>
    where
        I: IntoIterator<Item = WTResult<RawLine>>,
    {
        self.expect_state(BuildState::Unbuilt, "load vectors")?;

        // `expected_lines` is only a hint; an overestimate must not drive allocation.
        let capacity = self
            .options
            .expected_lines
            .unwrap_or_default()
            .min(MAX_PREALLOCATED_TOKENS);
        let mut vectors = VectorMap::with_capacity(capacity);
        let mut dim = self.dim;

        match self.options.source {
            VectorSource::File => {
                log::info!("Loading token vectors...");
                for line in lines {
                    let line = line?;
                    let (token, vector) = parse_vector_line(&line)?;
                    if dim.is_none() {
                        log::debug!("Inferred vector dimension: {}", vector.len());
                        dim = Some(vector.len());
                    }
                    insert_vector(&mut vectors, &line, token, vector);
                }
            }
            VectorSource::Random => {
                log::info!("Generating random token vectors...");
                let dim = dim.unwrap_or_default();
                let normal = Normal::new(self.options.init_mean, self.options.init_std)
                    .map_err(|e| WordtableError::Config(e.to_string()))?;
                let mut rng = match self.options.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_rng(&mut rand::rng()),
                };
                for line in lines {
                    let line = line?;
                    let token = parse_token_field(&line)?;
                    let vector: Vector = (0..dim).map(|_| normal.sample(&mut rng)).collect();
                    insert_vector(&mut vectors, &line, token, vector);
                }
            }
        }

        if let Some(specials) = &self.options.special_tokens {
            let dim = dim.unwrap_or_default();
            for (token, _) in specials.iter() {
                if vectors.insert(token, vec![0.0; dim]).is_some() {
                    log::warn!("Special token {token:?} overrides its vector from the source");
                }
            }
        }

        log::info!("Total tokens: {}", vectors.len());

        self.vectors = vectors;
        self.dim = dim;
        self.state = BuildState::VectorsLoaded;
        Ok(())
    }

    /// Populate the ``{ token -> id }`` map.
    ///
    /// Special tokens keep their reserved ids. Remaining tokens get consecutive
    /// ids in encounter order, starting at the special token count and skipping
    /// any reserved id.
    pub fn assign_ids(&mut self) -> WTResult<()> {
        self.expect_state(BuildState::VectorsLoaded, "assign ids")?;
        log::info!("Assigning token ids...");

        let mut ids: WTHashMap<String, T> = hash_map_with_capacity(self.vectors.len());
        let mut next = 0;

        if let Some(specials) = &self.options.special_tokens {
            let reserved = specials.reserved_ids();
            ids.extend(specials.iter().map(|(token, id)| (token.to_string(), id)));
            next = specials.len();

            for token in self.vectors.tokens() {
                if specials.contains_token(token) {
                    continue;
                }
                let mut id: T = try_token_id(next)?;
                while reserved.contains(&id) {
                    next += 1;
                    id = try_token_id(next)?;
                }
                ids.insert(token.to_string(), id);
                next += 1;
            }
        } else {
            for token in self.vectors.tokens() {
                ids.insert(token.to_string(), try_token_id(next)?);
                next += 1;
            }
        }

        self.ids = ids;
        self.state = BuildState::IdsAssigned;
        Ok(())
    }

    /// Finish the build, producing an immutable [`Embedding`].
    pub fn build(mut self) -> WTResult<Embedding<T>> {
        self.expect_state(BuildState::IdsAssigned, "build")?;
        self.state = BuildState::Ready;

        Embedding::from_parts(
            self.dim.unwrap_or_default(),
            core::mem::take(&mut self.vectors),
            core::mem::take(&mut self.ids),
        )
    }
}

fn insert_vector(
    vectors: &mut VectorMap,
    line: &RawLine,
    token: String,
    vector: Vector,
) {
    if vectors.contains(&token) {
        log::warn!(
            "line {}: duplicate token {token:?}; keeping the later vector",
            line.line
        );
    }
    vectors.insert(token, vector);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::SpecialTokens;

    type T = u32;

    fn lines(body: &[&str]) -> Vec<WTResult<RawLine>> {
        body.iter()
            .enumerate()
            .map(|(idx, text)| {
                Ok(RawLine {
                    line: idx + 2,
                    text: text.to_string(),
                })
            })
            .collect()
    }

    fn pad_eos() -> SpecialTokens<T> {
        SpecialTokens::try_from_pairs([("PAD", 0), ("EOS", 1)]).unwrap()
    }

    #[test]
    fn test_state_transitions() {
        let mut builder = VocabularyBuilder::<T>::new(Default::default()).unwrap();
        assert_eq!(builder.state(), BuildState::Unbuilt);

        assert!(matches!(
            builder.assign_ids(),
            Err(WordtableError::State {
                operation: "assign ids",
                state: "Unbuilt"
            })
        ));

        builder.load_vectors(lines(&["a 1 2"])).unwrap();
        assert_eq!(builder.state(), BuildState::VectorsLoaded);
        assert!(builder.load_vectors(lines(&["b 1 2"])).is_err());

        builder.assign_ids().unwrap();
        assert_eq!(builder.state(), BuildState::IdsAssigned);

        let embedding = builder.build().unwrap();
        assert_eq!(embedding.size(), 1);
    }

    #[test]
    fn test_build_before_ids() {
        let builder = VocabularyBuilder::<T>::new(Default::default()).unwrap();
        assert!(matches!(
            builder.build(),
            Err(WordtableError::State { .. })
        ));
    }

    #[test]
    fn test_special_ids() {
        let options = VocabularyOptions::default()
            .with_dim(2)
            .with_special_tokens(pad_eos());
        let embedding =
            VocabularyBuilder::build_from_lines(options, lines(&["the 0.1 0.2", "cat 0.3 0.4"]))
                .unwrap();

        assert_eq!(embedding.id("PAD"), Some(0));
        assert_eq!(embedding.id("EOS"), Some(1));
        assert_eq!(embedding.id("the"), Some(2));
        assert_eq!(embedding.id("cat"), Some(3));
        assert_eq!(embedding.vector("PAD"), Some([0.0, 0.0].as_slice()));
    }

    #[test]
    fn test_special_collides_with_file_token() {
        let specials = SpecialTokens::try_from_pairs([("PAD", 0), ("EOS", 1), ("the", 5)]).unwrap();
        let options = VocabularyOptions::<T>::default()
            .with_dim(2)
            .with_special_tokens(specials);
        let embedding =
            VocabularyBuilder::build_from_lines(options, lines(&["the 0.1 0.2", "cat 0.3 0.4"]))
                .unwrap();

        assert_eq!(embedding.id("the"), Some(5));
        assert_eq!(embedding.vector("the"), Some([0.0, 0.0].as_slice()));
        assert_eq!(embedding.id("cat"), Some(3));
        assert_eq!(embedding.size(), 4);
    }

    #[test]
    fn test_learned_ids_skip_reserved() {
        let specials = SpecialTokens::try_from_pairs([("UNK", 2)]).unwrap();
        let options = VocabularyOptions::<T>::default()
            .with_dim(1)
            .with_special_tokens(specials);
        let embedding =
            VocabularyBuilder::build_from_lines(options, lines(&["a 1", "b 2", "c 3"])).unwrap();

        assert_eq!(embedding.id("UNK"), Some(2));
        assert_eq!(embedding.id("a"), Some(1));
        assert_eq!(embedding.id("b"), Some(3));
        assert_eq!(embedding.id("c"), Some(4));
    }

    #[test]
    fn test_duplicate_file_tokens() {
        let embedding = VocabularyBuilder::<T>::build_from_lines(
            Default::default(),
            lines(&["a 1", "b 2", "a 3"]),
        )
        .unwrap();

        assert_eq!(embedding.size(), 2);
        assert_eq!(embedding.id("a"), Some(0));
        assert_eq!(embedding.id("b"), Some(1));
        assert_eq!(embedding.vector("a"), Some([3.0].as_slice()));
    }

    #[test]
    fn test_inferred_dim() {
        let embedding =
            VocabularyBuilder::<T>::build_from_lines(Default::default(), lines(&["a 1 2 3"]))
                .unwrap();
        assert_eq!(embedding.dim(), 3);
    }

    #[test]
    fn test_random_mode() {
        let options = VocabularyOptions::<T>::default()
            .with_source(VectorSource::Random)
            .with_dim(4)
            .with_seed(Some(7));

        let first =
            VocabularyBuilder::build_from_lines(options.clone(), lines(&["a", "b 9 9", "c"]))
                .unwrap();
        assert_eq!(first.id("a"), Some(0));
        assert_eq!(first.id("b"), Some(1));
        assert_eq!(first.id("c"), Some(2));
        for token in ["a", "b", "c"] {
            let vector = first.vector(token).unwrap();
            assert_eq!(vector.len(), 4);
            assert!(vector.iter().all(|v| v.is_finite() && v.abs() < 1.0));
        }

        let second =
            VocabularyBuilder::build_from_lines(options, lines(&["a", "b 9 9", "c"])).unwrap();
        assert_eq!(first.vector("a"), second.vector("a"));
    }

    #[test]
    fn test_random_mode_zero_fills_specials() {
        let options = VocabularyOptions::<T>::default()
            .with_source(VectorSource::Random)
            .with_dim(3)
            .with_special_tokens(pad_eos());
        let embedding = VocabularyBuilder::build_from_lines(options, lines(&["x", "y"])).unwrap();

        assert_eq!(embedding.vector("EOS"), Some([0.0f32; 3].as_slice()));
        assert_eq!(embedding.id("x"), Some(2));
        assert_eq!(embedding.id("y"), Some(3));
    }

    #[test]
    fn test_missing_dim() {
        let options = VocabularyOptions::<T>::default().with_source(VectorSource::Random);
        assert!(matches!(
            VocabularyBuilder::new(options),
            Err(WordtableError::Config(_))
        ));
    }

    #[test]
    fn test_parse_error_leaves_builder_unbuilt() {
        let mut builder = VocabularyBuilder::<T>::new(Default::default()).unwrap();
        let err = builder
            .load_vectors(lines(&["the 0.1 0.2", "token_only"]))
            .unwrap_err();
        assert!(matches!(err, WordtableError::Parse { line: 3, .. }));
        assert_eq!(builder.state(), BuildState::Unbuilt);
    }

    #[test]
    fn test_expected_lines_is_only_a_hint() {
        let options = VocabularyOptions::<T>::default().with_expected_lines(Some(usize::MAX / 4));
        let embedding = VocabularyBuilder::build_from_lines(options, lines(&["a 1 2"])).unwrap();
        assert_eq!(embedding.size(), 1);

        let options = VocabularyOptions::<T>::default().with_expected_lines(Some(1_000_000_000));
        let embedding = VocabularyBuilder::build_from_lines(options, lines(&["a 1", "b 2"])).unwrap();
        assert_eq!(embedding.size(), 2);
    }

    #[test]
    fn test_id_overflow() {
        let body: Vec<String> = (0..300).map(|i| format!("t{i} 1")).collect();
        let body: Vec<&str> = body.iter().map(String::as_str).collect();
        assert!(matches!(
            VocabularyBuilder::<u8>::build_from_lines(Default::default(), lines(&body)),
            Err(WordtableError::TokenOutOfRange { .. })
        ));
    }
}
