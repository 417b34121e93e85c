//! # `wordtable` Vocabulary and Embedding Tables
//!
//! Builds vocabularies and dense embedding tables from pretrained word-vector
//! files (``word2vec`` text format).
//!
//! See:
//! * [`reader`] to stream vector files.
//! * [`vocab`] to build a vocabulary, with optional reserved special tokens.
//! * [`embedding`] for the built [`Embedding`] and its [`EmbeddingMatrix`].
//! * [`io`] to save and load vocabularies.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::WTHash{*}`` type alias machinery.
//!
//! #### feature: ``foldhash``
//!
//! As ``ahash``, with ``foldhash``. If both are enabled, ``ahash`` wins.
//!
//! #### feature: ``rayon``
//!
//! Fills embedding matrix rows in parallel using the ``rayon`` crate.
//!
//! ## Building An Embedding
//!
//! ```rust,no_run
//! use wordtable::{
//!     Embedding,
//!     vocab::{SpecialTokens, VocabularyBuilder, VocabularyOptions},
//! };
//!
//! fn example() -> wordtable::WTResult<()> {
//!     let options = VocabularyOptions::default()
//!         .with_dim(300)
//!         .with_special_tokens(SpecialTokens::try_from_pairs([("PAD", 0), ("EOS", 1)])?);
//!
//!     let embedding: Embedding<u32> = VocabularyBuilder::build_from_file(options, "words.vec")?;
//!     let matrix = embedding.build_matrix()?;
//!     assert_eq!(matrix.shape(), (embedding.size(), 300));
//!
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod embedding;
pub mod errors;
pub mod io;
pub mod reader;
pub mod tokenize;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use embedding::{Embedding, EmbeddingMatrix};
#[doc(inline)]
pub use errors::{WTResult, WordtableError};
#[doc(inline)]
pub use types::TokenType;
