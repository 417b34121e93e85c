//! # Vocabulary IO
//!
//! ## Saving And Loading
//!
//! ```rust,no_run
//! use wordtable::{
//!     Embedding,
//!     io::{load_embedding_path, save_embedding_path},
//!     vocab::{VocabularyBuilder, VocabularyOptions},
//! };
//!
//! fn example() -> wordtable::WTResult<Embedding<u32>> {
//!     let embedding: Embedding<u32> =
//!         VocabularyBuilder::build_from_file(VocabularyOptions::default(), "words.vec")?;
//!     save_embedding_path(&embedding, "words.embedding.json")?;
//!
//!     load_embedding_path("words.embedding.json")
//! }
//! ```

mod json_io;

#[doc(inline)]
pub use json_io::*;
