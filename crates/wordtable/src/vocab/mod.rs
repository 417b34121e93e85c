//! # Vocabulary Construction
//!
//! [`VocabularyBuilder`] consumes the body lines of a vector file and builds:
//! * a [`VectorMap`] ``{ token -> vector }`` map, in first-encounter order,
//! * a ``{ token -> id }`` map over a collision-free id space.
//!
//! Vectors come from the file itself ([`VectorSource::File`]), or are
//! sampled from a normal distribution ([`VectorSource::Random`]).
//!
//! [`SpecialTokens`] reserve fixed ids; their vectors are always zero.

pub mod line_parser;
pub mod special_tokens;
pub mod vector_map;
pub mod vocabulary_builder;
pub mod vocabulary_options;

#[doc(inline)]
pub use special_tokens::SpecialTokens;
#[doc(inline)]
pub use vector_map::VectorMap;
#[doc(inline)]
pub use vocabulary_builder::{BuildState, VocabularyBuilder};
#[doc(inline)]
pub use vocabulary_options::{VectorSource, VocabularyOptions};
