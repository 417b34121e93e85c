//! # Embeddings
//!
//! [`Embedding`] is the immutable product of a
//! [`VocabularyBuilder`](crate::vocab::VocabularyBuilder); it bundles:
//! * `vectors` - a [`VectorMap`](crate::vocab::VectorMap) ``{ token -> vector }`` map,
//! * `ids` - a ``{ token -> id }`` map.
//!
//! The ``{ id -> token }`` view and the dense [`EmbeddingMatrix`] are derived on demand.

mod embedding_matrix;
mod embedding_table;

#[doc(inline)]
pub use embedding_matrix::*;
#[doc(inline)]
pub use embedding_table::*;
