//! # Vector File Reading
//!
//! Streams the raw body lines of a pretrained word-vector file.
//!
//! Files are UTF-8 text; the first line is a header (conventionally
//! ``{VOCAB_SIZE} {DIM}``) which is discarded, and every following line is:
//! ```terminaloutput
//! {TOKEN} {V1} {V2} ... {VD}
//! ```
//!
//! No line-format validation happens here; see [`crate::vocab`].

mod vector_file_reader;

#[doc(inline)]
pub use vector_file_reader::*;
