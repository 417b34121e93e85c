use wordtable::{
    Embedding,
    io::load_embedding_path,
    tokenize::{CharTokenizer, WhitespaceTokenizer},
};

use crate::LogArgs;

type T = u32;

/// Tokenizers for the inspect command.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TokenizerMode {
    /// Split on whitespace.
    Whitespace,

    /// Split into characters.
    Chars,
}

/// Args for the inspect command.
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// A saved embedding, as written by `build --embedding-out`.
    embedding: String,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Tokens to look up; may be repeated.
    #[arg(long = "token")]
    tokens: Vec<String>,

    /// Text to encode into ids.
    #[arg(long)]
    encode: Option<String>,

    /// Tokenizer used by --encode.
    #[arg(long, default_value = "whitespace")]
    tokenizer: TokenizerMode,

    /// Id substituted for unknown tokens by --encode.
    #[arg(long, default_value_t = 0)]
    unknown_id: T,
}

impl InspectArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let embedding: Embedding<T> = load_embedding_path(&self.embedding)?;
        println!("size: {}", embedding.size());
        println!("dim: {}", embedding.dim());
        if let Some(max_id) = embedding.max_id() {
            println!("max id: {max_id}");
        }

        for token in &self.tokens {
            match (embedding.id(token), embedding.vector(token)) {
                (Some(id), Some(vector)) => println!("{token}\t{id}\t{vector:?}"),
                _ => println!("{token}\t<unknown>"),
            }
        }

        if let Some(text) = &self.encode {
            let ids = match self.tokenizer {
                TokenizerMode::Whitespace => {
                    embedding.encode_text(&WhitespaceTokenizer, text, self.unknown_id)
                }
                TokenizerMode::Chars => embedding.encode_text(&CharTokenizer, text, self.unknown_id),
            };
            println!("{ids:?}");
        }

        Ok(())
    }
}
