use wordtable::{
    Embedding,
    io::{save_embedding_path, save_id_map_path, save_vector_map_path, serialize},
    vocab::{SpecialTokens, VectorSource, VocabularyBuilder, VocabularyOptions},
};

use crate::{LogArgs, progress::ReadProgress};

type T = u32;

/// Parse a ``TOKEN=ID`` special token argument.
fn parse_special(arg: &str) -> Result<(String, T), String> {
    let (token, id) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected TOKEN=ID, got {arg:?}"))?;
    if token.is_empty() {
        return Err(format!("empty special token in {arg:?}"));
    }
    let id = id
        .parse::<T>()
        .map_err(|e| format!("invalid special token id in {arg:?}: {e}"))?;
    Ok((token.to_string(), id))
}

/// Args for the build command.
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Input vector file; the first line is a header.
    input: String,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Vector dimension; required with --random or --special.
    #[arg(long)]
    dim: Option<usize>,

    /// Ignore vector fields and sample vectors from a normal distribution.
    #[arg(long)]
    random: bool,

    /// Mean of randomly initialized vectors.
    #[arg(long, default_value_t = wordtable::vocab::vocabulary_options::DEFAULT_INIT_MEAN)]
    init_mean: f32,

    /// Standard deviation of randomly initialized vectors.
    #[arg(long, default_value_t = wordtable::vocab::vocabulary_options::DEFAULT_INIT_STD)]
    init_std: f32,

    /// Seed for random initialization.
    #[arg(long)]
    seed: Option<u64>,

    /// Reserved special token, as TOKEN=ID; may be repeated.
    #[arg(long = "special", value_parser = parse_special)]
    specials: Vec<(String, T)>,

    /// Expected number of vector lines, for progress display.
    #[arg(long)]
    expected_lines: Option<usize>,

    /// Display a progress bar.
    #[arg(long)]
    progress: bool,

    /// Output path for the token to vector map.
    #[arg(long)]
    vectors_out: Option<String>,

    /// Output path for the token to id map.
    #[arg(long)]
    ids_out: Option<String>,

    /// Output path for the full embedding.
    #[arg(long)]
    embedding_out: Option<String>,

    /// Output path for the dense embedding matrix.
    #[arg(long)]
    matrix_out: Option<String>,
}

impl BuildArgs {
    fn options(&self) -> Result<VocabularyOptions<T>, Box<dyn std::error::Error>> {
        let mut options = VocabularyOptions::default()
            .with_source(if self.random {
                VectorSource::Random
            } else {
                VectorSource::File
            })
            .with_init_distribution(self.init_mean, self.init_std)
            .with_seed(self.seed)
            .with_expected_lines(self.expected_lines);

        if let Some(dim) = self.dim {
            options = options.with_dim(dim);
        }
        if !self.specials.is_empty() {
            options = options.with_special_tokens(SpecialTokens::try_from_pairs(
                self.specials.iter().map(|(token, id)| (token.as_str(), *id)),
            )?);
        }

        Ok(options)
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let options = self.options()?;

        let progress = ReadProgress::new(self.progress, self.expected_lines);
        let embedding: Result<Embedding<T>, _> =
            VocabularyBuilder::build_from_file_with_progress(options, &self.input, progress.callback());
        progress.finish();
        let embedding = embedding?;

        log::info!("Vocabulary size: {}", embedding.size());
        log::info!("Vector dimension: {}", embedding.dim());

        if let Some(path) = &self.vectors_out {
            log::info!("vectors: {path}");
            save_vector_map_path(embedding.vectors(), path)?;
        }
        if let Some(path) = &self.ids_out {
            log::info!("ids: {path}");
            save_id_map_path(embedding.ids(), path)?;
        }
        if let Some(path) = &self.embedding_out {
            log::info!("embedding: {path}");
            save_embedding_path(&embedding, path)?;
        }
        if let Some(path) = &self.matrix_out {
            let matrix = embedding.build_matrix()?;
            log::info!("matrix {:?}: {path}", matrix.shape());
            serialize(&matrix, path)?;
        }

        Ok(())
    }
}
