//! # JSON Vocabulary IO

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    embedding::Embedding,
    errors::{WTResult, WordtableError},
    types::{TokenType, Vector, WTHashMap},
    vocab::VectorMap,
};

/// A ``{ token -> vector }`` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// The token.
    pub token: String,

    /// The token's vector.
    pub vector: Vector,
}

/// A ``{ token -> id }`` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRecord {
    /// The token.
    pub token: String,

    /// The token's id.
    pub id: u64,
}

/// The serialized form of an [`Embedding`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// The vector dimension.
    pub dim: usize,

    /// Vectors, in first-encounter order.
    pub vectors: Vec<VectorRecord>,

    /// Ids, in id order.
    pub ids: Vec<IdRecord>,
}

/// Write `data` as JSON to the file at `path`.
pub fn serialize<D, P>(
    data: &D,
    path: P,
) -> WTResult<()>
where
    D: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| WordtableError::file(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, data)?;
    writer.flush().map_err(|e| WordtableError::file(path, e))?;
    Ok(())
}

/// Read JSON data from the file at `path`.
pub fn deserialize<D, P>(path: P) -> WTResult<D>
where
    D: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| WordtableError::file(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Convert a [`VectorMap`] to records, in first-encounter order.
pub fn vector_records(vectors: &VectorMap) -> Vec<VectorRecord> {
    vectors
        .iter()
        .map(|(token, vector)| VectorRecord {
            token: token.to_string(),
            vector: vector.to_vec(),
        })
        .collect()
}

/// Convert an id map to records, in id order.
pub fn id_records<T: TokenType>(ids: &WTHashMap<String, T>) -> WTResult<Vec<IdRecord>> {
    let mut records = ids
        .iter()
        .map(|(token, id)| {
            Ok(IdRecord {
                token: token.clone(),
                id: id
                    .to_u64()
                    .ok_or(WordtableError::TokenOutOfRange { id: u64::MAX })?,
            })
        })
        .collect::<WTResult<Vec<_>>>()?;
    records.sort_by_key(|r| r.id);
    Ok(records)
}

fn id_map_from_records<T: TokenType>(records: Vec<IdRecord>) -> WTResult<WTHashMap<String, T>> {
    records
        .into_iter()
        .map(|IdRecord { token, id }| {
            let id = T::from_u64(id).ok_or(WordtableError::TokenOutOfRange { id })?;
            Ok((token, id))
        })
        .collect()
}

fn check_finite(vectors: &VectorMap) -> WTResult<()> {
    match vectors
        .iter()
        .find(|(_, vector)| vector.iter().any(|v| !v.is_finite()))
    {
        Some((token, _)) => Err(WordtableError::Serialization(format!(
            "vector for {token:?} has a non-finite component"
        ))),
        None => Ok(()),
    }
}

/// Save a ``{ token -> vector }`` map.
///
/// ## Returns
/// A `Serialization` error if any vector has a non-finite component.
pub fn save_vector_map_path<P: AsRef<Path>>(
    vectors: &VectorMap,
    path: P,
) -> WTResult<()> {
    check_finite(vectors)?;
    serialize(&vector_records(vectors), path)
}

/// Load a ``{ token -> vector }`` map.
pub fn load_vector_map_path<P: AsRef<Path>>(path: P) -> WTResult<VectorMap> {
    let records: Vec<VectorRecord> = deserialize(path)?;
    Ok(records
        .into_iter()
        .map(|VectorRecord { token, vector }| (token, vector))
        .collect())
}

/// Save a ``{ token -> id }`` map.
pub fn save_id_map_path<T: TokenType, P: AsRef<Path>>(
    ids: &WTHashMap<String, T>,
    path: P,
) -> WTResult<()> {
    serialize(&id_records(ids)?, path)
}

/// Load a ``{ token -> id }`` map.
pub fn load_id_map_path<T: TokenType, P: AsRef<Path>>(path: P) -> WTResult<WTHashMap<String, T>> {
    id_map_from_records(deserialize(path)?)
}

impl<T: TokenType> Embedding<T> {
    /// Convert to the serialized form.
    ///
    /// ## Returns
    /// A `Serialization` error if any vector has a non-finite component,
    /// since JSON cannot represent it.
    pub fn to_record(&self) -> WTResult<EmbeddingRecord> {
        check_finite(self.vectors())?;
        Ok(EmbeddingRecord {
            dim: self.dim(),
            vectors: vector_records(self.vectors()),
            ids: id_records(self.ids())?,
        })
    }

    /// Rebuild from the serialized form, re-checking consistency.
    pub fn from_record(record: EmbeddingRecord) -> WTResult<Self> {
        let vectors = record
            .vectors
            .into_iter()
            .map(|VectorRecord { token, vector }| (token, vector))
            .collect();
        Embedding::from_parts(record.dim, vectors, id_map_from_records(record.ids)?)
    }
}

/// Save an [`Embedding`].
pub fn save_embedding_path<T: TokenType, P: AsRef<Path>>(
    embedding: &Embedding<T>,
    path: P,
) -> WTResult<()> {
    serialize(&embedding.to_record()?, path)
}

/// Load an [`Embedding`].
pub fn load_embedding_path<T: TokenType, P: AsRef<Path>>(path: P) -> WTResult<Embedding<T>> {
    Embedding::from_record(deserialize(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    type T = u32;

    fn sample() -> Embedding<T> {
        let vectors: VectorMap = [("PAD", vec![0.0, 0.0]), ("的", vec![0.125, -1.5])]
            .into_iter()
            .collect();
        let ids = [("PAD".to_string(), 0), ("的".to_string(), 1)]
            .into_iter()
            .collect();
        Embedding::from_parts(2, vectors, ids).unwrap()
    }

    #[test]
    fn test_save_load_maps() {
        let embedding = sample();

        tempdir::TempDir::new("io_test")
            .and_then(|dir| {
                let vector_path = dir.path().join("w2v.json");
                let id_path = dir.path().join("w2id.json");

                save_vector_map_path(embedding.vectors(), &vector_path).unwrap();
                save_id_map_path(embedding.ids(), &id_path).unwrap();

                let vectors = load_vector_map_path(&vector_path).unwrap();
                let ids: WTHashMap<String, T> = load_id_map_path(&id_path).unwrap();

                assert_eq!(&vectors, embedding.vectors());
                assert_eq!(&ids, embedding.ids());

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_save_load_embedding() {
        let embedding = sample();

        tempdir::TempDir::new("io_test")
            .and_then(|dir| {
                let path = dir.path().join("embedding.json");
                save_embedding_path(&embedding, &path).unwrap();

                let loaded: Embedding<T> = load_embedding_path(&path).unwrap();
                assert_eq!(loaded, embedding);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_load_rejects_inconsistent_record() {
        let record = EmbeddingRecord {
            dim: 1,
            vectors: vec![VectorRecord {
                token: "a".to_string(),
                vector: vec![1.0],
            }],
            ids: vec![],
        };
        assert!(matches!(
            Embedding::<T>::from_record(record),
            Err(WordtableError::Config(_))
        ));
    }

    #[test]
    fn test_id_out_of_range() {
        let records = vec![IdRecord {
            token: "a".to_string(),
            id: 300,
        }];
        assert!(matches!(
            id_map_from_records::<u8>(records),
            Err(WordtableError::TokenOutOfRange { id: 300 })
        ));
    }

    #[test]
    fn test_non_finite_vectors_are_not_saved() {
        let vectors: VectorMap = [("a", vec![f32::INFINITY, f32::NAN])].into_iter().collect();
        let ids = [("a".to_string(), 0)].into_iter().collect();
        let embedding: Embedding<T> = Embedding::from_parts(2, vectors, ids).unwrap();

        tempdir::TempDir::new("io_test")
            .and_then(|dir| {
                let path = dir.path().join("embedding.json");
                assert!(matches!(
                    save_embedding_path(&embedding, &path),
                    Err(WordtableError::Serialization(_))
                ));
                assert!(matches!(
                    save_vector_map_path(embedding.vectors(), &path),
                    Err(WordtableError::Serialization(_))
                ));

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            deserialize::<Vec<IdRecord>, _>("/no/such/file.json"),
            Err(WordtableError::File { .. })
        ));
    }
}
