use std::collections::BTreeMap;
use std::error::Error;
use std::fs;

use chatprep::{
    ArtifactCodec, ArtifactError, ConfigLoadError, EmbeddingError, EmbeddingTable,
    QuestionEncoder, ResourceConfig, ResourceError, ResourceKind, StopwordError, load_artifact,
    store_artifact,
};
use serde::Serialize;
use tempfile::tempdir;

/// Same field layout as a serialized `EmbeddingTable`, without its checks.
#[derive(Serialize)]
struct UncheckedTable {
    vectors: BTreeMap<String, Vec<f32>>,
    dim: usize,
}

#[test]
fn missing_stopwords_surface_as_stopword_error() {
    let dir = tempdir().unwrap();
    let config = ResourceConfig::with_base_dir(dir.path());

    let err = QuestionEncoder::from_config(&config).unwrap_err();
    match err {
        ResourceError::Stopwords(StopwordError::Io { path, .. }) => {
            assert_eq!(path, config.resolve(ResourceKind::Stopwords));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_embeddings_surface_as_embedding_error() {
    let dir = tempdir().unwrap();
    let config = ResourceConfig::with_base_dir(dir.path());
    let stopwords = config.resolve(ResourceKind::Stopwords);
    fs::create_dir_all(stopwords.parent().unwrap()).unwrap();
    fs::write(&stopwords, "the\n").unwrap();

    let err = QuestionEncoder::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        ResourceError::Embeddings(EmbeddingError::Open { .. })
    ));
    assert!(err.source().is_some());
}

#[test]
fn empty_stopword_file_is_rejected() {
    let dir = tempdir().unwrap();
    let config = ResourceConfig::with_base_dir(dir.path());
    let stopwords = config.resolve(ResourceKind::Stopwords);
    fs::create_dir_all(stopwords.parent().unwrap()).unwrap();
    fs::write(&stopwords, "\n\n").unwrap();

    assert!(matches!(
        config.load_stopwords(),
        Err(ResourceError::Stopwords(StopwordError::Empty { .. }))
    ));
}

#[test]
fn malformed_embedding_files_report_the_line() {
    let dir = tempdir().unwrap();
    let config = ResourceConfig::with_base_dir(dir.path());
    let path = config.resolve(ResourceKind::WordEmbeddings);
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    fs::write(&path, "").unwrap();
    assert!(matches!(
        config.load_word_embeddings(),
        Err(ResourceError::Embeddings(EmbeddingError::Empty))
    ));

    fs::write(&path, "sort\t1.0\t2.0\nlist\t1.0\tabc\n").unwrap();
    assert!(matches!(
        config.load_word_embeddings(),
        Err(ResourceError::Embeddings(EmbeddingError::Parse { line: 2, .. }))
    ));

    fs::write(&path, "sort\t1.0\t2.0\nlist\t1.0\n").unwrap();
    assert!(matches!(
        config.load_word_embeddings(),
        Err(ResourceError::Embeddings(EmbeddingError::DimensionMismatch {
            line: 2,
            expected: 2,
            found: 1
        }))
    ));

    fs::write(&path, "sort\t1.0\t2.0\nlist\n").unwrap();
    assert!(matches!(
        config.load_word_embeddings(),
        Err(ResourceError::Embeddings(EmbeddingError::MissingVector { line: 2, .. }))
    ));
}

#[test]
fn missing_and_foreign_artifacts() {
    let dir = tempdir().unwrap();
    let config = ResourceConfig::with_base_dir(dir.path());

    let err = config
        .load_artifact::<Vec<String>>(ResourceKind::IntentRecognizer)
        .unwrap_err();
    match &err {
        ResourceError::Artifact { kind, source } => {
            assert_eq!(*kind, ResourceKind::IntentRecognizer);
            assert!(source.is_io());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("intent_recognizer artifact unavailable"));

    let tfidf = config.resolve(ResourceKind::TfidfVectorizer);
    fs::create_dir_all(tfidf.parent().unwrap()).unwrap();
    fs::write(&tfidf, b"\x80\x04\x95 not a bincode artifact").unwrap();
    assert!(matches!(
        config.load_artifact::<Vec<String>>(ResourceKind::TfidfVectorizer),
        Err(ResourceError::Artifact {
            source: ArtifactError::BadHeader,
            ..
        })
    ));
}

#[test]
fn thread_embeddings_for_unknown_tag() {
    let dir = tempdir().unwrap();
    let config = ResourceConfig::with_base_dir(dir.path());
    store_artifact(
        config.thread_embeddings_path("python").unwrap(),
        &vec![1u64, 2, 3],
        ArtifactCodec::default(),
    )
    .unwrap();

    let ids: Vec<u64> = config.load_thread_embeddings("python").unwrap();
    assert_eq!(ids, vec![1, 2, 3]);

    assert!(matches!(
        config.load_thread_embeddings::<Vec<u64>>("haskell"),
        Err(ResourceError::Artifact {
            kind: ResourceKind::ThreadEmbeddingsFolder,
            ..
        })
    ));
    assert!(matches!(
        config.load_thread_embeddings::<Vec<u64>>("../python"),
        Err(ResourceError::InvalidTag(tag)) if tag == "../python"
    ));
}

#[test]
fn bad_config_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("resources.yaml");

    fs::write(&path, "version: [unterminated").unwrap();
    assert!(matches!(
        ResourceConfig::from_file(&path),
        Err(ConfigLoadError::YamlParse(_))
    ));

    fs::write(&path, "version: \"1.0\"\nstopwords: \"\"\n").unwrap();
    assert!(matches!(
        ResourceConfig::from_file(&path),
        Err(ConfigLoadError::Validation(_))
    ));
}

#[test]
fn stored_table_with_ragged_vectors_fails_to_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("embeddings_table.pkl");

    let ragged = UncheckedTable {
        vectors: BTreeMap::from([
            ("cat".to_string(), vec![1.0, 0.0, 5.0]),
            ("dog".to_string(), vec![3.0]),
        ]),
        dim: 2,
    };
    store_artifact(&path, &ragged, ArtifactCodec::Plain).unwrap();

    let err = load_artifact::<EmbeddingTable, _>(&path).unwrap_err();
    match err {
        ArtifactError::Decode(message) => {
            assert!(message.contains("expected 2 vector components"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn stored_table_round_trips_through_artifact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("embeddings_table.pkl");
    let table =
        EmbeddingTable::from_entries([("cat", vec![1.0, 0.0]), ("dog", vec![3.0, 0.0])]).unwrap();

    store_artifact(&path, &table, ArtifactCodec::default()).unwrap();
    let loaded: EmbeddingTable = load_artifact(&path).unwrap();

    assert_eq!(loaded, table);
    assert_eq!(loaded.question_to_vec("cat dog"), vec![2.0, 0.0]);
}
