use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use verinews::artifact::{self, ArtifactFormat, ArtifactKind};
use verinews::classifier::NewsClassifier;
use verinews::config::VeriNewsConfig;
use verinews::error::{Result, VeriNewsError};
use verinews::label::Label;
use verinews::ml::forest::{DecisionTree, RandomForest};
use verinews::ml::linear::LogisticRegression;
use verinews::ml::model::{Model, ModelArtifact};
use verinews::ml::vectorizer::{TfidfVectorizer, VectorizerConfig};

const VOCABULARY: [&str; 6] = ["confirm", "hoax", "scientist", "shock", "water", "wet"];

fn test_vectorizer() -> TfidfVectorizer {
    let vocabulary = VOCABULARY
        .iter()
        .enumerate()
        .map(|(i, term)| (term.to_string(), i));
    TfidfVectorizer::new(vocabulary, vec![1.0; VOCABULARY.len()], VectorizerConfig::default())
        .unwrap()
}

/// A one-split forest: anything mentioning "hoax" is fake.
fn test_forest() -> ModelArtifact {
    let tree = DecisionTree::new(
        vec![1, -1, -1],
        vec![2, -1, -1],
        vec![1, -2, -2],
        vec![0.0, -2.0, -2.0],
        vec![vec![10.0, 10.0], vec![10.0, 0.0], vec![0.0, 10.0]],
    );
    RandomForest::new(VOCABULARY.len(), vec![0, 1], vec![tree])
        .unwrap()
        .into()
}

fn write_artifacts(dir: &Path, format: ArtifactFormat) -> Result<VeriNewsConfig> {
    let extension = match format {
        ArtifactFormat::Json => "json",
        ArtifactFormat::Binary => "bin",
    };
    let vectorizer_path = dir.join(format!("vectorizer.{extension}"));
    let model_path = dir.join(format!("model.{extension}"));

    artifact::save(&test_vectorizer(), &vectorizer_path, format)?;
    artifact::save(&test_forest(), &model_path, format)?;

    Ok(VeriNewsConfig::default()
        .with_vectorizer_path(vectorizer_path)
        .with_model_path(model_path))
}

fn assert_names_artifact(err: &VeriNewsError, kind: ArtifactKind, path: &Path) {
    match err {
        VeriNewsError::Artifact {
            kind: err_kind,
            path: err_path,
            ..
        } => {
            assert_eq!(*err_kind, kind, "{err}");
            assert_eq!(err_path, path, "{err}");
        }
        other => panic!("expected an artifact error, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains(&kind.to_string()), "{message}");
    assert!(message.contains(&path.display().to_string()), "{message}");
}

#[test]
fn test_end_to_end_json() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_artifacts(dir.path(), ArtifactFormat::Json)?;

    let classifier = NewsClassifier::load(&config)?;
    assert_eq!(
        classifier.classify_news("Scientists confirm water is wet!!!"),
        Label::Real
    );
    assert_eq!(classifier.classify_news("Shocking hoax!"), Label::Fake);
    Ok(())
}

#[test]
fn test_end_to_end_binary() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_artifacts(dir.path(), ArtifactFormat::Binary)?;

    let classifier = NewsClassifier::load(&config)?;
    let prediction = classifier.predict("Shocking hoax!");
    assert_eq!(prediction.label, Label::Fake);
    assert_eq!(prediction.normalized.as_str(), "shock hoax");
    assert_eq!(classifier.classify_news("Scientists confirm water is wet!!!"), Label::Real);
    Ok(())
}

#[test]
fn test_formats_without_extension() -> Result<()> {
    let dir = TempDir::new()?;
    let vectorizer_path = dir.path().join("vectorizer.dat");
    let model_path = dir.path().join("model.dat");
    artifact::save(&test_vectorizer(), &vectorizer_path, ArtifactFormat::Json)?;
    artifact::save(&test_forest(), &model_path, ArtifactFormat::Binary)?;

    let config = VeriNewsConfig::default()
        .with_vectorizer_path(&vectorizer_path)
        .with_model_path(&model_path);
    let classifier = NewsClassifier::load(&config)?;
    assert_eq!(classifier.classify_news("a hoax"), Label::Fake);
    Ok(())
}

#[test]
fn test_hand_written_json_artifacts() -> Result<()> {
    let dir = TempDir::new()?;
    let vectorizer_path = dir.path().join("vectorizer.json");
    let model_path = dir.path().join("model.json");

    fs::write(
        &vectorizer_path,
        r#"{
            "format_version": 1,
            "kind": "vectorizer",
            "payload": {
                "vocabulary": {"hoax": 0, "scientist": 1},
                "idf": [1.5, 1.2],
                "config": {"ngram_range": [1, 1], "norm": "l2"}
            }
        }"#,
    )?;
    fs::write(
        &model_path,
        r#"{
            "format_version": 1,
            "kind": "model",
            "payload": {
                "logistic_regression": {
                    "classes": [0, 1],
                    "coef": [3.0, -3.0],
                    "intercept": 0.0
                }
            }
        }"#,
    )?;

    let config = VeriNewsConfig::default()
        .with_vectorizer_path(&vectorizer_path)
        .with_model_path(&model_path);
    let classifier = NewsClassifier::load(&config)?;

    assert_eq!(classifier.model().name(), "logistic_regression");
    assert_eq!(classifier.classify_news("Total hoax"), Label::Fake);
    assert_eq!(classifier.classify_news("Scientists agree"), Label::Real);
    // nothing in the vocabulary: decision is exactly 0, which is not positive
    assert_eq!(classifier.classify_news("unrelated words"), Label::Real);
    Ok(())
}

#[test]
fn test_missing_artifact() {
    let dir = TempDir::new().unwrap();
    let config = write_artifacts(dir.path(), ArtifactFormat::Json).unwrap();
    let missing = dir.path().join("nowhere.json");

    let err = NewsClassifier::load(&config.clone().with_vectorizer_path(&missing)).unwrap_err();
    assert_names_artifact(&err, ArtifactKind::Vectorizer, &missing);

    let err = NewsClassifier::load(&config.with_model_path(&missing)).unwrap_err();
    assert_names_artifact(&err, ArtifactKind::Model, &missing);
}

#[test]
fn test_corrupt_artifact() {
    let dir = TempDir::new().unwrap();
    let config = write_artifacts(dir.path(), ArtifactFormat::Binary).unwrap();

    let bytes = fs::read(&config.model_path).unwrap();
    fs::write(&config.model_path, &bytes[..bytes.len() / 2]).unwrap();

    let err = NewsClassifier::load(&config).unwrap_err();
    assert_names_artifact(&err, ArtifactKind::Model, &config.model_path);

    fs::write(&config.vectorizer_path, b"{ not json").unwrap();
    let err = NewsClassifier::load(&config).unwrap_err();
    assert_names_artifact(&err, ArtifactKind::Vectorizer, &config.vectorizer_path);
}

#[test]
fn test_wrong_version_and_kind() {
    let dir = TempDir::new().unwrap();
    let config = write_artifacts(dir.path(), ArtifactFormat::Json).unwrap();

    let content = fs::read_to_string(&config.vectorizer_path).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&content).unwrap();
    value["format_version"] = serde_json::json!(99);
    fs::write(&config.vectorizer_path, value.to_string()).unwrap();

    let err = NewsClassifier::load(&config).unwrap_err();
    assert_names_artifact(&err, ArtifactKind::Vectorizer, &config.vectorizer_path);
    assert!(err.to_string().contains("format_version 99"), "{err}");

    // a model where the vectorizer is expected
    let swapped = config.clone().with_vectorizer_path(&config.model_path);
    let err = NewsClassifier::load(&swapped).unwrap_err();
    assert_names_artifact(&err, ArtifactKind::Vectorizer, &config.model_path);
    assert!(err.to_string().contains("holds a model artifact"), "{err}");
}

#[test]
fn test_dimension_mismatch_names_model() {
    let dir = TempDir::new().unwrap();
    let config = write_artifacts(dir.path(), ArtifactFormat::Json).unwrap();

    let narrow = LogisticRegression::new(vec![0, 1], vec![1.0; 3], 0.0).unwrap();
    artifact::save(&ModelArtifact::from(narrow), &config.model_path, ArtifactFormat::Json)
        .unwrap();

    let err = NewsClassifier::load(&config).unwrap_err();
    assert_names_artifact(&err, ArtifactKind::Model, &config.model_path);
    assert!(err.to_string().contains("expects 3 features"), "{err}");
}

#[test]
fn test_invalid_classes_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_artifacts(dir.path(), ArtifactFormat::Json).unwrap();

    fs::write(
        &config.model_path,
        r#"{"format_version": 1, "kind": "model", "payload": {"logistic_regression":
            {"classes": [0, 2], "coef": [1, 1, 1, 1, 1, 1], "intercept": 0}}}"#,
    )
    .unwrap();

    let err = NewsClassifier::load(&config).unwrap_err();
    assert_names_artifact(&err, ArtifactKind::Model, &config.model_path);
}

#[test]
fn test_convert_preserves_predictions() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_artifacts(dir.path(), ArtifactFormat::Json)?;

    let vectorizer: TfidfVectorizer = artifact::load(&config.vectorizer_path, None)?;
    let model: ModelArtifact = artifact::load(&config.model_path, None)?;
    let binary = VeriNewsConfig::default()
        .with_vectorizer_path(dir.path().join("vectorizer.bincode"))
        .with_model_path(dir.path().join("model.bincode"));
    artifact::save(&vectorizer, &binary.vectorizer_path, ArtifactFormat::Binary)?;
    artifact::save(&model, &binary.model_path, ArtifactFormat::Binary)?;

    let from_json = NewsClassifier::load(&config)?;
    let from_binary = NewsClassifier::load(&binary)?;
    for text in [
        "Shocking hoax!",
        "Scientists confirm water is wet",
        "nothing known here",
        "",
    ] {
        assert_eq!(from_json.predict(text), from_binary.predict(text), "{text:?}");
    }
    Ok(())
}

#[test]
fn test_classifier_shared_between_threads() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_artifacts(dir.path(), ArtifactFormat::Binary)?;
    let classifier = Arc::new(NewsClassifier::load(&config)?);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || {
                let text = if i % 2 == 0 {
                    "Shocking hoax!"
                } else {
                    "Scientists confirm water is wet"
                };
                (0..100)
                    .map(|_| classifier.classify_news(text))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = if i % 2 == 0 { Label::Fake } else { Label::Real };
        assert!(handle.join().unwrap().iter().all(|&label| label == expected));
    }
    Ok(())
}
