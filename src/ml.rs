//! Feature extraction and pre-fitted models.
//!
//! The fitted state in this module is produced by an offline training run
//! and only ever read here:
//!
//! - [`vectorizer::TfidfVectorizer`] turns normalized text into a sparse
//!   [`feature::FeatureVector`]
//! - [`model::Model`] implementations ([`forest::RandomForest`],
//!   [`linear::LogisticRegression`]) map a feature vector to a class

pub mod feature;
pub mod forest;
pub mod linear;
pub mod model;
pub mod vectorizer;

pub use feature::FeatureVector;
pub use forest::{DecisionTree, RandomForest};
pub use linear::LogisticRegression;
pub use model::{Model, ModelArtifact};
pub use vectorizer::{Norm, TfidfVectorizer, VectorizerConfig};
