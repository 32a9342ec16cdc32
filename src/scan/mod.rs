pub mod firebase;

pub use firebase::{FirebaseClassifier, classify_response};
