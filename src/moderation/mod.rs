pub mod classifier;

pub use classifier::{check, classify, CommentClassifier, SpamSignal, Verdict};
