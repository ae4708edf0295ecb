#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn artifact_paths_match_harness_derivation() {
    let (output, marker) = artifact_paths(Path::new("/work"), "tok-1");
    assert_eq!(output, PathBuf::from("/work/textsink_tok-1.txt"));
    assert_eq!(marker, PathBuf::from("/work/textsink_tok-1.txt.ready"));
}

#[test]
fn artifact_paths_are_distinct_per_token() {
    let (a, _) = artifact_paths(Path::new("/work"), "a");
    let (b, _) = artifact_paths(Path::new("/work"), "b");
    assert_ne!(a, b);
}
