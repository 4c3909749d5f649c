use std::env;
use std::path::PathBuf;

use crate::constants::{SPM_VOCAB_PATH_ENV, VOCAB_FILE_NAME};

fn default_vocab_candidates() -> &'static [&'static str] {
    &[
        "~/.local/share/sentencepiece",
        "/usr/local/share/sentencepiece",
        "/usr/share/sentencepiece",
    ]
}

pub(crate) fn discover_default_vocab_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(SPM_VOCAB_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    for candidate in default_vocab_candidates() {
        let dir = if let Some(stripped) = candidate.strip_prefix("~/") {
            match env::var_os("HOME") {
                Some(home) => PathBuf::from(home).join(stripped),
                None => continue,
            }
        } else {
            PathBuf::from(candidate)
        };
        let path = dir.join(VOCAB_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }

    None
}
