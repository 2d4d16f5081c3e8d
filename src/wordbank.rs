use crate::error::{Result, WordleError};
use crate::info_log;
use crate::word::Dictionary;
use std::fs;
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

pub const SYSTEM_DICTIONARY: &str = "/usr/share/dict/words";

/// Every whitespace-separated token of length five, upper-cased.
pub fn load_wordbank_from_str(data: &str) -> Dictionary {
    Dictionary::from_tokens(data.split_whitespace())
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Dictionary> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| WordleError::Dictionary {
        path: path.to_path_buf(),
        source,
    })?;
    let dictionary = load_wordbank_from_str(&data);
    info_log!("Loaded {} words from {}", dictionary.len(), path.display());
    Ok(dictionary)
}

/// The system word list when it is readable and has five-letter words,
/// otherwise the embedded word bank.
pub fn load_default_wordbank() -> Dictionary {
    match load_wordbank_from_file(SYSTEM_DICTIONARY) {
        Ok(dictionary) if !dictionary.is_empty() => dictionary,
        _ => {
            info_log!("Falling back to the embedded word bank");
            load_wordbank_from_str(EMBEDDED_WORDBANK)
        }
    }
}

/// Load `path` if given, the default word bank otherwise.
pub fn load_dictionary(path: Option<&Path>) -> Result<Dictionary> {
    match path {
        Some(path) => load_wordbank_from_file(path),
        None => Ok(load_default_wordbank()),
    }
}
