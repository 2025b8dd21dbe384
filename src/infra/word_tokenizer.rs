// ============================================================
// Layer 6 — Word-Level Tokenizer Builder
// ============================================================
// Builds a HuggingFace `tokenizers` WordLevel tokenizer whose
// ids are exactly the vocabulary indices:
//
//   normalizer:    Lowercase
//   pre_tokenizer: WhitespaceSplit   (same split as str::split_whitespace)
//   model:         WordLevel, unknown words → <unk>
//
// The tokenizer JSON is assembled directly and parsed in memory,
// which avoids the trainer's ModelWrapper type constraints.
//
// Reference: tokenizers crate documentation (tokenizer.json format)

use anyhow::Result;
use std::str::FromStr;
use tokenizers::Tokenizer;

/// Reserved token for out-of-vocabulary words (index 0)
pub const UNK_TOKEN: &str = "<unk>";

/// Reserved token used to pad sequences (index 1)
pub const PAD_TOKEN: &str = "<pad>";

/// Build a WordLevel tokenizer where `tokens[i]` encodes to id `i`.
///
/// `tokens` must start with the two reserved tokens.
pub fn build_word_level(tokens: &[String]) -> Result<Tokenizer> {
    anyhow::ensure!(
        tokens.len() >= 2 && tokens[0] == UNK_TOKEN && tokens[1] == PAD_TOKEN,
        "vocabulary must start with {UNK_TOKEN} and {PAD_TOKEN}"
    );

    let mut vocab = serde_json::Map::with_capacity(tokens.len());
    for (id, token) in tokens.iter().enumerate() {
        vocab.insert(token.clone(), serde_json::json!(id));
    }

    let special = |id: usize, content: &str| {
        serde_json::json!({
            "id": id, "content": content, "single_word": false, "lstrip": false,
            "rstrip": false, "normalized": false, "special": true
        })
    };

    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [special(0, UNK_TOKEN), special(1, PAD_TOKEN)],
        "normalizer": { "type": "Lowercase" },
        "pre_tokenizer": { "type": "WhitespaceSplit" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": UNK_TOKEN
        }
    });

    Tokenizer::from_str(&tokenizer_json.to_string())
        .map_err(|e| anyhow::anyhow!("Cannot build word-level tokenizer: {e}"))
}

/// Encode `text` to vocabulary ids.
pub fn encode_ids(tokenizer: &Tokenizer, text: &str) -> Result<Vec<u32>> {
    let encoding = tokenizer
        .encode(text, false)
        .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;
    Ok(encoding.get_ids().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(words: &[&str]) -> Vec<String> {
        [UNK_TOKEN, PAD_TOKEN]
            .iter()
            .chain(words)
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_ids_follow_vocabulary_order() {
        let tok = build_word_level(&vocab(&["the", "film", "was", "great"])).unwrap();
        assert_eq!(encode_ids(&tok, "the film was great").unwrap(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_lowercases_and_maps_unknown() {
        let tok = build_word_level(&vocab(&["great"])).unwrap();
        assert_eq!(encode_ids(&tok, "GREAT  popcorn").unwrap(), vec![2, 0]);
    }

    #[test]
    fn test_whitespace_split_keeps_punctuation() {
        let tok = build_word_level(&vocab(&["great!", "great"])).unwrap();
        assert_eq!(encode_ids(&tok, "great! great").unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_empty_text() {
        let tok = build_word_level(&vocab(&[])).unwrap();
        assert!(encode_ids(&tok, "").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_vocabulary_without_reserved_tokens() {
        let words = vec!["great".to_string()];
        assert!(build_word_level(&words).is_err());
    }
}
