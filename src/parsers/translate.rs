//! Machine translation response shapes.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::ProviderError;

/// Which response shape the translation endpoint was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateShape {
    /// `[[["翻译","translate",null,null,10]],null,"en",...]`
    SingleSentence,
    /// `{"sentences":[{"trans":"这","orig":"The"},{"translit":"Zhè"}],"src":"en",...}`
    Detailed,
}

/// Detailed-mode body, only the fields that are read
#[derive(Debug, Deserialize)]
struct DetailedResponse {
    #[serde(default)]
    sentences: Vec<DetailedSentence>,
}

#[derive(Debug, Deserialize)]
struct DetailedSentence {
    #[serde(default)]
    trans: Option<String>,
}

/// Extract the first translated segment from a response body
pub fn parse_translation(shape: TranslateShape, body: &str) -> Result<String, ProviderError> {
    match shape {
        TranslateShape::SingleSentence => {
            let value: Value = serde_json::from_str(body)
                .map_err(|e| ProviderError::ParseError(format!("invalid JSON: {}", e)))?;
            value
                .pointer("/0/0/0")
                .and_then(Value::as_str)
                .map(String::from)
                .ok_or_else(|| ProviderError::ParseError("no translated segment at [0][0][0]".to_string()))
        }
        TranslateShape::Detailed => {
            let response: DetailedResponse = serde_json::from_str(body)
                .map_err(|e| ProviderError::ParseError(format!("invalid JSON: {}", e)))?;
            response
                .sentences
                .into_iter()
                .next()
                .and_then(|sentence| sentence.trans)
                .ok_or_else(|| ProviderError::ParseError("no sentences[0].trans".to_string()))
        }
    }
}
