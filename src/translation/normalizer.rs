/*!
 * Input and output normalization around the backend calls.
 */

use html_escape::decode_html_entities;

/// Replace missing input texts with empty strings
pub fn normalize_inputs(texts: Vec<Option<String>>) -> Vec<String> {
    texts.into_iter().map(Option::unwrap_or_default).collect()
}

/// Decode HTML entities the backend left in a translation
pub fn decode_entities(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

/// Turn raw backend values into the final, plain-string translations
///
/// String values are entity-decoded. A position holding no string is filled
/// with the original text at that position. Both sequences have the same
/// length; extra values on either side are ignored by the zip.
pub fn finalize(translations: Vec<Option<String>>, originals: &[String]) -> Vec<String> {
    translations
        .into_iter()
        .zip(originals)
        .map(|(translated, original)| match translated {
            Some(text) => decode_entities(&text),
            None => original.clone(),
        })
        .collect()
}
