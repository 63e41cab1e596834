use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine as _,
};

/// Standard alphabet engine that tolerates missing padding and non-canonical
/// trailing bits, which share links produce constantly.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Decodes a Base64 string (standard or URL-safe alphabet) into raw bytes.
///
/// Whitespace is ignored and the input is padded to a multiple of four
/// before decoding. Returns `None` when the input is not Base64 at all.
pub fn base64_decode_bytes(input: &str) -> Option<Vec<u8>> {
    let mut cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned = url_safe_base64_reverse(&cleaned);
    let unpadded_len = cleaned.trim_end_matches('=').len();
    if unpadded_len == 0 {
        return None;
    }
    while cleaned.len() % 4 != 0 {
        cleaned.push('=');
    }
    LENIENT.decode(cleaned.as_bytes()).ok()
}

/// Decodes a Base64 string to its original form.
///
/// # Returns
/// The decoded string, or an empty string if the input is not Base64 or does
/// not decode to UTF-8.
pub fn base64_decode(input: &str) -> String {
    base64_decode_bytes(input)
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default()
}

/// Decodes `input` as Base64 only when the result looks like text.
///
/// Several schemes allow either a literal or a Base64-wrapped payload in the
/// same position. The decoded bytes are accepted only if every byte is a
/// printable character (or `\t`, `\n`, `\r`) and the whole result is valid
/// UTF-8; otherwise `input` is returned unchanged and the caller treats it as
/// literal text.
pub fn decode_base64_or_original(input: &str) -> String {
    match base64_decode_bytes(input) {
        Some(bytes) if looks_like_text(&bytes) => {
            String::from_utf8(bytes).unwrap_or_else(|_| input.to_string())
        }
        _ => input.to_string(),
    }
}

fn looks_like_text(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|&b| matches!(b, b'\t' | b'\n' | b'\r' | 0x20..=0x7e | 0x80..=0xff))
}
