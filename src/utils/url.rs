//! URL encoding/decoding utilities

/// Decodes a URL-encoded string
///
/// `+` is kept as-is; share links encode spaces as `%20`.
///
/// # Returns
/// * String containing the decoded input
/// * Returns the original string if decoding fails
///
/// # Examples
/// ```
/// use linkparser::utils::url::url_decode;
///
/// let decoded = url_decode("Hello%20World%21");
/// assert_eq!(decoded, "Hello World!");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Splits `input` at the first `#`, returning the part before it and the
/// fragment (without the `#`), if any.
pub fn split_fragment(input: &str) -> (&str, Option<&str>) {
    match input.split_once('#') {
        Some((before, fragment)) => (before, Some(fragment)),
        None => (input, None),
    }
}

/// Removes one pair of surrounding square brackets from an IPv6 literal.
pub fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}
