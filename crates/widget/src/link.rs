//! `wa.me` deep-link construction.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const WA_ME_BASE: &str = "https://wa.me/";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Keep only ASCII digits. No length or country-code validation.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Percent-encode text for use as a single query component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT_ENCODE_SET).to_string()
}

/// Build `https://wa.me/<digits>?text=<greeting>`.
///
/// An empty or nonsensical phone number still produces a URL.
pub fn chat_link(phone: &str, greeting: &str) -> String {
    format!(
        "{WA_ME_BASE}{}?text={}",
        digits_only(phone),
        encode_component(greeting)
    )
}
