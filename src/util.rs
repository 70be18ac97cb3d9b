//! Input sanitization applied before anything reaches an engine.
//!
//! Text fields never produce errors: bad characters are filtered and extra
//! characters truncated, so the engine only ever sees well-formed answers.

use crate::bits::Byte;

/// Uppercase, keep hex digits only, at most two of them.
pub fn sanitize_hex(text: &str) -> String {
  text
    .chars()
    .filter(|c| c.is_ascii_hexdigit())
    .map(|c| c.to_ascii_uppercase())
    .take(2)
    .collect()
}

/// Bits for a typed hex value, or `None` while the field is still empty.
pub fn hex_to_byte(text: &str) -> Option<Byte> {
  let clean = sanitize_hex(text);
  u8::from_str_radix(&clean, 16).ok().map(Byte::from_u8)
}

/// Single-character fields keep only their first character.
pub fn first_char(text: &str) -> Option<char> {
  text.chars().next()
}

/// Printable ASCII (32..=126).
pub fn is_printable_ascii(c: char) -> bool {
  (' '..='~').contains(&c)
}

/// Bits of an ASCII character; non-ASCII yields `None`.
pub fn char_to_byte(c: char) -> Option<Byte> {
  if c.is_ascii() {
    Some(Byte::from_u8(c as u8))
  } else {
    None
  }
}

/// Character encoded by `bits`, only for values up to 127.
pub fn byte_to_char(bits: &Byte) -> Option<char> {
  let value = bits.to_u8();
  if value <= 0x7F {
    Some(char::from(value))
  } else {
    None
  }
}

/// Bits of the first character of `text`, all zero when empty or non-ASCII.
pub fn text_to_byte(text: &str) -> Byte {
  first_char(text).and_then(char_to_byte).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sanitize_hex() {
    assert_eq!(sanitize_hex("a"), "A");
    assert_eq!(sanitize_hex("fz3q"), "F3");
    assert_eq!(sanitize_hex("abc"), "AB");
    assert_eq!(sanitize_hex("xyz"), "");
  }

  #[test]
  fn test_hex_to_byte() {
    assert_eq!(hex_to_byte("ad").unwrap().to_string(), "10101101");
    assert_eq!(hex_to_byte("0x7f").unwrap().to_u8(), 0x07);
    assert!(hex_to_byte("").is_none());
    assert!(hex_to_byte("zz").is_none());
  }

  #[test]
  fn test_ascii_helpers() {
    assert_eq!(first_char("Hello"), Some('H'));
    assert_eq!(first_char(""), None);
    assert_eq!(char_to_byte('A').unwrap().to_string(), "01000001");
    assert!(char_to_byte('é').is_none());
    assert_eq!(byte_to_char(&Byte::from_u8(0x41)), Some('A'));
    assert_eq!(byte_to_char(&Byte::from_u8(0x80)), None);
    assert_eq!(text_to_byte("").to_u8(), 0);
    assert!(is_printable_ascii(' '));
    assert!(is_printable_ascii('~'));
    assert!(!is_printable_ascii('\u{7f}'));
  }
}
