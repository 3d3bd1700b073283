//! Security utilities

/// Constant-time string comparison to prevent timing attacks.
/// Returns true if both strings are equal.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
  if a.len() != b.len() {
    return false;
  }

  let mut result: u8 = 0;
  for (x, y) in a.bytes().zip(b.bytes()) {
    result |= x ^ y;
  }
  result == 0
}
