/// Convert an empty string to `None`, non-empty to `Some`.
#[must_use]
pub fn nonempty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Convert a protobuf `uint32` to `Option<usize>`: 0 means "not set".
#[must_use]
pub fn nonzero_usize(v: u32) -> Option<usize> {
    if v == 0 {
        None
    } else {
        usize::try_from(v).ok()
    }
}

/// Clamp a count into a protobuf `uint32`.
#[must_use]
pub fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
