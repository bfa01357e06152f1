//! Queue-number assignment.

/// Derive the human-readable queue code for the `existing + 1`-th
/// reservation of a doctor on one date: the uppercased first character of
/// the specialty, a dash, and the ordinal zero-padded to three digits.
/// Unknown specialties fall back to the `A` prefix.
///
/// Callers must invoke this inside the same critical section as the
/// reservation insert; the count is only meaningful while the table is
/// locked.
pub fn allocate_queue_number(specialty: &str, existing: usize) -> String {
    let prefix = specialty
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('A');
    format!("{prefix}-{:03}", existing + 1)
}
