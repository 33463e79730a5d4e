/// Compute effective limit with precedence: global flag -> configured default.
#[must_use]
pub fn effective_limit(global: Option<u32>, configured: u32) -> usize {
    usize::try_from(global.unwrap_or(configured)).unwrap_or(usize::MAX)
}

/// Keep at most `limit` items.
pub fn apply_limit<T>(mut items: Vec<T>, global: Option<u32>, configured: u32) -> Vec<T> {
    items.truncate(effective_limit(global, configured));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_takes_precedence() {
        assert_eq!(effective_limit(Some(5), 20), 5);
    }

    #[test]
    fn configured_default_used_when_flag_missing() {
        assert_eq!(effective_limit(None, 20), 20);
    }

    #[test]
    fn truncates_lists() {
        assert_eq!(apply_limit(vec![1, 2, 3], Some(2), 20), [1, 2]);
        assert_eq!(apply_limit(vec![1, 2, 3], None, 20), [1, 2, 3]);
    }
}
