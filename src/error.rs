use thiserror::Error;

/// Returned when a typed access does not exactly match the stored type.
///
/// The `downcast_ref` and `downcast_mut` accessors report the same condition
/// with `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("bad any cast")]
pub struct BadAnyCast;

#[cfg(test)]
mod tests {
    use super::BadAnyCast;

    #[test]
    fn test_display() {
        assert_eq!(BadAnyCast.to_string(), "bad any cast");
    }
}
