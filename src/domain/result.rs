//! Crate-wide `Result` alias over [`LeafexError`]

use super::errors::LeafexError;

/// Result of a fallible Leafex operation
///
/// Host-model failures convert into it with `?`:
///
/// ```
/// use leafex::domain::errors::DocumentError;
/// use leafex::domain::result::Result;
///
/// fn first_child(children: &[usize]) -> Result<usize> {
///     let first = children
///         .first()
///         .ok_or_else(|| DocumentError::InvalidManifest("empty group".to_string()))?;
///     Ok(*first)
/// }
///
/// assert!(first_child(&[]).is_err());
/// ```
pub type Result<T> = std::result::Result<T, LeafexError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DocumentError;

    fn read_group(readable: bool) -> Result<usize> {
        if readable {
            Ok(2)
        } else {
            Err(DocumentError::GroupUnreadable {
                name: "Body".to_string(),
                reason: "locked".to_string(),
            })?
        }
    }

    #[test]
    fn test_document_errors_propagate() {
        assert_eq!(read_group(true).unwrap(), 2);
        let err = read_group(false).unwrap_err();
        assert!(matches!(err, LeafexError::Document(_)));
        assert!(err.to_string().contains("Body"));
    }
}
