use crate::error::AppError;
use uuid::Uuid;

/// Checks that a path segment is a UUID and returns it trimmed. Case is
/// kept as given; the engine matches user ids without regard to case.
pub fn validate_user_id(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed)
        .map(|_| trimmed.to_string())
        .map_err(|_| AppError::BadRequest(format!("Invalid user id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_uuid_and_keeps_case() {
        let id = validate_user_id(" 7F1C1F1E-0000-4000-8000-00000000000A ").unwrap();
        assert_eq!(id, "7F1C1F1E-0000-4000-8000-00000000000A");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(validate_user_id("player-one"), Err(AppError::BadRequest(_))));
        assert!(matches!(validate_user_id(""), Err(AppError::BadRequest(_))));
    }
}
