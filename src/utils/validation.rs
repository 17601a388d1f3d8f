use std::path::Path;

/// S3 rejects object keys longer than this many bytes.
pub const MAX_OBJECT_KEY_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a storage object key taken from a request body.
///
/// An absent or empty key is rejected with the message clients already
/// match on ("Key is required").
pub fn validate_object_key(key: Option<&str>) -> Result<&str, ValidationError> {
    let key = key.unwrap_or_default();

    if key.is_empty() {
        return Err(ValidationError {
            code: "KEY_REQUIRED",
            message: "Key is required".to_string(),
        });
    }

    if key.len() > MAX_OBJECT_KEY_LEN {
        return Err(ValidationError {
            code: "KEY_TOO_LONG",
            message: format!("Key must not exceed {} bytes", MAX_OBJECT_KEY_LEN),
        });
    }

    Ok(key)
}

/// Strips path components and reserved characters from an uploaded file name.
pub fn sanitize_filename(filename: &str) -> Result<String, ValidationError> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(ValidationError {
            code: "INVALID_FILENAME",
            message: "Filename cannot be empty".to_string(),
        });
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!("Path traversal attempt detected: {}", filename);
    }

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control()
                || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ';')
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Limit length safely for UTF-8
    let sanitized = if sanitized.len() > 255 {
        let mut end = 255;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    if sanitized.starts_with('.') {
        return Err(ValidationError {
            code: "HIDDEN_FILE",
            message: "Hidden files (starting with '.') are not allowed".to_string(),
        });
    }

    Ok(sanitized)
}

/// Object key for a user upload: `uploads/<user>/<uuid>-<name>`.
pub fn upload_object_key(user_id: &str, filename: &str) -> String {
    format!("uploads/{}/{}-{}", user_id, uuid::Uuid::new_v4(), filename)
}
