use common::storage::canonical_filename;

/// Longest canonical filename accepted for an image row.
pub const MAX_FILENAME_LEN: usize = 255;

/// Result of validating a client-supplied image filename.
#[derive(Debug)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Canonical filename exceeds [`MAX_FILENAME_LEN`].
    TooLong,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename starts with a dot (hidden file).
    Hidden,
    /// Filename contains control characters (CR, LF, NUL, etc.).
    ControlCharacter,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::TooLong => "Filename must be at most 255 characters once escaped",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
        }
    }
}

/// Validates a flat image filename and returns its canonical stored form.
///
/// The canonical form is what image rows hold and what object keys end in,
/// so the presign endpoint and the image writers must both go through here.
pub fn canonical_image_filename(filename: &str) -> Result<String, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    let canonical = canonical_filename(trimmed);
    if canonical.len() > MAX_FILENAME_LEN {
        return Err(FilenameError::TooLong);
    }

    Ok(canonical)
}
