//! Validation helpers for DTOs.

use validator::ValidationError;

const MAX_NAME_LENGTH: usize = 64;
const MAX_COLOR_NAME_LENGTH: usize = 32;

/// Validates that a team name is non-blank and at most 64 characters.
pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("team_name_blank");
        err.message = Some("Team name must not be blank".into());
        return Err(err);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("team_name_length");
        err.message = Some(
            format!("Team name must be at most {MAX_NAME_LENGTH} characters").into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Validates that a color is either a `#rrggbb` hex value or a short
/// alphabetic color name (e.g. `red`).
pub fn validate_team_color(color: &str) -> Result<(), ValidationError> {
    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(());
        }
        let mut err = ValidationError::new("team_color_hex");
        err.message = Some("Hex colors must be of the form #rrggbb".into());
        return Err(err);
    }

    if !color.is_empty()
        && color.len() <= MAX_COLOR_NAME_LENGTH
        && color.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Ok(());
    }

    let mut err = ValidationError::new("team_color_format");
    err.message = Some("Color must be #rrggbb or an alphabetic color name".into());
    Err(err)
}
