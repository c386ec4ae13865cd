use crate::error::{FacadeError, FacadeResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // type/subtype made of RFC 6838 restricted-name characters, either may be `*`
    static ref MIME_PATTERN: Regex = Regex::new(
        r"^(\*|[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*)/(\*|[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*)$"
    )
    .expect("Failed to compile MIME type pattern");
}

/// A MIME type filter such as `image/jpeg`, `video/*` or `*/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeFilter {
    like_pattern: String,
}

impl MimeFilter {
    pub fn parse(mime_type: &str) -> FacadeResult<Self> {
        let captures = MIME_PATTERN.captures(mime_type).ok_or_else(|| {
            FacadeError::InvalidArgument(format!("Malformed MIME type: {:?}", mime_type))
        })?;
        if &captures[1] == "*" && &captures[2] != "*" {
            return Err(FacadeError::InvalidArgument(format!(
                "Malformed MIME type: {:?}, a wildcard type needs a wildcard subtype",
                mime_type
            )));
        }

        let like_pattern = mime_type
            .chars()
            .map(|c| match c {
                '*' => "%".to_string(),
                '_' => "\\_".to_string(),
                c => c.to_string(),
            })
            .collect();
        Ok(Self { like_pattern })
    }

    /// Pattern for `mime_type LIKE ? ESCAPE '\'`.
    pub(crate) fn like_pattern(&self) -> &str {
        &self.like_pattern
    }
}
