use nutype::nutype;

use crate::BacklinkError;

#[nutype(
    sanitize(trim, lowercase),
    validate(regex = "^[a-z]{2}[a-z0-9-]*$"),
    derive(Debug, Display, Clone, PartialEq)
)]
pub struct Language(String);

impl Language {
    /// Parses a language code, mapping the validation error into `BacklinkError`.
    /// # Errors
    /// Returns `InvalidLanguage` if the code is not a plausible language code.
    pub fn parse<S: Into<String>>(code: S) -> Result<Self, BacklinkError> {
        let code = code.into();
        Self::try_new(code.clone()).map_err(|_| BacklinkError::InvalidLanguage(code))
    }

    /// English, the language names are searched in unless told otherwise.
    /// # Panics
    /// Never; "en" is a valid code.
    #[allow(clippy::unwrap_used)]
    pub fn english() -> Self {
        Self::try_new("en").unwrap()
    }
}
