//! OMDb request parameter types.

/// Separator used when showing a multi-word query back to the user.
const DISPLAY_SEPARATOR: &str = "+";

/// Title query assembled from command-line words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleQuery {
    /// Title words in the order given.
    words: Vec<String>,
}

impl TitleQuery {
    /// Creates a query from individual words.
    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the words joined with `+`.
    ///
    /// Example: `["star", "wars"]` -> `"star+wars"`
    #[must_use]
    pub fn joined(&self) -> String {
        self.words.join(DISPLAY_SEPARATOR)
    }

    /// Returns the title text sent as the `t` parameter.
    ///
    /// Words are joined with a space; form encoding turns each space into `+`.
    #[must_use]
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}
