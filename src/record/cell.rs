/// One table cell in its encoded form: an optional absolute link target,
/// the separator, then the cell's trimmed visible text.
///
/// Known limitation: the separator is a plain `+`, which the source site is
/// not guaranteed to keep out of visible text or URLs. If it ever appears
/// before the intended split point, decoding is ambiguous. The crawl treats
/// this as an accepted risk rather than guessing at an escape scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellToken(String);

/// Separator between the link target and the visible text.
pub const SEP: char = '+';

impl CellToken {
    /// Encode a cell from its visible text and optional link target.
    pub fn new(text: &str, url: Option<&str>) -> Self {
        match url {
            Some(u) => Self(format!("{u}{SEP}{text}")),
            None => Self(text.to_string()),
        }
    }

    /// The link target, if the token carries one.
    pub fn url(&self) -> Option<&str> {
        self.0.split_once(SEP).map(|(url, _)| url)
    }

    /// The visible text. With no separator present, the whole token.
    pub fn text(&self) -> &str {
        match self.0.split_once(SEP) {
            Some((_, text)) => text,
            None => &self.0,
        }
    }
}
