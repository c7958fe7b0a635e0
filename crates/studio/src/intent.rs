//! User intents raised by a front end.

use std::str::FromStr;

use thiserror::Error;

/// A request from the presentation layer, processed by
/// [`Session::dispatch`](crate::session::Session::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    RequestNewPrompt,
    /// Switch to `all` or a category name.
    SetFilter(String),
    CopyPrompt,
    ToggleFavorite,
    SharePrompt,
}

/// A command word that does not map to any [`Intent`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command '{0}' (expected draw, filter <name>, copy, favorite, share)")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    /// Parses the short command words used by scripted front ends:
    /// `draw`, `filter <name>`, `copy`, `favorite`, `share`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let arg = words.next();
        match (verb.as_str(), arg) {
            ("draw" | "next", None) => Ok(Self::RequestNewPrompt),
            ("filter", Some(name)) => Ok(Self::SetFilter(name.to_string())),
            ("copy", None) => Ok(Self::CopyPrompt),
            ("favorite" | "fav", None) => Ok(Self::ToggleFavorite),
            ("share", None) => Ok(Self::SharePrompt),
            _ => Err(UnknownIntent(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_words() {
        assert_eq!("draw".parse(), Ok(Intent::RequestNewPrompt));
        assert_eq!(" Next ".parse(), Ok(Intent::RequestNewPrompt));
        assert_eq!(
            "filter minimalist".parse(),
            Ok(Intent::SetFilter("minimalist".into()))
        );
        assert_eq!("copy".parse(), Ok(Intent::CopyPrompt));
        assert_eq!("fav".parse(), Ok(Intent::ToggleFavorite));
        assert_eq!("share".parse(), Ok(Intent::SharePrompt));
    }

    #[test]
    fn rejects_unknown_or_malformed() {
        assert!("filter".parse::<Intent>().is_err());
        assert!("draw twice".parse::<Intent>().is_err());
        let err = "shuffle".parse::<Intent>().unwrap_err();
        assert!(err.to_string().contains("'shuffle'"));
        assert!("".parse::<Intent>().is_err());
    }
}
