//! Optional normalization applied to a text before it is modelled.

use std::borrow::Cow;

/// Which normalizations [`preprocess`] applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Fold every character to lowercase
    pub lowercase: bool,
    /// Drop line feeds and carriage returns
    pub strip_newlines: bool,
}

impl TextOptions {
    /// Lowercase and strip newlines, the usual setup for analysing prose
    pub fn normalized() -> Self {
        TextOptions {
            lowercase: true,
            strip_newlines: true,
        }
    }

    fn is_noop(&self) -> bool {
        !self.lowercase && !self.strip_newlines
    }
}

/// Applies `options` to `text`, borrowing it when nothing would change.
pub fn preprocess<'a>(text: &'a str, options: &TextOptions) -> Cow<'a, str> {
    if options.is_noop() {
        return Cow::Borrowed(text);
    }

    let needs_work = text.chars().any(|ch| {
        (options.strip_newlines && is_newline(ch)) || (options.lowercase && has_lowercase_form(ch))
    });
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if options.strip_newlines && is_newline(ch) {
            continue;
        }
        if options.lowercase {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

fn is_newline(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

fn has_lowercase_form(ch: char) -> bool {
    let mut lower = ch.to_lowercase();
    !(lower.next() == Some(ch) && lower.next().is_none())
}
