//! Deferred translation values.
//!
//! A [`LazyString`] captures a translation request without evaluating it.
//! There is deliberately no `Display` impl and no implicit coercion: the text
//! depends on a request's resolved locale, so rendering without a context is
//! a programming error the type simply does not allow. Call
//! [`resolve`](LazyString::resolve) when a context is available.

use crate::context::RequestContext;
use crate::error::Error;
use crate::translate::{Vars, gettext, ngettext, npgettext, pgettext};

/// The translation request captured by a [`LazyString`].
#[derive(Debug, Clone, PartialEq)]
enum LazyKind {
    Simple {
        message: String,
    },
    Plural {
        singular: String,
        plural: String,
        num: i64,
    },
    Context {
        context: String,
        message: String,
    },
    ContextPlural {
        context: String,
        singular: String,
        plural: String,
        num: i64,
    },
}

/// A translation whose text is computed only when a request context is
/// supplied.
///
/// Two lazy values compare equal when they capture the same request (kind,
/// message ids, and arguments). Resolving is idempotent for a given context;
/// resolving under contexts with different locales may yield different text
/// from the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyString {
    kind: LazyKind,
    vars: Vars,
}

impl LazyString {
    pub(crate) fn simple(message: &str, vars: Vars) -> LazyString {
        LazyString {
            kind: LazyKind::Simple {
                message: message.to_string(),
            },
            vars,
        }
    }

    pub(crate) fn plural(singular: &str, plural: &str, num: i64, vars: Vars) -> LazyString {
        LazyString {
            kind: LazyKind::Plural {
                singular: singular.to_string(),
                plural: plural.to_string(),
                num,
            },
            vars,
        }
    }

    pub(crate) fn with_context(context: &str, message: &str, vars: Vars) -> LazyString {
        LazyString {
            kind: LazyKind::Context {
                context: context.to_string(),
                message: message.to_string(),
            },
            vars,
        }
    }

    pub(crate) fn with_context_plural(
        context: &str,
        singular: &str,
        plural: &str,
        num: i64,
        vars: Vars,
    ) -> LazyString {
        LazyString {
            kind: LazyKind::ContextPlural {
                context: context.to_string(),
                singular: singular.to_string(),
                plural: plural.to_string(),
                num,
            },
            vars,
        }
    }

    /// Evaluate against a request context, producing the translated and
    /// substituted text.
    pub fn resolve(&self, ctx: &RequestContext<'_>) -> Result<String, Error> {
        match &self.kind {
            LazyKind::Simple { message } => gettext(message, ctx, self.vars.clone()),
            LazyKind::Plural {
                singular,
                plural,
                num,
            } => ngettext(singular, plural, *num, ctx, self.vars.clone()),
            LazyKind::Context { context, message } => {
                pgettext(context, message, ctx, self.vars.clone())
            }
            LazyKind::ContextPlural {
                context,
                singular,
                plural,
                num,
            } => npgettext(context, singular, plural, *num, ctx, self.vars.clone()),
        }
    }
}
