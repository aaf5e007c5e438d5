//! `%s` template substitution, immediate and deferred.
//!
//! [`sprintf`] fills every `%s` in a template with the rendering of the
//! matching argument. [`DeferredValue`] captures such a call and only runs it
//! when resolved or displayed, so a log line can carry an expensive message
//! that is never built when the line is filtered out.

use std::fmt;

use thiserror::Error;

use crate::logger::{self, Logger, OutputSink, Stringify, StringifyError};

/// The only placeholder recognised in templates.
pub const PLACEHOLDER: &str = "%s";

#[derive(Debug, Error)]
pub enum FormatError {
    #[error(
        "format string ({template}) has {placeholders} placeholders but {arguments} arguments were passed"
    )]
    ArgumentCountMismatch {
        template: String,
        placeholders: usize,
        arguments: usize,
    },
    #[error("format argument #{index} could not be rendered")]
    Argument {
        index: usize,
        #[source]
        source: StringifyError,
    },
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// Substitute `args` into `template`, reporting a count mismatch as a WARN
/// line on the global logger.
pub fn sprintf(template: &str, args: &[&dyn Stringify]) -> Result<String> {
    sprintf_with(logger::global(), template, args)
}

/// [`sprintf`] reporting through `logger`.
pub fn sprintf_with<S: OutputSink>(
    logger: &Logger<S>,
    template: &str,
    args: &[&dyn Stringify],
) -> Result<String> {
    let fragments: Vec<&str> = template.split(PLACEHOLDER).collect();
    let rendered = args
        .iter()
        .enumerate()
        .map(|(index, arg)| {
            arg.stringify()
                .map_err(|source| FormatError::Argument { index, source })
        })
        .collect::<Result<Vec<String>>>()?;

    if fragments.len() != rendered.len() + 1 {
        let mismatch = FormatError::ArgumentCountMismatch {
            template: template.to_owned(),
            placeholders: fragments.len() - 1,
            arguments: rendered.len(),
        };
        logger.warn(&[&mismatch]);
        return Err(mismatch);
    }

    let capacity = template.len() + rendered.iter().map(String::len).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let values = rendered.iter().map(String::as_str).chain(std::iter::once(""));
    for (fragment, value) in fragments.into_iter().zip(values) {
        out.push_str(fragment);
        out.push_str(value);
    }
    Ok(out)
}

/// Formatting routine captured by a [`DeferredValue`].
pub type Procedure = fn(&str, &[&dyn Stringify]) -> Result<String>;

/// A formatting call held back until it is needed.
///
/// Each [`resolve`](Self::resolve) re-runs the call. `Display` resolves too,
/// so the value can be handed to the logger directly; a failed resolution
/// then shows up as a rendering failure.
pub struct DeferredValue {
    procedure: Procedure,
    template: String,
    args: Vec<Box<dyn Stringify + Send + Sync>>,
}

impl DeferredValue {
    pub fn new(procedure: Procedure, template: impl Into<String>) -> Self {
        Self {
            procedure,
            template: template.into(),
            args: Vec::new(),
        }
    }

    /// Append a captured argument.
    pub fn arg<T: Stringify + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.args.push(Box::new(value));
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn resolve(&self) -> Result<String> {
        let args: Vec<&dyn Stringify> = self
            .args
            .iter()
            .map(|arg| &**arg as &dyn Stringify)
            .collect();
        (self.procedure)(&self.template, &args)
    }
}

/// Capture `sprintf(template, ...)` without running it. Arguments are added
/// with [`DeferredValue::arg`], or use the [`sprintfd!`](crate::sprintfd!)
/// macro.
pub fn sprintfd(template: impl Into<String>) -> DeferredValue {
    DeferredValue::new(sprintf, template)
}

impl fmt::Display for DeferredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.resolve().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Debug for DeferredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredValue")
            .field("template", &self.template)
            .field("args", &self.args.len())
            .finish()
    }
}

impl<'a> logger::IntoLogArgs<'a> for DeferredValue {
    fn into_log_args(self) -> logger::LogArgs<'a> {
        logger::LogArgs::one(self)
    }
}

/// `sprintf!("Hello %s", name)` → `Result<String, FormatError>`.
#[macro_export]
macro_rules! sprintf {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format::sprintf(
            $template,
            &[$(&$arg as &dyn $crate::logger::Stringify),*],
        )
    };
}

/// `sprintfd!("Hello %s", name)` → [`DeferredValue`]. Arguments are moved in.
#[macro_export]
macro_rules! sprintfd {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format::sprintfd($template)$(.arg($arg))*
    };
}
