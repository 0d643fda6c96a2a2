//! Console interception.
//!
//! [`Console`] stands in for a process console: code writes through its
//! `log`/`info`/`warn`/`error`/`debug` methods, and until interception is
//! installed every call goes to the original [`ConsoleWriter`] (stdout or
//! stderr). Once installed through [`ConsoleAdapter::install`], calls are
//! turned into structured records:
//!
//! ```text
//! ()                      -> "" at the mapped level
//! ("text", rest..)        -> sanitized "text", {extra: rest}; dropped if empty
//! ({..} or [..], rest..)  -> "[console]", {console: first, extra: rest}
//! (42 / true / null, ..)  -> same as text
//! ```
//!
//! Anything going wrong while routing a call (emitter error or panic) falls
//! back to the original writer; if that fails too, the call is dropped.
//! Panics raised while routing are not reported by the panic hook: the first
//! [`Console::install`] wraps the process hook so it stays silent for them and
//! behaves as before for every other panic.

use logshim_types::{
    ConsoleAdapter, ConsoleLevel, ConsoleWriter, Emitter, LogRecord, Metadata, Result,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::cell::Cell;
use std::fmt;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Once};

use crate::level::map_console_level;
use crate::sanitize::sanitize;

/// Message used when the first console argument is an object.
pub const OBJECT_MESSAGE: &str = "[console]";

/// Metadata key for the arguments after the first.
pub const EXTRA_KEY: &str = "extra";

/// Metadata key for an object passed as the first argument.
pub const CONSOLE_KEY: &str = "console";

/// Original console behavior: one line per call on stdout, or stderr for
/// `warn` and `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl ConsoleWriter for StdConsole {
    fn write(&self, method: ConsoleLevel, args: &[Value]) -> Result<()> {
        let line = render_args(args);
        if method.is_stderr() {
            writeln!(io::stderr().lock(), "{}", line)?;
        } else {
            writeln!(io::stdout().lock(), "{}", line)?;
        }
        Ok(())
    }
}

/// Join console arguments with spaces; strings are printed raw, everything
/// else as JSON.
pub fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the record an intercepted console call turns into.
///
/// Returns `None` when the call is suppressed (text that sanitizes to
/// nothing).
pub fn console_record(method: ConsoleLevel, args: &[Value]) -> Option<LogRecord> {
    let level = map_console_level(method);

    let Some((first, rest)) = args.split_first() else {
        return Some(LogRecord::new(level, "", Metadata::new()));
    };

    let mut metadata = Metadata::new();
    match first {
        Value::Object(_) | Value::Array(_) => {
            metadata.insert(CONSOLE_KEY.to_string(), first.clone());
            metadata.insert(EXTRA_KEY.to_string(), Value::Array(rest.to_vec()));
            Some(LogRecord::new(level, OBJECT_MESSAGE, metadata))
        }
        scalar => {
            let message = sanitize(scalar);
            if message.is_empty() {
                return None;
            }
            metadata.insert(EXTRA_KEY.to_string(), Value::Array(rest.to_vec()));
            Some(LogRecord::new(level, message, metadata))
        }
    }
}

thread_local! {
    static ROUTING: Cell<bool> = Cell::new(false);
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the panic hook so panics raised while routing stay silent.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !is_routing() {
                previous(info);
            }
        }));
    });
}

/// Whether the current thread is inside a routed console call.
pub fn is_routing() -> bool {
    ROUTING.with(Cell::get)
}

/// Marks the current thread as routing until dropped.
struct RoutingGuard {
    previous: bool,
}

impl RoutingGuard {
    fn enter() -> Self {
        Self {
            previous: ROUTING.with(|flag| flag.replace(true)),
        }
    }
}

impl Drop for RoutingGuard {
    fn drop(&mut self) {
        ROUTING.with(|flag| flag.set(self.previous));
    }
}

/// A console whose output can be routed into an [`Emitter`].
pub struct Console {
    original: Arc<dyn ConsoleWriter>,
    route: RwLock<Option<Arc<dyn Emitter>>>,
}

impl Console {
    /// Console that writes to `original` until interception is installed.
    pub fn new(original: Arc<dyn ConsoleWriter>) -> Self {
        Self {
            original,
            route: RwLock::new(None),
        }
    }

    /// Console backed by stdout/stderr.
    pub fn stdio() -> Self {
        Self::new(Arc::new(StdConsole))
    }

    /// `console.log`
    pub fn log(&self, args: &[Value]) {
        self.call(ConsoleLevel::Log, args);
    }

    /// `console.info`
    pub fn info(&self, args: &[Value]) {
        self.call(ConsoleLevel::Info, args);
    }

    /// `console.warn`
    pub fn warn(&self, args: &[Value]) {
        self.call(ConsoleLevel::Warn, args);
    }

    /// `console.error`
    pub fn error(&self, args: &[Value]) {
        self.call(ConsoleLevel::Error, args);
    }

    /// `console.debug`
    pub fn debug(&self, args: &[Value]) {
        self.call(ConsoleLevel::Debug, args);
    }

    /// Dispatch one console call. Never fails and never panics on account of
    /// the routing layer.
    pub fn call(&self, method: ConsoleLevel, args: &[Value]) {
        let route = self.route.read().clone();

        let Some(emitter) = route else {
            let _ = self.original.write(method, args);
            return;
        };

        let _guard = RoutingGuard::enter();
        let routed = panic::catch_unwind(AssertUnwindSafe(|| match console_record(method, args) {
            Some(record) => emitter.emit(&record),
            None => Ok(()),
        }));

        if !matches!(routed, Ok(Ok(()))) {
            let _ = panic::catch_unwind(AssertUnwindSafe(|| self.original.write(method, args)));
        }
    }
}

impl ConsoleAdapter for Console {
    fn install(&self, emitter: Arc<dyn Emitter>) -> bool {
        let mut route = self.route.write();
        if route.is_some() {
            return false;
        }
        install_quiet_hook();
        *route = Some(emitter);
        true
    }

    fn restore(&self) -> bool {
        self.route.write().take().is_some()
    }

    fn is_installed(&self) -> bool {
        self.route.read().is_some()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdio()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("installed", &self.is_installed())
            .finish()
    }
}

/// Call a [`Console`] method with `json!`-convertible arguments.
///
/// ```
/// use logshim_core::{console, Console};
///
/// let out = Console::stdio();
/// console!(out, log, "listening on", 8080);
/// ```
#[macro_export]
macro_rules! console {
    ($console:expr, $method:ident $(, $arg:expr)* $(,)?) => {
        $console.$method(&[$($crate::__serde_json::json!($arg)),*])
    };
}
