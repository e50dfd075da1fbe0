//! Leveled progress output for long-running batch jobs.
//!
//! A [`Printer`] has a verbosity level and a prefix. Messages carry their own
//! level and are written only when it does not exceed the printer's level.
//! Nested stages get a child printer with a longer prefix via
//! [`Printer::push`]; all children share the parent's sink.
//!
//! ```
//! use lambda_tools::Printer;
//!
//! let printer = Printer::new(2, "map ");
//! let tod = printer.push("tod ");
//! tod.write("reading", 2); // "map tod reading"
//! tod.write("details", 3); // suppressed
//! {
//!     let _t = tod.time("solved", 1); // "  0.00 map tod solved" on drop
//! }
//! ```
//!
//! Every line written is mirrored to the `log` facade at debug level.

use std::{
    fmt,
    io::Write,
    sync::{Arc, Mutex},
    time::Instant,
};

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Options of a single [`Printer::write_with`] call.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Only print when the message level equals the printer level.
    pub exact: bool,
    /// Terminate the message with a newline.
    pub newline: bool,
    /// Text written before the prefix.
    pub prepend: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            exact: false,
            newline: true,
            prepend: String::new(),
        }
    }
}

#[derive(Clone)]
pub struct Printer {
    level: u32,
    prefix: String,
    sink: Sink,
}

impl Printer {
    /// A printer writing to standard error.
    pub fn new(level: u32, prefix: impl Into<String>) -> Printer {
        Printer::with_sink(level, prefix, std::io::stderr())
    }

    pub fn with_sink(
        level: u32,
        prefix: impl Into<String>,
        sink: impl Write + Send + 'static,
    ) -> Printer {
        Printer {
            level,
            prefix: prefix.into(),
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether a message of `level` would be written.
    pub fn enabled(&self, level: u32, exact: bool) -> bool {
        if exact {
            level == self.level
        } else {
            level <= self.level
        }
    }

    /// Writes `desc` as a full line if `level` is enabled.
    pub fn write(&self, desc: &str, level: u32) {
        self.write_with(desc, level, &WriteOptions::default());
    }

    pub fn write_with(&self, desc: &str, level: u32, options: &WriteOptions) {
        if !self.enabled(level, options.exact) {
            return;
        }
        let line = format!("{}{}{}", options.prepend, self.prefix, desc);
        log::debug!("{line}");

        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let res = if options.newline {
            writeln!(sink, "{line}")
        } else {
            write!(sink, "{line}")
        };
        if let Err(e) = res.and_then(|_| sink.flush()) {
            log::warn!("printer: failed to write to sink: {e}");
        }
    }

    /// A child printer with `desc` appended to the prefix, sharing this
    /// printer's level and sink.
    pub fn push(&self, desc: &str) -> Printer {
        Printer {
            level: self.level,
            prefix: format!("{}{}", self.prefix, desc),
            sink: self.sink.clone(),
        }
    }

    /// Starts a timer that, when dropped, writes `desc` preceded by the
    /// elapsed wall time in seconds (`"{:6.2} "`).
    pub fn time(&self, desc: impl Into<String>, level: u32) -> PrintTimer<'_> {
        self.time_with(desc, level, false)
    }

    pub fn time_with(&self, desc: impl Into<String>, level: u32, exact: bool) -> PrintTimer<'_> {
        PrintTimer {
            printer: self,
            desc: desc.into(),
            level,
            exact,
            start: Instant::now(),
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Printer::new(1, "")
    }
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("level", &self.level)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Guard returned by [`Printer::time`].
pub struct PrintTimer<'a> {
    printer: &'a Printer,
    desc: String,
    level: u32,
    exact: bool,
    start: Instant,
}

impl PrintTimer<'_> {
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Drop for PrintTimer<'_> {
    fn drop(&mut self) {
        let options = WriteOptions {
            exact: self.exact,
            prepend: format!("{:6.2} ", self.elapsed_secs()),
            ..WriteOptions::default()
        };
        self.printer.write_with(&self.desc, self.level, &options);
    }
}
