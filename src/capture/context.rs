//! Output context
//!
//! The host's current output target as an explicit value. Code that prints
//! receives the context (or a session borrowing it) instead of reaching for
//! a process-wide stdout.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Handle to where output currently goes
pub struct OutputContext {
    target: Box<dyn Write>,
}

impl OutputContext {
    pub fn new(target: impl Write + 'static) -> Self {
        Self {
            target: Box::new(target),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Install `target`, returning the one it replaces
    pub fn replace(&mut self, target: Box<dyn Write>) -> Box<dyn Write> {
        std::mem::replace(&mut self.target, target)
    }

    pub fn target(&mut self) -> &mut dyn Write {
        self.target.as_mut()
    }
}

impl Write for OutputContext {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.target.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.target.flush()
    }
}

impl fmt::Debug for OutputContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputContext").finish_non_exhaustive()
    }
}

/// In-memory target that stays readable while a context owns a clone of it
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
