//! Capture session
//!
//! A session takes over an [`OutputContext`] for its lifetime: the context's
//! target is swapped out on entry and every write goes through the session's
//! interceptor. The previous target is restored when the session ends, on
//! every exit path. If the session ends in failure (an explicit `fail`, an
//! `Err` from [`CaptureSession::run`], or a panic unwinding through it) the
//! append log is dumped to the previous target before it is restored.
//!
//! Only one previous target is saved. Nesting is ruled out by the mutable
//! borrow of the context.

use std::fmt;
use std::io::{self, Write};

use crate::app::DumpPolicy;
use crate::surface::PresentationSurface;

use super::context::OutputContext;
use super::interceptor::StreamInterceptor;
use super::log::AppendLog;

/// Scoped redirection of an output context into an interceptor
pub struct CaptureSession<'a, S: PresentationSurface> {
    context: &'a mut OutputContext,
    /// Target saved on entry; `None` once released
    previous: Option<Box<dyn Write>>,
    interceptor: StreamInterceptor<S>,
    policy: DumpPolicy,
    failure: Option<String>,
}

impl<'a, S: PresentationSurface> CaptureSession<'a, S> {
    /// Redirect `context` into `interceptor`.
    ///
    /// The session starts from an empty log and an empty backing file;
    /// anything written to the interceptor beforehand is discarded.
    pub fn enter(
        context: &'a mut OutputContext,
        mut interceptor: StreamInterceptor<S>,
        policy: DumpPolicy,
    ) -> Self {
        let dropped = interceptor.restart();
        if dropped > 0 {
            tracing::debug!(dropped, "Discarded fragments written before the session");
        }
        let previous = context.replace(Box::new(io::sink()));
        tracing::debug!("Capture session entered");
        Self {
            context,
            previous: Some(previous),
            interceptor,
            policy,
            failure: None,
        }
    }

    /// Run `f` inside a session.
    ///
    /// On `Ok` the session is closed normally and its log returned with the
    /// value. On `Err` the session is marked failed, released (dumping its
    /// log) and the error handed back.
    pub fn run<T, E, F>(
        context: &'a mut OutputContext,
        interceptor: StreamInterceptor<S>,
        policy: DumpPolicy,
        f: F,
    ) -> Result<(T, AppendLog), E>
    where
        E: fmt::Display,
        F: FnOnce(&mut CaptureSession<'a, S>) -> Result<T, E>,
    {
        let mut session = Self::enter(context, interceptor, policy);
        match f(&mut session) {
            Ok(value) => Ok((value, session.finish())),
            Err(e) => {
                session.fail(&e);
                drop(session);
                Err(e)
            }
        }
    }

    /// Route one fragment through the interceptor
    pub fn write(&mut self, text: &str) {
        self.interceptor.write(text);
    }

    /// Route raw bytes through the interceptor
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.interceptor.write_bytes(bytes);
    }

    pub fn log(&self) -> &AppendLog {
        self.interceptor.log()
    }

    pub fn interceptor(&self) -> &StreamInterceptor<S> {
        &self.interceptor
    }

    pub fn interceptor_mut(&mut self) -> &mut StreamInterceptor<S> {
        &mut self.interceptor
    }

    /// Mark the session as failed; `reason` is printed ahead of the dump
    pub fn fail(&mut self, reason: impl fmt::Display) {
        self.failure = Some(reason.to_string());
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Close the session and hand back its log
    pub fn finish(mut self) -> AppendLog {
        self.release();
        self.interceptor.take_log()
    }

    fn release(&mut self) {
        let Some(mut previous) = self.previous.take() else {
            return;
        };
        self.interceptor.flush_pending();
        if let Err(e) = self.interceptor.flush_backing() {
            tracing::warn!("Failed to flush backing file: {}", e);
        }

        let failed = self.failure.is_some() || std::thread::panicking();
        if failed {
            tracing::error!(
                fragments = self.interceptor.log().len(),
                "Capture session exited with failure"
            );
        }
        if self.policy.should_dump(failed) {
            if let Err(e) = self.dump_to(&mut *previous) {
                tracing::warn!("Failed to dump capture log: {}", e);
            }
        }

        self.context.replace(previous);
        tracing::debug!("Capture session released");
    }

    fn dump_to(&self, out: &mut dyn Write) -> io::Result<()> {
        if let Some(reason) = &self.failure {
            writeln!(out, "{}", reason)?;
        }
        self.interceptor.log().dump(out)?;
        out.flush()
    }
}

impl<S: PresentationSurface> Drop for CaptureSession<'_, S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<S: PresentationSurface> Write for CaptureSession<'_, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.interceptor.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.interceptor.flush_backing()
    }
}

impl<S: PresentationSurface> fmt::Debug for CaptureSession<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSession")
            .field("active", &self.previous.is_some())
            .field("fragments", &self.interceptor.log().len())
            .field("policy", &self.policy)
            .field("failure", &self.failure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Config;
    use crate::capture::SharedBuffer;
    use crate::surface::TranscriptSurface;

    fn interceptor(surface: &mut TranscriptSurface) -> StreamInterceptor<&mut TranscriptSurface> {
        StreamInterceptor::new(surface, &Config::default()).unwrap()
    }

    #[test]
    fn test_finish_restores_without_dump() {
        let host = SharedBuffer::new();
        let mut context = OutputContext::new(host.clone());
        let mut surface = TranscriptSurface::new();

        let mut session = CaptureSession::enter(
            &mut context,
            interceptor(&mut surface),
            DumpPolicy::OnFailure,
        );
        session.write("PASSED");
        session.write(" done\n");
        let log = session.finish();

        assert_eq!(log.len(), 2);
        assert!(host.is_empty());
        write!(context, "after").unwrap();
        assert_eq!(host.contents(), "after");
        assert_eq!(surface.text(), "PASSED done\n");
    }

    #[test]
    fn test_failure_dumps_then_restores() {
        let host = SharedBuffer::new();
        let mut context = OutputContext::new(host.clone());
        let mut surface = TranscriptSurface::new();

        {
            let mut session = CaptureSession::enter(
                &mut context,
                interceptor(&mut surface),
                DumpPolicy::OnFailure,
            );
            session.write("PASSED");
            session.write("E fail");
            session.fail("runner crashed");
            assert!(session.is_failed());
        }

        assert_eq!(host.contents(), "runner crashed\n0: 'PASSED'\n1: 'E fail'\n");
        write!(context, "restored").unwrap();
        assert!(host.contents().ends_with("restored"));
    }

    #[test]
    fn test_enter_starts_from_empty_log() {
        let host = SharedBuffer::new();
        let mut context = OutputContext::new(host.clone());
        let mut surface = TranscriptSurface::new();
        let mut capture = interceptor(&mut surface);
        capture.write("before session");

        let mut session = CaptureSession::enter(&mut context, capture, DumpPolicy::OnFailure);
        session.write("PASSED");
        session.write("E fail");
        assert_eq!(session.log().len(), 2);

        let path = session.interceptor().backing_path().unwrap().to_path_buf();
        session.interceptor_mut().flush_backing().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "PASSEDE fail");

        session.fail("boom");
        drop(session);

        assert_eq!(host.contents(), "boom\n0: 'PASSED'\n1: 'E fail'\n");
    }

    #[test]
    fn test_always_policy_dumps_on_success() {
        let host = SharedBuffer::new();
        let mut context = OutputContext::new(host.clone());
        let mut surface = TranscriptSurface::new();

        let mut session = CaptureSession::enter(
            &mut context,
            interceptor(&mut surface),
            DumpPolicy::Always,
        );
        session.write(".");
        session.finish();

        assert_eq!(host.contents(), "0: '.'\n");
    }

    #[test]
    fn test_never_policy_skips_dump_on_failure() {
        let host = SharedBuffer::new();
        let mut context = OutputContext::new(host.clone());
        let mut surface = TranscriptSurface::new();

        let mut session = CaptureSession::enter(
            &mut context,
            interceptor(&mut surface),
            DumpPolicy::Never,
        );
        session.write("F");
        session.fail("boom");
        drop(session);

        assert!(host.is_empty());
    }

    #[test]
    fn test_run_err_marks_failure() {
        let host = SharedBuffer::new();
        let mut context = OutputContext::new(host.clone());
        let mut surface = TranscriptSurface::new();

        let result: Result<((), AppendLog), String> = CaptureSession::run(
            &mut context,
            interceptor(&mut surface),
            DumpPolicy::OnFailure,
            |session| {
                session.write("x");
                Err("exit status 1".to_string())
            },
        );

        assert_eq!(result.unwrap_err(), "exit status 1");
        assert_eq!(host.contents(), "exit status 1\n0: 'x'\n");
    }

    #[test]
    fn test_run_ok_returns_log() {
        let mut context = OutputContext::new(SharedBuffer::new());
        let mut surface = TranscriptSurface::new();

        let (value, log) = CaptureSession::run(
            &mut context,
            interceptor(&mut surface),
            DumpPolicy::OnFailure,
            |session| -> Result<u32, String> {
                session.write("SKIPPED");
                Ok(7)
            },
        )
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(log.entries(), ["SKIPPED"]);
    }

    #[test]
    fn test_io_write_routes_bytes() {
        let mut context = OutputContext::new(SharedBuffer::new());
        let mut surface = TranscriptSurface::new();

        let mut session = CaptureSession::enter(
            &mut context,
            interceptor(&mut surface),
            DumpPolicy::Never,
        );
        write!(session, "collected {} items", 2).unwrap();
        session.flush().unwrap();
        let log = session.finish();

        assert_eq!(log.iter().collect::<String>(), "collected 2 items");
    }

    #[test]
    fn test_finish_flushes_partial_character() {
        let mut context = OutputContext::new(SharedBuffer::new());
        let mut surface = TranscriptSurface::new();

        let mut session = CaptureSession::enter(
            &mut context,
            interceptor(&mut surface),
            DumpPolicy::Never,
        );
        session.write_bytes(b"ok \xE2");
        let log = session.finish();

        assert_eq!(log.entries(), ["ok ", "\u{FFFD}"]);
    }
}
