//! End-to-end tests for the capture pipeline
//!
//! These tests push realistic pytest output through an interceptor inside a
//! capture session and check what reaches the surface, the append log and
//! the host's output target.

use std::io::Write;

use capture_stream::app::{Config, DumpPolicy, Palette};
use capture_stream::capture::{CaptureSession, OutputContext, SharedBuffer, StreamInterceptor};
use capture_stream::core::{classify, Rgb, SemanticColor, SpanColor, StatusCategory};
use capture_stream::parser::{parse_spans, ColorCode, RESET};
use capture_stream::surface::{AnsiSurface, TranscriptSurface};

const CYAN: &str = ColorCode::BrightCyan.sequence();
const GREEN: &str = ColorCode::BrightGreen.sequence();
const RED: &str = ColorCode::BrightRed.sequence();

fn new_interceptor(surface: &mut TranscriptSurface) -> StreamInterceptor<&mut TranscriptSurface> {
    StreamInterceptor::new(surface, &Config::default()).expect("Failed to create interceptor")
}

// ============================================================================
// Classification scenarios
// ============================================================================

#[test]
fn test_scenario_passed_literals() {
    assert_eq!(classify("PASSED"), StatusCategory::Passed);
    assert_eq!(classify("."), StatusCategory::Passed);
}

#[test]
fn test_scenario_failed_summary() {
    assert_eq!(classify("=== 3 failed, 1 passed ==="), StatusCategory::Failed);
}

#[test]
fn test_scenario_error_line() {
    assert_eq!(classify("E   assert False"), StatusCategory::Error);
}

#[test]
fn test_scenario_span_parse() {
    let spans = parse_spans(&format!("hello{CYAN}world{RESET}"));
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].text, "hello");
    assert_eq!(spans[0].color, SpanColor::Status(StatusCategory::Normal));
    assert_eq!(spans[1].text, "world");
    assert_eq!(spans[1].color, SpanColor::Semantic(SemanticColor::Diff));
}

#[test]
fn test_scenario_failure_dump() {
    let host = SharedBuffer::new();
    let mut context = OutputContext::new(host.clone());
    let mut surface = TranscriptSurface::new();

    let result: Result<((), _), String> = CaptureSession::run(
        &mut context,
        new_interceptor(&mut surface),
        DumpPolicy::OnFailure,
        |session| {
            session.write("PASSED");
            session.write("E fail");
            Err("test run aborted".to_string())
        },
    );
    assert!(result.is_err());

    let dumped = host.contents();
    let lines: Vec<&str> = dumped.lines().collect();
    assert_eq!(lines, vec!["test run aborted", "0: 'PASSED'", "1: 'E fail'"]);

    // Prior target is back in place
    write!(context, "next").unwrap();
    assert!(host.contents().ends_with("next"));
}

// ============================================================================
// Realistic pytest stream
// ============================================================================

#[test]
fn test_pytest_progress_stream() {
    let mut surface = TranscriptSurface::new();
    let palette = Palette::default();

    {
        let mut capture = new_interceptor(&mut surface);
        for fragment in [
            "tests/test_math.py",
            " ",
            ".",
            "F",
            "s",
            "x",
            "E",
            "\n",
            "=== 1 failed, 1 passed, 1 skipped ===",
        ] {
            capture.write(fragment);
        }
        assert_eq!(capture.log().len(), 9);
    }

    let colors: Vec<Option<Rgb>> = surface.runs().iter().map(|run| run.color).collect();
    assert_eq!(
        colors,
        vec![
            Some(palette.fail),    // tests/test_math.py
            None,                  // " "
            Some(palette.success), // .
            Some(palette.fail),    // F
            Some(palette.skip),    // s + x merge
            Some(palette.fail),    // E
            None,                  // newline
            Some(palette.fail),    // summary
        ]
    );
    assert_eq!(surface.runs()[4].text, "sx");
    assert_eq!(surface.scroll_count(), 9);
}

#[test]
fn test_assertion_diff_stream() {
    let mut surface = TranscriptSurface::new();
    let palette = Palette::default();

    {
        let mut capture = new_interceptor(&mut surface);
        capture.write(&format!("E   AssertionError: {GREEN}1{RESET} != {RED}2{RESET}\n"));
        capture.write(&format!("{CYAN}  - expected{RESET}"));
    }

    let runs = surface.runs();
    let texts: Vec<&str> = runs.iter().map(|run| run.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["E   AssertionError: ", "1", " != ", "2", "\n", "  - expected"]
    );
    assert_eq!(runs[0].color, Some(palette.fail));
    assert_eq!(runs[1].color, Some(palette.diff_left));
    assert_eq!(runs[2].color, None);
    assert_eq!(runs[3].color, Some(palette.diff_right));
    assert_eq!(runs[5].color, Some(palette.diff));
}

#[test]
fn test_chunked_bytes_match_single_write() {
    let stream = format!("PASSED\n✓ done {GREEN}ok{RESET}\n");

    let mut whole = TranscriptSurface::new();
    {
        let mut capture = new_interceptor(&mut whole);
        capture.write(&stream);
    }

    let mut chunked = TranscriptSurface::new();
    let mut context = OutputContext::new(SharedBuffer::new());
    let log = {
        let mut session =
            CaptureSession::enter(&mut context, new_interceptor(&mut chunked), DumpPolicy::Never);
        for chunk in stream.as_bytes().chunks(5) {
            session.write_bytes(chunk);
        }
        session.finish()
    };

    // Fragments are logged verbatim however the stream was cut
    assert_eq!(log.iter().collect::<String>(), stream);
    assert_eq!(whole.text(), "PASSED\n✓ done ok\n");
    assert_eq!(chunked.scroll_count(), log.len());
}

#[test]
fn test_panic_dumps_log_and_restores_target() {
    let host = SharedBuffer::new();
    let mut context = OutputContext::new(host.clone());
    let mut surface = TranscriptSurface::new();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut session = CaptureSession::enter(
            &mut context,
            new_interceptor(&mut surface),
            DumpPolicy::OnFailure,
        );
        session.write("FAILED");
        panic!("runner exploded");
    }));

    assert!(outcome.is_err());
    assert_eq!(host.contents(), "0: 'FAILED'\n");

    // Prior target is back in place after the unwind
    write!(context, "after").unwrap();
    assert_eq!(host.contents(), "0: 'FAILED'\nafter");
    assert_eq!(surface.text(), "FAILED");
}

#[test]
fn test_ansi_surface_end_to_end() {
    let mut surface = AnsiSurface::new(Vec::new());
    {
        let mut capture = StreamInterceptor::new(&mut surface, &Config::default()).unwrap();
        capture.write("PASSED");
        capture.write(&format!("a{RED}b{RESET}"));
    }
    let out = String::from_utf8(surface.into_inner()).unwrap();

    assert_eq!(
        out,
        "\x1b[38;2;13;188;121mPASSED\x1b[0ma\x1b[38;2;241;57;41mb\x1b[0m"
    );
}

#[test]
fn test_config_prefix_reaches_backing_file() {
    let mut config = Config::default();
    config.backing.prefix = "capture_run_".to_string();

    let capture = StreamInterceptor::new(TranscriptSurface::new(), &config).unwrap();
    let name = capture
        .backing_path()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap();
    assert!(name.starts_with("capture_run_"));
}
