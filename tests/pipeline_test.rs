//! Integration tests for the compose, typeset and splice pipeline.

mod common;

use common::{FakeEngine, Layout};
use typewrite::frame::{self, EPILOGUE};
use typewrite::{compose, extract_text, Error, Stylesheet, Typewriter};

fn render(text: &str) -> (Vec<u8>, Vec<u8>) {
    let engine = FakeEngine::new(Layout::Faithful);
    let pdf = Typewriter::new()
        .with_engine(engine.clone())
        .render(text)
        .unwrap();
    (engine.generated(), pdf)
}

#[test]
fn test_round_trip() {
    let text = "To whom it may concern,\n\n\tthe ribbon is out of ink.\n\n-- Ed\n";
    let (_, pdf) = render(text);
    assert_eq!(extract_text(&pdf).unwrap(), text);
}

#[test]
fn test_round_trip_multibyte() {
    let text = "Straße, café, naïve, 日本語, emoji 🖋\n";
    let (_, pdf) = render(text);
    assert_eq!(extract_text(&pdf).unwrap(), text);
}

#[test]
fn test_text_readable_at_top_of_file() {
    let text = "first line\nsecond line\n";
    let (_, pdf) = render(text);
    let header_end = frame::find(&pdf, b"stream\n").unwrap() + b"stream\n".len();
    assert_eq!(&pdf[header_end..header_end + text.len()], text.as_bytes());
    assert_eq!(
        &pdf[header_end + text.len()..header_end + text.len() + EPILOGUE.len()],
        EPILOGUE
    );
}

#[test]
fn test_declared_length_matches_reservation() {
    let text = "length check";
    let (_, pdf) = render(text);
    let reserved = compose(text, &Stylesheet::default()).reserved;
    assert_eq!(reserved, text.len() + EPILOGUE.len());
    let header = frame::stream_header(reserved);
    assert!(frame::find(&pdf, format!("1 0 obj\n{}", header).as_bytes()).is_some());
}

#[test]
fn test_structure_preserved_after_splice() {
    let text = "unchanged tail\n";
    let (generated, pdf) = render(text);
    assert_eq!(pdf.len(), generated.len());

    let start = frame::first_object_offset(&generated).unwrap();
    let span = frame::reserved_span_len(frame::content_len(text));
    assert_eq!(&pdf[..start], &generated[..start]);
    assert_eq!(&pdf[start + span..], &generated[start + span..]);
}

#[test]
fn test_empty_input() {
    let (generated, pdf) = render("");
    assert_eq!(pdf.len(), generated.len());
    assert_eq!(extract_text(&pdf).unwrap(), "");
}

#[test]
fn test_page_break_boundaries() {
    let texts = [
        "\u{000C}starts with a break\n",
        "ends with a break\n\u{000C}",
        "two\u{000C}\u{000C}in a row\n",
        "\u{000C}",
    ];
    for text in texts {
        let (generated, pdf) = render(text);
        assert_eq!(pdf.len(), generated.len());
        // The raw text keeps its form feeds
        assert_eq!(extract_text(&pdf).unwrap(), text);
    }
}

#[test]
fn test_marker_mismatch_fails() {
    let result = Typewriter::new()
        .with_engine(FakeEngine::new(Layout::Renumbered))
        .render("text");
    assert!(matches!(result, Err(Error::MarkerNotFound)));
}

#[test]
fn test_span_mismatch_fails() {
    let result = Typewriter::new()
        .with_engine(FakeEngine::new(Layout::Truncated))
        .render("text");
    assert!(matches!(result, Err(Error::ReservedSpanMismatch { .. })));
}

#[test]
fn test_non_pdf_output_fails() {
    let result = Typewriter::new()
        .with_engine(FakeEngine::new(Layout::NotPdf))
        .render("text");
    assert!(matches!(result, Err(Error::UnknownFormat)));
}

#[test]
fn test_failed_render_writes_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("letter.txt");
    let output = dir.path().join("letter.pdf");
    std::fs::write(&input, "Dear sir,\n").unwrap();

    let result = Typewriter::new()
        .with_engine(FakeEngine::new(Layout::Renumbered))
        .render_file(&input, &output);
    assert!(result.is_err());
    assert!(!output.exists());
    // No stray temporary files either
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_work_dir_removed_after_engine_failure() {
    let engine = FakeEngine::new(Layout::Failing);
    let result = Typewriter::new()
        .with_engine(engine.clone())
        .render("Dear sir,\n");
    assert!(matches!(result, Err(Error::EngineFailed { .. })));
    assert!(!engine.out_dir().exists());
}

#[test]
fn test_work_dir_removed_after_splice_failure() {
    let engine = FakeEngine::new(Layout::Truncated);
    let result = Typewriter::new()
        .with_engine(engine.clone())
        .render("Dear sir,\n");
    assert!(result.is_err());
    assert!(!engine.out_dir().exists());
}

#[test]
fn test_work_dir_removed_after_success() {
    let engine = FakeEngine::new(Layout::Faithful);
    Typewriter::new()
        .with_engine(engine.clone())
        .render("Dear sir,\n")
        .unwrap();
    assert!(!engine.out_dir().as_os_str().is_empty());
    assert!(!engine.out_dir().exists());
}

#[test]
fn test_render_file_and_extract_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("letter.txt");
    let output = dir.path().join("letter.pdf");
    let restored = dir.path().join("restored.txt");
    let text = "Page one\n\u{000C}Page two\n";
    std::fs::write(&input, text).unwrap();

    Typewriter::new()
        .with_engine(FakeEngine::new(Layout::Faithful))
        .render_file(&input, &output)
        .unwrap();
    assert!(typewrite::is_pdf_bytes(&std::fs::read(&output).unwrap()));

    typewrite::extract_file(&output, &restored).unwrap();
    assert_eq!(std::fs::read(&restored).unwrap(), text.as_bytes());
}

#[cfg(unix)]
#[test]
fn test_engine_failure_writes_no_output() {
    use typewrite::EngineOptions;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("letter.txt");
    let output = dir.path().join("letter.pdf");
    std::fs::write(&input, "Dear sir,\n").unwrap();

    let result = Typewriter::new()
        .with_engine_options(
            EngineOptions::new()
                .with_program("sh")
                .with_arg("-c")
                .with_arg("echo '! Emergency stop.'; exit 1")
                .with_arg("engine"),
        )
        .render_file(&input, &output);
    match result {
        Err(Error::EngineFailed { diagnostics, .. }) => {
            assert!(diagnostics.contains("Emergency stop"));
        }
        other => panic!("expected EngineFailed, got {:?}", other),
    }
    assert!(!output.exists());
}

/// Requires a TeX installation with LuaLaTeX and the `typewriter` package.
#[test]
#[ignore]
fn test_lualatex_round_trip() {
    let text = "Typed on a real engine.\n\u{000C}Second page.\n";
    let pdf = Typewriter::new().render(text).unwrap();
    assert!(typewrite::is_pdf_bytes(&pdf));
    assert_eq!(extract_text(&pdf).unwrap(), text);
}
