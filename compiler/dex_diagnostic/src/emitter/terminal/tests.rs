use super::*;
use pretty_assertions::assert_eq;

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::duplicate_element("annotation value", "x")
}

#[test]
fn test_terminal_emitter_no_color() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, true);

    emitter.emit(&sample_diagnostic());
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text, "Ignoring duplicate annotation value for name: x\n");
}

#[test]
fn test_terminal_emitter_with_color() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Always, false);

    emitter.emit(&sample_diagnostic());

    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with(colors::WARNING));
    assert!(text.contains("Ignoring duplicate annotation value for name: x"));
    assert!(text.ends_with("\x1b[0m\n"));
}

#[test]
fn test_one_line_per_diagnostic() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_all(&[
        Diagnostic::duplicate_element("annotation value", "a"),
        Diagnostic::duplicate_element("annotation value", "a"),
        Diagnostic::note("done"),
    ]);

    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        [
            "Ignoring duplicate annotation value for name: a",
            "Ignoring duplicate annotation value for name: a",
            "done",
        ]
    );
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Never);
}
