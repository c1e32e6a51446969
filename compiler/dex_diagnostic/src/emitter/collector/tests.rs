use super::*;
use crate::{ColorMode, TerminalEmitter};
use pretty_assertions::assert_eq;

#[test]
fn test_collector_keeps_order() {
    let mut collector = DiagnosticCollector::new();
    assert!(collector.is_empty());

    collector.emit(&Diagnostic::duplicate_element("annotation value", "b"));
    collector.emit(&Diagnostic::duplicate_element("annotation value", "a"));

    assert_eq!(
        collector.messages(),
        [
            "Ignoring duplicate annotation value for name: b",
            "Ignoring duplicate annotation value for name: a",
        ]
    );
    assert_eq!(collector.warning_count(), 2);
}

#[test]
fn test_take_drains() {
    let mut collector = DiagnosticCollector::new();
    collector.emit(&Diagnostic::note("x"));

    let taken = collector.take();
    assert_eq!(taken, vec![Diagnostic::note("x")]);
    assert!(collector.is_empty());
}

#[test]
fn test_replay_into_terminal() {
    let mut collector = DiagnosticCollector::new();
    collector.emit(&Diagnostic::warning("one"));
    collector.emit(&Diagnostic::warning("two"));

    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    collector.replay(&mut emitter);

    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(text, "one\ntwo\n");
}

#[test]
fn test_shared_sink_clones_share_storage() {
    let shared: SharedSink<DiagnosticCollector> = SharedSink::default();
    let mut a = shared.clone();
    let mut b = shared.clone();

    a.emit(&Diagnostic::warning("from a"));
    b.emit(&Diagnostic::warning("from b"));

    assert_eq!(shared.lock().messages(), ["from a", "from b"]);
}

#[test]
fn test_shared_sink_across_threads() {
    let shared = SharedSink::new(DiagnosticCollector::new());

    std::thread::scope(|scope| {
        for i in 0..4 {
            let mut sink = shared.clone();
            scope.spawn(move || {
                for j in 0..25 {
                    sink.emit(&Diagnostic::warning(format!("{i}:{j}")));
                }
            });
        }
    });

    assert_eq!(shared.lock().len(), 100);
}
