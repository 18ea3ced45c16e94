// End-to-end through the public API: render, toggle, aggregate, export.
use checkpad::aggregate::Summary;
use checkpad::api::{CheckpadApi, CheckpadPaths, MessageLevel};
use checkpad::export::{export_html, ExportFormat, ExportOptions};
use checkpad::model::{DocumentState, ItemId};
use checkpad::session::Session;
use checkpad::source::fs::DirSource;
use checkpad::source::memory::InMemorySource;
use checkpad::source::DocumentSource;
use checkpad::view::render;
use std::fs;
use tempfile::tempdir;

const PLAN: &str = "# Tarea: A\n- [ ] step (estimate:: 30m)\n- [x] step2 (estimate:: 1h)";

#[test]
fn test_worked_example_figures() {
    let view = render(&DocumentState::new("plan.md", PLAN), &InMemorySource::new());
    let summary = Summary::of(&view);

    assert_eq!(summary.progress.checked, 1);
    assert_eq!(summary.progress.total, 2);
    assert_eq!(summary.progress.percentage, 50);
    assert_eq!(summary.tasks.len(), 1);
    assert!((summary.tasks[0].raw_minutes - 90.0).abs() < 1e-9);
    assert_eq!(summary.tasks[0].final_minutes, 117);
    assert!((summary.tasks[0].hours - 1.95).abs() < 1e-9);
}

#[test]
fn test_export_matches_live_session() {
    let mut source = InMemorySource::new();
    source.insert("plan.md", PLAN);
    let mut session = Session::new();
    session.load(DocumentState::new("plan.md", PLAN));
    session.render_with(&source).unwrap();
    session.toggle(&[ItemId(1)]).unwrap();

    let view = session.view().unwrap();
    let live = session.summary().unwrap();
    let html = export_html(view, &view.checked_states(), &ExportOptions::default()).unwrap();

    assert!(html.contains(&live.progress.percent_text()));
    assert!(html.contains(&live.progress.steps_text()));
    assert!(html.contains(&live.remaining.line()));
    assert!(!html.contains("http://"));
    assert!(!html.contains("https://"));
}

#[test]
fn test_toggle_round_trip_on_disk() {
    let dir = tempdir().unwrap();
    let docs = dir.path().join("markdown-files");
    fs::create_dir(&docs).unwrap();
    fs::write(
        docs.join("plan.md"),
        "---\ntitle: x\n---\n# Tarea: A\n- [ ] one\n  - [ ] nested\n- [ ] three",
    )
    .unwrap();

    let paths = CheckpadPaths {
        project: Some(dir.path().join(".checkpad")),
        global: dir.path().join("global"),
    };
    let mut api = CheckpadApi::new(DirSource::new(&docs), paths);

    let result = api.check("plan", &["2"]).unwrap();
    assert_eq!(result.messages[0].level, MessageLevel::Success);
    assert_eq!(
        fs::read_to_string(docs.join("plan.md")).unwrap(),
        "---\ntitle: x\n---\n# Tarea: A\n- [ ] one\n  - [x] nested\n- [ ] three"
    );

    let result = api.toggle_all("plan").unwrap();
    let report = result.report.unwrap();
    assert_eq!(report.summary.progress.percentage, 100);
    assert!(!api.source().fetch("plan.md").unwrap().contains("[ ]"));
}

#[test]
fn test_markdown_export_is_the_source() {
    let dir = tempdir().unwrap();
    let mut source = InMemorySource::new();
    source.insert("plan.md", PLAN);
    let api = CheckpadApi::new(
        source,
        CheckpadPaths {
            project: None,
            global: dir.path().to_path_buf(),
        },
    );

    let result = api
        .export("plan", ExportFormat::Markdown, None, "checklist", dir.path())
        .unwrap();

    assert_eq!(result.written_paths, vec![dir.path().join("checklist.md")]);
    assert_eq!(
        fs::read_to_string(dir.path().join("checklist.md")).unwrap(),
        PLAN
    );
}
