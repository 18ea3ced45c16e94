use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PLAN: &str = "# Tarea: A\n- [ ] step (estimate:: 30m)\n- [x] step2 (estimate:: 1h)";

fn checkpad(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("checkpad").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_DATA_HOME", dir.join("data"))
        .env_remove("RUST_LOG");
    cmd
}

fn project_with_plan() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("markdown-files");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("plan.md"), PLAN).unwrap();
    fs::write(docs.join("notes.md"), "# Intro\nFirst words.").unwrap();
    temp
}

#[test]
fn test_list_shows_documents() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.md"))
        .stdout(predicate::str::contains("plan.md"));
}

#[test]
fn test_naked_run_lists() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("plan.md"));
}

#[test]
fn test_show_prints_numbers_and_progress() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .args(["show", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] 1. step"))
        .stdout(predicate::str::contains("- [x] 2. step2"))
        .stdout(predicate::str::contains("1.95h / 117min"))
        .stdout(predicate::str::contains("50% completado (1 de 2 pasos)"));
}

#[test]
fn test_check_writes_back() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .args(["check", "plan", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100% completado"));

    let saved = fs::read_to_string(temp.path().join("markdown-files/plan.md")).unwrap();
    assert_eq!(
        saved,
        "# Tarea: A\n- [x] step (estimate:: 30m)\n- [x] step2 (estimate:: 1h)"
    );
}

#[test]
fn test_all_unchecks_when_complete() {
    let temp = project_with_plan();
    checkpad(temp.path()).args(["all", "plan"]).assert().success();
    checkpad(temp.path()).args(["all", "plan"]).assert().success();

    let saved = fs::read_to_string(temp.path().join("markdown-files/plan.md")).unwrap();
    assert!(!saved.contains("[x]"));
}

#[test]
fn test_bad_item_number_fails() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .args(["toggle", "plan", "zero"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Invalid item number: zero"));
}

#[test]
fn test_missing_document_fails() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .args(["show", "nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing.md"));
}

#[test]
fn test_export_html_default_name() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .args(["export", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("checklist_exportado.html"));

    let html = fs::read_to_string(temp.path().join("checklist_exportado.html")).unwrap();
    assert!(html.contains("Progreso: 50%"));
    assert!(html.contains("<script>"));
}

#[test]
fn test_export_markdown_to_dir() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .args(["export", "plan", "--markdown", "--name", "week", "--out", "dist"])
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join("dist/week.md")).unwrap();
    assert_eq!(written, PLAN);
}

#[test]
fn test_export_rejects_bad_name() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .args(["export", "plan", "--name", "a?b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("caracteres no válidos"));
}

#[test]
fn test_complete_suggests_names() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .args(["complete", "see ![[no"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes"))
        .stdout(predicate::str::contains("plan").not());
}

#[test]
fn test_config_set_and_show() {
    let temp = project_with_plan();
    checkpad(temp.path())
        .args(["config", "export-name", "informe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export-name set to informe"));

    checkpad(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("export-name = informe"));

    checkpad(temp.path()).args(["export", "plan"]).assert().success();
    assert!(temp.path().join("informe.html").exists());
}

#[test]
fn test_init_creates_project() {
    let temp = tempfile::tempdir().unwrap();
    checkpad(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized checkpad"));

    assert!(temp.path().join(".checkpad/config.json").exists());
    assert!(temp.path().join("markdown-files").is_dir());
}

#[test]
fn test_project_found_from_subdirectory() {
    let temp = project_with_plan();
    checkpad(temp.path()).arg("init").assert().success();
    let sub = temp.path().join("deep/er");
    fs::create_dir_all(&sub).unwrap();

    // HOME stays at the project root so the walk up is not cut short.
    checkpad(&sub)
        .env("HOME", temp.path())
        .args(["show", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] 1. step"));
}
