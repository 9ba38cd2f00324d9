use std::fs;
use std::path::{Path, PathBuf};

use subtask_patch::rules::{SAFE_INDEX, SAFE_LENGTH};
use subtask_patch::{PatchConfig, Patcher};
use tempfile::tempdir;

/// Shape of the subtasks list as FlutterFlow generates it
const GENERATED: &str = r#"                    child: Builder(
                      builder: (context) {
                        final subtasks = [];
                        for (int loop1Index = 0;
                            loop1Index <
                                getJsonField(
                                  listItemsItem,
                                  r'''$.subtasks''',
                                  true,
                                )!
                                    .length;
                            loop1Index++) {
                          final subtask = getJsonField(
                            listItemsItem,
                            r'''$.subtasks''',
                            true,
                          )![loop1Index];
                          subtasks.add(subtask);
                        }
                        final other = getJsonField(listItemsItem, r'''$.subtasks''', false)!.length;
                        return Text('$other');
                      },
                    ),
"#;

fn write_widget(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("modal_add_tarefas_sprint02_widget.dart");
    fs::write(&path, content).unwrap();
    path
}

fn run(path: &Path) -> subtask_patch::PatchReport {
    Patcher::new(PatchConfig::for_target(path))
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn test_length_scenario() {
    let dir = tempdir().unwrap();
    let path = write_widget(
        dir.path(),
        "getJsonField(listItemsItem, r'''$.subtasks''', true,)!.length",
    );

    run(&path);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "((getJsonField(listItemsItem, r'''$.subtasks''', true) as List?)?.length ?? 0)"
    );
}

#[test]
fn test_index_scenario() {
    let dir = tempdir().unwrap();
    let path = write_widget(
        dir.path(),
        "getJsonField(listItemsItem, r'''$.subtasks''', true,)![loop1Index]",
    );

    run(&path);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "(getJsonField(listItemsItem, r'''$.subtasks''', true) as List?)?[loop1Index]"
    );
}

#[test]
fn test_generated_widget_is_patched() {
    let dir = tempdir().unwrap();
    let path = write_widget(dir.path(), GENERATED);

    let report = run(&path);
    let counts: Vec<_> = report.outcomes.iter().map(|o| o.replacements).collect();
    assert_eq!(counts, vec![1, 1, 1, 0]);

    let patched = fs::read_to_string(&path).unwrap();
    assert!(!patched.contains(")!"));
    assert_eq!(patched.matches(SAFE_LENGTH).count(), 2);
    assert_eq!(patched.matches(SAFE_INDEX).count(), 1);
    assert!(patched.contains("return Text('$other');"));
}

#[test]
fn test_second_run_changes_nothing() {
    let dir = tempdir().unwrap();
    let path = write_widget(dir.path(), GENERATED);

    let first = run(&path);
    let after_first = fs::read_to_string(&path).unwrap();
    let second = run(&path);

    assert!(first.changed);
    assert!(!second.changed);
    assert!(second.written);
    assert_eq!(second.total_replacements(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[test]
fn test_missing_file_produces_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("modal_add_tarefas_sprint02_widget.dart");

    let result = Patcher::new(PatchConfig::for_target(&path)).unwrap().run();

    assert!(result.unwrap_err().is_not_found());
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
