use docmaint::links::verify_links;
use docmaint::models::Issue;
use docmaint::naming::{fix_naming, validate_naming, NamingRule};
use docmaint::scan::FileSetSnapshot;
use std::fs;
use tempfile::tempdir;

#[test]
fn naming_and_links_each_report_one_issue() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("01-Intro.md"), "# Intro\n\n[see](./02-Next.md)\n").unwrap();
    fs::write(root.join("intro.md"), "# intro\n").unwrap();

    let naming = validate_naming(root, &NamingRule::default()).unwrap();
    assert_eq!(naming.issues.len(), 1);
    assert_eq!(naming.issues[0].file(), "intro.md");
    assert_eq!(naming.exit_code(), 1);

    let snapshot = FileSetSnapshot::scan(root).unwrap();
    let links = verify_links(&snapshot);
    assert_eq!(links.issues.len(), 1);
    match &links.issues[0] {
        Issue::BrokenLink { source, target, .. } => {
            assert_eq!(source, "01-Intro.md");
            assert_eq!(target, "./02-Next.md");
        }
        other => panic!("unexpected issue {other:?}"),
    }
    assert_eq!(links.exit_code(), 1);
}

#[test]
fn clean_tree_exits_zero() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("01-Basics")).unwrap();
    fs::write(root.join("README.md"), "[start](01-Basics/01-Start.md)").unwrap();
    fs::write(
        root.join("01-Basics/01-Start.md"),
        "[home](../README.md) [top](/README.md#top) [web](https://example.com) [here](#section)",
    )
    .unwrap();

    assert_eq!(validate_naming(root, &NamingRule::default()).unwrap().exit_code(), 0);
    let snapshot = FileSetSnapshot::scan(root).unwrap();
    assert_eq!(verify_links(&snapshot).exit_code(), 0);
}

#[test]
fn fix_naming_is_idempotent_on_disk() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("5-intro")).unwrap();

    let first = fix_naming(root, &NamingRule::default()).unwrap();
    assert_eq!(first.renames.len(), 1);
    assert_eq!(first.renames[0].to, "05-Intro");
    assert!(root.join("05-Intro").is_dir());

    let second = fix_naming(root, &NamingRule::default()).unwrap();
    assert!(second.renames.is_empty());
    assert!(second.unresolved.is_empty());
    assert!(root.join("05-Intro").is_dir());
}

#[test]
fn missing_root_aborts_every_pass() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("docs");
    assert!(FileSetSnapshot::scan(&missing).is_err());
    assert!(validate_naming(&missing, &NamingRule::default()).is_err());
    assert!(fix_naming(&missing, &NamingRule::default()).is_err());
}
