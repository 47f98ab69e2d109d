use anyhow::Result;
use bootscheme::read::read_str;
use bootscheme::value::{Value, Singletons, char2name, name2char};
use std::sync::Arc;
use std::thread;

#[test]
fn accessors() -> Result<()> {
    let v = read_str("(1 . #f)")?;
    assert!(v.is_pair());
    assert!(!v.is_proper_list());
    assert_eq!(**v.first().unwrap(), Value::Fixnum(1));
    assert!(!v.rest().unwrap().is_true());
    assert!(v.first().unwrap().is_true());
    assert!(read_str("()")?.is_empty_list());
    assert!(read_str("()")?.is_true());
    assert!(read_str("()")?.is_proper_list());
    assert!(read_str("7")?.first().is_none());
    Ok(())
}

#[test]
fn character_names() {
    assert_eq!(char2name('\n'), Some("newline"));
    assert_eq!(char2name(' '), Some("space"));
    assert_eq!(char2name('a'), None);
    assert_eq!(name2char("space"), Some(' '));
    assert_eq!(name2char("tab"), None);
}

#[test]
fn singletons_are_shared_across_threads() {
    let here = Singletons::global().boolean(true);
    let there = thread::spawn(|| read_str("#t").map_err(|e| e.to_string()))
        .join()
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(&here, &there));
}

#[test]
fn dropping_long_shared_chains() -> Result<()> {
    let v = read_str(&format!("({})", vec!["1"; 100_000].join(" ")))?;
    let tail = v.rest().unwrap().rest().unwrap().clone();
    drop(v);
    assert!(tail.is_proper_list());
    assert_eq!(**tail.first().unwrap(), Value::Fixnum(1));
    Ok(())
}
