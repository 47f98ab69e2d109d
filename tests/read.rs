use anyhow::Result;
use bootscheme::read::{read_str, read_all, ErrorKind, Reader};
use bootscheme::settings::Settings;
use bootscheme::stream::buffered_chars;
use bootscheme::value::{Value, Obj, Singletons};
use kstring::KString;
use std::sync::Arc;

fn fixnum_list(ns: &[i64]) -> Obj {
    ns.iter().rev().fold(Singletons::global().empty_list(),
                         |rest, n| Value::cons(Value::fixnum(*n), rest))
}

#[test]
fn singletons_are_shared() -> Result<()> {
    let s = Singletons::global();
    let t1 = read_str("#t")?;
    let t2 = read_str("  #t ; again")?;
    assert!(Arc::ptr_eq(&t1, &t2));
    assert!(Arc::ptr_eq(&t1, &s.boolean(true)));
    assert!(Arc::ptr_eq(&read_str("#f")?, &s.boolean(false)));
    assert!(Arc::ptr_eq(&read_str("()")?, &s.empty_list()));
    assert!(Arc::ptr_eq(&read_str("( )")?, &s.empty_list()));
    assert!(Arc::ptr_eq(&read_str("(\n ; nothing\n)")?, &s.empty_list()));
    Ok(())
}

#[test]
fn singletons_inside_lists() -> Result<()> {
    let s = Singletons::global();
    let v = read_str("(#f ())")?;
    let first = v.first().unwrap();
    assert!(Arc::ptr_eq(first, &s.boolean(false)));
    let second = v.rest().unwrap().first().unwrap();
    assert!(Arc::ptr_eq(second, &s.empty_list()));
    assert!(Arc::ptr_eq(v.rest().unwrap().rest().unwrap(), &s.empty_list()));
    Ok(())
}

#[test]
fn list_flattening() -> Result<()> {
    let v = read_str("(1 2 3)")?;
    assert_eq!(v, fixnum_list(&[1, 2, 3]));
    assert!(v.is_proper_list());
    assert_eq!(v.to_string(), "(1 2 3)");
    Ok(())
}

#[test]
fn dotted_pairs() -> Result<()> {
    let v = read_str("(1 . 2)")?;
    assert_eq!(v, Value::cons(Value::fixnum(1), Value::fixnum(2)));
    assert!(!v.is_proper_list());
    assert_eq!(v.to_string(), "(1 . 2)");

    let v = read_str("(1 2 . 3)")?;
    assert_eq!(v, Value::cons(Value::fixnum(1),
                              Value::cons(Value::fixnum(2), Value::fixnum(3))));
    assert_eq!(v.to_string(), "(1 2 . 3)");

    let v = read_str("(1 .\n;tail follows\n 2 ; done\n )")?;
    assert_eq!(v.to_string(), "(1 . 2)");
    Ok(())
}

#[test]
fn string_escapes() -> Result<()> {
    let input = r#""a\"b\\c\nd""#;
    let v = read_str(input)?;
    let s = match &*v {
        Value::String(s) => s.clone(),
        _ => panic!("not a string: {:?}", v)
    };
    let cs: Vec<char> = s.chars().collect();
    assert_eq!(cs[1], '"');
    assert_eq!(cs[3], '\\');
    assert_eq!(cs[5], '\n');
    assert_eq!(s.as_str(), "a\"b\\c\nd");
    assert_eq!(v.to_string(), input);
    Ok(())
}

#[test]
fn unknown_escapes_pass_through() -> Result<()> {
    let v = read_str(r#""\t\q\(""#)?;
    assert_eq!(*v, Value::String(KString::from_ref("tq(")));
    Ok(())
}

#[test]
fn strings_are_not_length_limited() -> Result<()> {
    let long = "x".repeat(100_000);
    let v = read_str(&format!("\"{}\"", long))?;
    assert_eq!(*v, Value::String(KString::from_string(long)));
    Ok(())
}

#[test]
fn fixnums() -> Result<()> {
    assert_eq!(*read_str("-0")?, Value::Fixnum(0));
    assert_eq!(*read_str("-123")?, Value::Fixnum(-123));
    assert_eq!(*read_str("0042")?, Value::Fixnum(42));
    assert_eq!(*read_str("9223372036854775807")?, Value::Fixnum(i64::MAX));
    assert_eq!(*read_str("12(")?, Value::Fixnum(12));
    assert_eq!(*read_str("12;comment")?, Value::Fixnum(12));
    Ok(())
}

#[test]
fn fixnums_wrap_around() -> Result<()> {
    assert_eq!(*read_str("9223372036854775808")?, Value::Fixnum(i64::MIN));
    assert_eq!(*read_str("-9223372036854775808")?, Value::Fixnum(i64::MIN));
    Ok(())
}

#[test]
fn characters() -> Result<()> {
    assert_eq!(*read_str("#\\s")?, Value::Char('s'));
    assert_eq!(*read_str("#\\s)")?, Value::Char('s'));
    assert_eq!(*read_str("#\\space")?, Value::Char(' '));
    assert_eq!(*read_str("#\\n")?, Value::Char('n'));
    assert_eq!(*read_str("#\\newline")?, Value::Char('\n'));
    assert_eq!(*read_str("#\\ ")?, Value::Char(' '));
    assert_eq!(*read_str("#\\(")?, Value::Char('('));
    assert_eq!(*read_str("#\\λ")?, Value::Char('λ'));
    Ok(())
}

#[test]
fn nested_lists() -> Result<()> {
    let v = read_str("((1) (2 . 3) ((\"x\")) #\\a . #t)")?;
    assert_eq!(v.to_string(), "((1) (2 . 3) ((\"x\")) #\\a . #t)");
    Ok(())
}

#[test]
fn long_lists_do_not_recurse() -> Result<()> {
    let n = 200_000;
    let text = format!("({})", vec!["7"; n].join(" "));
    let v = read_str(&text)?;
    assert!(v.is_proper_list());
    assert_eq!(v.to_string(), text);
    Ok(())
}

#[test]
fn read_all_reads_to_the_end() -> Result<()> {
    let vals = read_all("1 (2) \"three\" ; four\n".as_bytes(), Settings::default())?;
    assert_eq!(vals.len(), 3);
    assert_eq!(vals[1], fixnum_list(&[2]));
    assert!(read_all("  ; nothing\n".as_bytes(), Settings::default())?.is_empty());
    Ok(())
}

#[test]
fn reader_returns_one_datum_per_call() -> Result<()> {
    let mut r = Reader::new(buffered_chars("#t 5\n(6".as_bytes()),
                            Settings::default());
    assert_eq!(*r.read()?, Value::Bool(true));
    assert_eq!(r.read_next()?, Some(Value::fixnum(5)));
    assert!(r.read_next().is_err());
    Ok(())
}

#[test]
fn datum_ending_at_end_of_input() -> Result<()> {
    for (input, printed) in [("42", "42"), ("-0", "0"), ("#\\s", "#\\s"),
                             ("#\\space", "#\\space"), ("#f", "#f"),
                             ("\"s\"", "\"s\""), ("(1 2)", "(1 2)")] {
        let mut r = Reader::new(buffered_chars(input.as_bytes()),
                                Settings::default());
        assert_eq!(r.read()?.to_string(), printed);
        assert!(r.read_next()?.is_none(), "{}", input);
        assert!(r.read_next()?.is_none(), "{}", input);
        assert_eq!(r.read().unwrap_err().kind(), ErrorKind::UnexpectedEndOfInput);
    }
    Ok(())
}

#[test]
fn adjacent_booleans() -> Result<()> {
    let s = Singletons::global();
    let v = read_str("(#t#f)")?;
    assert_eq!(v.to_string(), "(#t #f)");
    assert!(Arc::ptr_eq(v.first().unwrap(), &s.boolean(true)));
    assert!(Arc::ptr_eq(v.rest().unwrap().first().unwrap(), &s.boolean(false)));
    assert_eq!(read_all("#f#t()".as_bytes(), Settings::default())?.len(), 3);
    Ok(())
}

#[test]
fn long_lists_compare_structurally() -> Result<()> {
    let n = 200_000;
    let text = format!("({})", vec!["7"; n].join(" "));
    let a = read_str(&text)?;
    let b = read_str(&text)?;
    assert!(a == b);
    let c = read_str(&format!("({} 8)", vec!["7"; n - 1].join(" ")))?;
    assert!(a != c);
    let d = read_str(&format!("({} . 7)", vec!["7"; n - 1].join(" ")))?;
    assert!(a != d);
    assert!(format!("{:?}", a).ends_with("Fixnum(7), EmptyList))"));
    Ok(())
}

#[test]
fn round_trip() -> Result<()> {
    for input in [
        "#t", "#f", "()", "-5", "0", "#\\newline", "#\\space", "#\\x", "#\\\"",
        "\"\"", "\"tab\there\"", "\"q\\\"uote\"", "(1 (2 (3 . 4)) . \"five\")",
        "(#\\( #\\) #\\;)",
    ] {
        let v = read_str(input)?;
        let printed = v.to_string();
        let v2 = read_str(&printed)?;
        assert_eq!(v, v2, "{}", input);
        assert_eq!(printed, v2.to_string());
    }
    Ok(())
}
