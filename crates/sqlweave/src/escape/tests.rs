use super::*;

#[test]
fn test_column_quoting() {
    let e = MySqlEscaper::new();
    assert_eq!(e.column("name", "").unwrap(), "`name`");
    assert_eq!(e.column("u.name", "").unwrap(), "`u`.`name`");
    assert_eq!(
        e.column("name", "utf8mb4_bin").unwrap(),
        "`name` COLLATE utf8mb4_bin"
    );
}

#[test]
fn test_column_rejects_bad_collation() {
    let e = MySqlEscaper::new();
    let err = e.column("name", "bin; DROP TABLE x").unwrap_err();
    assert!(matches!(err, WeaveError::InvalidIdentifier(_)));
}

#[test]
fn test_result_column() {
    let e = MySqlEscaper::new();
    assert_eq!(e.result_column("u.id", "").unwrap(), "`u`.`id`");
    assert_eq!(e.result_column("u.id", "uid").unwrap(), "`u`.`id` AS `uid`");
    assert_eq!(e.result_column("*", "").unwrap(), "*");
}

#[test]
fn test_hex_result_column() {
    let e = MySqlEscaper::new();
    assert_eq!(
        e.hex_result_column("u.uuid", "").unwrap(),
        "HEX(`u`.`uuid`) AS `uuid`"
    );
    assert_eq!(
        e.hex_result_column("uuid", "id").unwrap(),
        "HEX(`uuid`) AS `id`"
    );
    assert!(e.hex_result_column("*", "").is_err());
}

#[test]
fn test_table() {
    let e = MySqlEscaper::new();
    assert_eq!(e.table("shop.users", "").unwrap(), "`shop`.`users`");
    assert_eq!(e.table("users", "u").unwrap(), "`users` AS `u`");

    let s = SqliteEscaper::new();
    assert_eq!(s.table("users", "u").unwrap(), r#""users" AS "u""#);
}

#[test]
fn test_mysql_value_escaping() {
    let e = MySqlEscaper::new();
    assert_eq!(e.value("plain", "", "").unwrap(), "'plain'");
    assert_eq!(
        e.value("it's \"x\"\n\\", "", "").unwrap(),
        r#"'it\'s \"x\"\n\\'"#
    );
    assert_eq!(e.value("a\0b\x1a", "", "").unwrap(), r"'a\0b\Z'");
}

#[test]
fn test_value_charset_and_collation() {
    let e = MySqlEscaper::new();
    assert_eq!(
        e.value("x", "utf8mb4_bin", "utf8mb4").unwrap(),
        "_utf8mb4'x' COLLATE utf8mb4_bin"
    );
    assert_eq!(e.value("x", "", "_latin1").unwrap(), "_latin1'x'");
    assert!(e.value("x", "", "utf8'").is_err());
}

#[test]
fn test_sqlite_value_escaping() {
    let s = SqliteEscaper::new();
    assert_eq!(s.value("it's", "", "").unwrap(), "'it''s'");
    assert_eq!(s.value("x", "NOCASE", "").unwrap(), "'x' COLLATE NOCASE");
}

#[test]
fn test_sqlite_rejects_charset_and_nul() {
    let s = SqliteEscaper::new();
    let err = s.value("x", "", "utf8").unwrap_err();
    assert!(matches!(err, WeaveError::Unsupported { dialect: "sqlite", .. }));
    assert!(s.value("a\0b", "", "").is_err());
}

#[test]
fn test_hexvalue() {
    let e = MySqlEscaper::new();
    assert_eq!(e.hexvalue("AB", "", "").unwrap(), "UNHEX('4142')");
    assert_eq!(
        e.hexvalue("AB", "utf8mb4_bin", "utf8mb4").unwrap(),
        "CONVERT(UNHEX('4142') USING utf8mb4) COLLATE utf8mb4_bin"
    );

    let s = SqliteEscaper::new();
    assert_eq!(s.hexvalue("AB", "", "").unwrap(), "X'4142'");
}

#[test]
fn test_likevalue_modes() {
    let e = MySqlEscaper::new();
    assert_eq!(
        e.likevalue("foo", LikeMatch::Forward, "", "").unwrap(),
        "'foo%'"
    );
    assert_eq!(
        e.likevalue("foo", LikeMatch::Backward, "", "").unwrap(),
        "'%foo'"
    );
    assert_eq!(e.likevalue("foo", LikeMatch::Both, "", "").unwrap(), "'%foo%'");
    assert_eq!(
        e.likevalue("o'k", LikeMatch::default(), "", "").unwrap(),
        r"'%o\'k%'"
    );
}

#[test]
fn test_like_match_parsing() {
    assert_eq!("forward".parse::<LikeMatch>().unwrap(), LikeMatch::Forward);
    assert_eq!("BACKWARD".parse::<LikeMatch>().unwrap(), LikeMatch::Backward);
    assert_eq!("both".parse::<LikeMatch>().unwrap(), LikeMatch::Both);

    let err = "sideways".parse::<LikeMatch>().unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("sideways"));
}

#[test]
fn test_intvalue_coercion() {
    let e = MySqlEscaper::new();
    assert_eq!(e.intvalue("42"), 42);
    assert_eq!(e.intvalue("  -17"), -17);
    assert_eq!(e.intvalue("+8"), 8);
    assert_eq!(e.intvalue("12abc"), 12);
    assert_eq!(e.intvalue("3.9"), 3);
    assert_eq!(e.intvalue("abc"), 0);
    assert_eq!(e.intvalue(""), 0);
    assert_eq!(e.intvalue("-"), 0);
    assert_eq!(e.intvalue("99999999999999999999"), i64::MAX);
    assert_eq!(e.intvalue("-99999999999999999999"), i64::MIN);
}

#[test]
fn test_intvalue_reads_exponents() {
    let e = SqliteEscaper::new();
    assert_eq!(e.intvalue("1e3"), 1000);
    assert_eq!(e.intvalue("2.5e1"), 25);
    assert_eq!(e.intvalue("-2.5E1 apples"), -25);
    assert_eq!(e.intvalue("1e-2"), 0);
    assert_eq!(e.intvalue(".5e1"), 5);
    assert_eq!(e.intvalue("7e"), 7);
    assert_eq!(e.intvalue("7e+"), 7);
    assert_eq!(e.intvalue("1e400"), i64::MAX);
    assert_eq!(e.intvalue("0x1A"), 0);
    assert_eq!(e.intvalue("e3"), 0);
    assert_eq!(e.intvalue("."), 0);
}

#[test]
fn test_query_value() {
    let e = SqliteEscaper::new();
    assert_eq!(e.query_value("SELECT 1"), "(SELECT 1)");
}

#[test]
fn test_list_value() {
    let e = MySqlEscaper::new();
    assert_eq!(e.list_value(&["a", "b'c"]).unwrap(), r"('a','b\'c')");
    assert_eq!(e.list_value(&[]).unwrap(), "()");
}

#[test]
fn test_list_value_fails_atomically() {
    let s = SqliteEscaper::new();
    assert!(s.list_value(&["ok", "bad\0"]).is_err());
}

#[test]
fn test_index_hint() {
    let e = MySqlEscaper::new();
    assert_eq!(
        e.index_hint(IndexHintKind::Use, &["idx_a", "idx_b"], None)
            .unwrap(),
        "USE INDEX (`idx_a`, `idx_b`)"
    );
    assert_eq!(
        e.index_hint(IndexHintKind::Force, &["idx_a"], Some(IndexHintScope::OrderBy))
            .unwrap(),
        "FORCE INDEX FOR ORDER BY (`idx_a`)"
    );
    assert_eq!(e.index_hint(IndexHintKind::Use, &[], None).unwrap(), "USE INDEX ()");
    assert!(e.index_hint(IndexHintKind::Ignore, &[], None).is_err());
}

#[test]
fn test_index_hint_parsing() {
    assert_eq!("force".parse::<IndexHintKind>().unwrap(), IndexHintKind::Force);
    assert_eq!(
        "group by".parse::<IndexHintScope>().unwrap(),
        IndexHintScope::GroupBy
    );
    assert!("prefer".parse::<IndexHintKind>().is_err());
    assert!("WHERE".parse::<IndexHintScope>().is_err());
}

#[test]
fn test_escapers_are_object_safe() {
    let escapers: Vec<Box<dyn QueryEscaper>> =
        vec![Box::new(MySqlEscaper::new()), Box::new(SqliteEscaper::new())];
    let quoted: Vec<String> = escapers
        .iter()
        .map(|e| e.column("id", "").unwrap())
        .collect();
    assert_eq!(quoted, vec!["`id`".to_string(), "\"id\"".to_string()]);
}
