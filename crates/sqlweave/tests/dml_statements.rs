//! End-to-end statement rendering through the public API.

use sqlweave::prelude::*;
use sqlweave::{Dialect, WeaveConfig};

// ============================================
// SELECT
// ============================================

#[test]
fn test_escaped_select_with_joins_and_groups() {
    let e = MySqlEscaper::new();
    let mut b = MySqlQueryBuilder::new();
    b.select(&format!(
        "{}, {}",
        e.result_column("u.id", "").unwrap(),
        e.result_column("p.title", "post").unwrap()
    ))
    .from(&e.table("users", "u").unwrap())
    .join(&e.table("posts", "p").unwrap(), JoinType::Inner)
    .on("p.user_id", "u.id", "=")
    .and()
    .on("p.published", "1", "=")
    .where_("u.active", "1", "=")
    .and()
    .start_where_group()
    .where_like("u.name", &e.likevalue("al", LikeMatch::Forward, "", "").unwrap(), false)
    .or()
    .where_null("u.name", false);
    b.end_where_group().unwrap();

    assert_eq!(
        b.get_select_query(),
        "SELECT `u`.`id`, `p`.`title` AS `post` FROM `users` AS `u` \
         INNER JOIN `posts` AS `p` ON p.user_id = u.id AND p.published = 1 \
         WHERE u.active = 1 AND (u.name LIKE 'al%' OR u.name IS NULL)"
    );
}

#[test]
fn test_having_and_where_are_independent() {
    let mut b = DmlQueryBuilder::new();
    b.select("dept, COUNT(*)")
        .from("staff")
        .where_("salary", "1000", ">")
        .group_by("dept")
        .having("COUNT(*)", "5", ">")
        .or()
        .having("dept", "'ops'", "=")
        .where_("active", "1", "=");

    assert_eq!(
        b.get_select_query(),
        "SELECT dept, COUNT(*) FROM staff WHERE salary > 1000 AND active = 1 \
         GROUP BY dept HAVING COUNT(*) > 5 OR dept = 'ops'"
    );
}

#[test]
fn test_union_and_cte() {
    let mut b = DmlQueryBuilder::new();
    b.with("recent", "SELECT id FROM orders WHERE age < 7", None)
        .select("id")
        .from("recent");
    b.union("SELECT id FROM archive", "all").unwrap();
    b.except("SELECT id FROM refunds", "").unwrap();

    assert_eq!(
        b.get_select_query(),
        "WITH recent AS (SELECT id FROM orders WHERE age < 7) SELECT id FROM recent \
         UNION ALL SELECT id FROM archive EXCEPT SELECT id FROM refunds"
    );
}

#[test]
fn test_bad_union_modifier_is_rejected() {
    let mut b = DmlQueryBuilder::new();
    b.from("t");
    let err = b.union("SELECT 1", "SOME").err().unwrap();
    assert!(err.is_invalid_argument());
    assert_eq!(b.get_select_query(), "SELECT * FROM t");
}

#[test]
fn test_unbalanced_groups() {
    let mut b = DmlQueryBuilder::new();
    b.from("t");
    assert!(b.end_where_group().is_err());

    b.start_having_group().having("x", "1", "=");
    assert!(matches!(
        b.validate(),
        Err(WeaveError::UnclosedGroup { .. })
    ));
}

// ============================================
// INSERT / UPDATE / DELETE
// ============================================

#[test]
fn test_insert_rows() {
    let mut b = DmlQueryBuilder::new();
    b.into_table("t")
        .column_names(&["a", "b"])
        .values(&["1", "2"])
        .values(&["3", "4"]);
    assert_eq!(b.get_insert_query(), "INSERT INTO t (a, b) VALUES (1, 2), (3, 4)");
}

#[test]
fn test_update_requires_set() {
    let mut b = DmlQueryBuilder::new();
    b.update("t").where_("id", "1", "=");
    assert_eq!(b.get_update_query(), "");
    b.set(&[("a", "2")]).order_by("id", true).limit(1, -1);
    assert_eq!(
        b.get_update_query(),
        "UPDATE t SET a = 2 WHERE id = 1 ORDER BY id ASC LIMIT 1"
    );
}

#[test]
fn test_multi_table_delete_drops_order_and_limit() {
    let mut b = DmlQueryBuilder::new();
    b.delete("t1")
        .from("t1")
        .join("t2", JoinType::Inner)
        .on("t1.id", "t2.id", "=")
        .order_by("t1.id", true)
        .limit(10, -1);
    assert_eq!(
        b.get_delete_query(),
        "DELETE t1 FROM t1 INNER JOIN t2 ON t1.id = t2.id"
    );
}

// ============================================
// Dialects
// ============================================

#[test]
fn test_mysql_upsert() {
    let e = MySqlEscaper::new();
    let mut b = MySqlQueryBuilder::new();
    b.into_table(&e.table("stock", "").unwrap())
        .column_names(&["sku", "qty"])
        .values(&[e.value("A-1", "", "").unwrap().as_str(), "5"])
        .on_duplicate_key_update(&[("qty", "qty + VALUES(qty)")]);
    b.insert_mode(WriteMode::Ignore).unwrap();
    assert_eq!(
        b.get_insert_query(),
        "INSERT IGNORE INTO `stock` (sku, qty) VALUES ('A-1', 5) \
         ON DUPLICATE KEY UPDATE qty = qty + VALUES(qty)"
    );
}

#[test]
fn test_sqlite_builder_with_configured_escaper() {
    let config = WeaveConfig::from_toml_str("dialect = \"sqlite\"").unwrap();
    assert_eq!(config.dialect, Dialect::Sqlite);
    let e = config.escaper();

    let mut b = SqliteQueryBuilder::new();
    b.from_not_indexed(&e.table("logs", "").unwrap())
        .where_("msg", &e.value("it's", "", "").unwrap(), "=")
        .returning("id");
    assert_eq!(
        b.get_delete_query(),
        "DELETE FROM \"logs\" NOT INDEXED WHERE msg = 'it''s' RETURNING id"
    );
}

#[test]
fn test_builders_are_reusable_after_render() {
    let mut b = MariaDbQueryBuilder::new();
    b.from("t").where_("a", "1", "=");
    let first = b.get_select_query();
    assert_eq!(first, b.get_select_query());

    b.where_("b", "2", "=");
    assert_eq!(b.get_select_query(), "SELECT * FROM t WHERE a = 1 AND b = 2");
}
