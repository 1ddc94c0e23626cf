//! Builds the same sales report for each supported dialect.
//!
//! Run with:
//!   cargo run --example report_query -p sqlweave
//!
//! Optional: point `SQLWEAVE_CONFIG` at a TOML file to pick the dialect used for the
//! write statements at the end, e.g.
//!
//! ```toml
//! dialect = "sqlite"
//! ```

use sqlweave::prelude::*;
use sqlweave::{Dialect, WeaveConfig};
use std::env;
use std::fs;

fn main() -> WeaveResult<()> {
    println!("=== sqlweave report query ===\n");

    demo_mysql_report()?;
    demo_mariadb_archive()?;
    demo_sqlite_lookup()?;
    demo_recursive_categories()?;
    demo_configured_writes()?;

    Ok(())
}

// ─── MySQL: grouped report with index hints ─────────────────────────────────

fn demo_mysql_report() -> WeaveResult<()> {
    let e = MySqlEscaper::new();
    let mut b = MySqlQueryBuilder::new();

    let hint = e.index_hint(IndexHintKind::Force, &["idx_created_at"], None)?;
    let region = e.column("o.region", "")?;
    let customer = e.column("c.name", "utf8mb4_bin")?;

    b.select_mode(SelectMode::SqlCalcFoundRows)
        .select(&format!("{region}, COUNT(*) AS orders, SUM(o.total) AS revenue"))
        .from_with_hints(&e.table("orders", "o")?, &[hint])
        .join(&e.table("customers", "c")?, JoinType::Left)
        .on("c.id", "o.customer_id", "=")
        .where_between(
            "o.created_at",
            &e.value("2024-01-01", "", "")?,
            &e.value("2024-12-31", "", "")?,
            false,
        )
        .and()
        .start_where_group()
        .where_like(&customer, &e.likevalue("acme", LikeMatch::Forward, "", "")?, false)
        .or()
        .where_in(&region, &e.list_value(&["north", "west"])?, false)
        .end_where_group()?
        .group_by(&region)
        .having("COUNT(*)", &e.intvalue("10").to_string(), ">=")
        .order_by("revenue", false)
        .limit(e.intvalue("25"), 0);

    println!("[mysql report]");
    println!("  {}", b.get_select_query());
    println!();
    Ok(())
}

// ─── MariaDB: copy old rows and delete them, returning ids ──────────────────

fn demo_mariadb_archive() -> WeaveResult<()> {
    let e = MySqlEscaper::new();
    let cutoff = e.value("2020-01-01", "", "")?;

    let mut copy = MariaDbQueryBuilder::new();
    copy.into_table(&e.table("orders_archive", "")?)
        .select_statement(&format!("SELECT * FROM orders WHERE created_at < {cutoff}"));
    copy.insert_mode(WriteMode::Ignore)?;

    let mut purge = MariaDbQueryBuilder::new();
    purge
        .from(&e.table("orders", "")?)
        .where_("created_at", &cutoff, "<")
        .returning("id");
    purge.delete_mode(WriteMode::Quick)?;

    println!("[mariadb archive]");
    println!("  {}", copy.get_insert_query());
    println!("  {}", purge.get_delete_query());
    println!();
    Ok(())
}

// ─── SQLite: forced index and upsert-by-replace ─────────────────────────────

fn demo_sqlite_lookup() -> WeaveResult<()> {
    let e = SqliteEscaper::new();
    let mut lookup = SqliteQueryBuilder::new();
    lookup
        .select(&e.result_column("email", "")?)
        .from_indexed_by(&e.table("users", "")?, &e.column("idx_users_email", "")?)
        .where_null("deleted_at", false)
        .and()
        .where_("email", &e.value("o'brien@example.com", "", "")?, "=");

    let mut upsert = SqliteQueryBuilder::new();
    upsert
        .into_table(&e.table("users", "")?)
        .column_names(&["email", "name"])
        .values(&[
            e.value("a@example.com", "", "")?.as_str(),
            e.value("Ann", "", "")?.as_str(),
        ])
        .insert_mode(ConflictResolution::Replace)
        .returning("id");

    println!("[sqlite lookup]");
    println!("  {}", lookup.get_select_query());
    println!("  {}", upsert.get_insert_query());
    println!();
    Ok(())
}

// ─── Recursive CTE ──────────────────────────────────────────────────────────

fn demo_recursive_categories() -> WeaveResult<()> {
    let mut b = DmlQueryBuilder::new();
    b.with_recursive(
        "tree",
        "SELECT id, parent_id, 0 FROM categories WHERE parent_id IS NULL",
        "SELECT c.id, c.parent_id, t.depth + 1 FROM categories c JOIN tree t ON c.parent_id = t.id",
        true,
        Some(&["id", "parent_id", "depth"]),
    )
    .select("id, depth")
    .from("tree")
    .order_by("depth", true);

    println!("[recursive categories]");
    println!("  {}", b.get_select_query());
    println!();
    Ok(())
}

// ─── Dialect picked from configuration ──────────────────────────────────────

fn demo_configured_writes() -> WeaveResult<()> {
    let config = match env::var("SQLWEAVE_CONFIG") {
        Ok(path) => {
            let text = fs::read_to_string(&path)
                .map_err(|err| WeaveError::Config(format!("{path}: {err}")))?;
            WeaveConfig::from_toml_str(&text)?
        }
        Err(_) => WeaveConfig::new().with_dialect(Dialect::MariaDb),
    };
    let e = config.escaper();

    let mut b = DmlQueryBuilder::new();
    if let Some(trace) = config.sql_trace() {
        b = b.with_trace(trace);
    }
    b.update(&e.table("users", "")?)
        .set(&[("name", e.value("Zoë", "", "")?.as_str())])
        .where_("id", &e.intvalue("42").to_string(), "=");

    println!("[{} update]", config.dialect);
    println!("  {}", b.get_update_query());
    println!();
    Ok(())
}
