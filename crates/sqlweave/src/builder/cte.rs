//! Common table expressions (WITH clause).

/// Internal representation of a single CTE definition.
#[derive(Debug, Clone)]
pub(crate) struct CteEntry {
    pub(crate) alias: String,
    pub(crate) columns: Option<Vec<String>>,
    pub(crate) query: String,
    /// For recursive CTEs: the recursive part of the query.
    pub(crate) recursive_query: Option<String>,
    /// Whether to use UNION ALL (true) or UNION (false) for recursive CTEs.
    pub(crate) union_all: bool,
}

impl CteEntry {
    pub(crate) fn new(alias: &str, query: &str, columns: Option<&[&str]>) -> Self {
        Self {
            alias: alias.to_string(),
            columns: columns.map(to_owned_list),
            query: query.to_string(),
            recursive_query: None,
            union_all: false,
        }
    }

    pub(crate) fn recursive(
        alias: &str,
        anchor: &str,
        recursive: &str,
        union_all: bool,
        columns: Option<&[&str]>,
    ) -> Self {
        Self {
            alias: alias.to_string(),
            columns: columns.map(to_owned_list),
            query: anchor.to_string(),
            recursive_query: Some(recursive.to_string()),
            union_all,
        }
    }

    pub(crate) fn combinator(&self) -> Option<&'static str> {
        self.recursive_query
            .as_ref()
            .map(|_| if self.union_all { "UNION ALL" } else { "UNION" })
    }

    fn write_sql(&self, out: &mut String) {
        out.push_str(&self.alias);

        // Optional column list
        if let Some(cols) = &self.columns {
            out.push('(');
            out.push_str(&cols.join(", "));
            out.push(')');
        }

        out.push_str(" AS (");
        out.push_str(&self.query);

        // Recursive part
        if let (Some(recursive), Some(combinator)) = (&self.recursive_query, self.combinator()) {
            out.push(' ');
            out.push_str(combinator);
            out.push(' ');
            out.push_str(recursive);
        }

        out.push(')');
    }
}

/// Render the WITH clause, or an empty string when there are no entries.
///
/// `RECURSIVE` is emitted once when any entry is recursive.
pub(crate) fn render_with(entries: &[CteEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::from("WITH ");
    if entries.iter().any(|cte| cte.recursive_query.is_some()) {
        out.push_str("RECURSIVE ");
    }
    for (i, cte) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        cte.write_sql(&mut out);
    }
    out
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_cte() {
        let entries = [CteEntry::new(
            "active_users",
            "SELECT id FROM users WHERE status = 'active'",
            None,
        )];
        assert_eq!(
            render_with(&entries),
            "WITH active_users AS (SELECT id FROM users WHERE status = 'active')"
        );
    }

    #[test]
    fn cte_with_columns() {
        let entries = [CteEntry::new(
            "monthly_sales",
            "SELECT month, SUM(amount) FROM orders GROUP BY month",
            Some(&["month", "total"]),
        )];
        assert_eq!(
            render_with(&entries),
            "WITH monthly_sales(month, total) AS (SELECT month, SUM(amount) FROM orders GROUP BY month)"
        );
    }

    #[test]
    fn recursive_combinators() {
        let all = CteEntry::recursive("t", "SELECT 1", "SELECT n + 1 FROM t", true, None);
        let distinct = CteEntry::recursive("t", "SELECT 1", "SELECT n + 1 FROM t", false, None);
        assert_eq!(all.combinator(), Some("UNION ALL"));
        assert_eq!(distinct.combinator(), Some("UNION"));
        assert_eq!(
            render_with(&[all]),
            "WITH RECURSIVE t AS (SELECT 1 UNION ALL SELECT n + 1 FROM t)"
        );
        assert_eq!(
            render_with(&[distinct]),
            "WITH RECURSIVE t AS (SELECT 1 UNION SELECT n + 1 FROM t)"
        );
    }

    #[test]
    fn mixed_recursive_and_plain() {
        let entries = [
            CteEntry::new("a", "SELECT 1", None),
            CteEntry::recursive("b", "SELECT 1", "SELECT 2", true, Some(&["n"])),
        ];
        assert_eq!(
            render_with(&entries),
            "WITH RECURSIVE a AS (SELECT 1), b(n) AS (SELECT 1 UNION ALL SELECT 2)"
        );
    }

    #[test]
    fn empty_renders_nothing() {
        assert_eq!(render_with(&[]), "");
    }
}
