//! Statement rendering.
//!
//! Rendering is a pure function of the accumulated state: calling
//! [`QueryBuilder::build`] twice yields the same text.

use super::query::{QueryBuilder, StatementKind};
use crate::value::Value;

fn join_values(values: &[Value]) -> String {
    values.iter().map(Value::to_sql).collect::<Vec<_>>().join(", ")
}

/// `(a) AND (b)`.
fn conjunction(conditions: &[String]) -> String {
    conditions
        .iter()
        .map(|c| format!("({c})"))
        .collect::<Vec<_>>()
        .join(" AND ")
}

impl QueryBuilder {
    /// Renders the statement selected by the last statement-kind call.
    #[must_use]
    pub fn build(&self) -> String {
        let mut sql = match self.kind {
            StatementKind::Select => self.render_select(),
            StatementKind::Insert => self.render_insert(),
            StatementKind::Update => self.render_update(),
            StatementKind::Delete => self.render_delete(),
        };

        if let Some(raw) = &self.raw {
            sql.push(' ');
            sql.push_str(raw);
        }

        sql
    }

    fn table_name(&self) -> &str {
        self.table.as_ref().map_or("", |t| t.name.as_str())
    }

    fn push_where(&self, sql: &mut String) {
        if !self.filters.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conjunction(&self.filters));
        }
    }

    fn render_select(&self) -> String {
        let mut sql = String::from("SELECT ");

        if self.selection.is_empty() {
            sql.push('*');
        } else {
            let items: Vec<String> = self.selection.iter().map(ToString::to_string).collect();
            sql.push_str(&items.join(", "));
        }

        if let Some(table) = &self.table {
            sql.push_str(&format!(" FROM \"{}\" {}", table.name, table.alias));
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_string());
        }

        self.push_where(&mut sql);

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if !self.having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&conjunction(&self.having));
        }

        if !self.order_by.is_empty() {
            let entries: Vec<String> = self
                .order_by
                .iter()
                .map(|(expression, order)| format!("{expression} {order}"))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&entries.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        sql
    }

    fn render_insert(&self) -> String {
        let mut sql = format!("INSERT INTO {}", self.table_name());

        if self.rows.is_empty() {
            sql.push_str(" DEFAULT VALUES");
            return sql;
        }

        if !self.insert_columns.is_empty() {
            let columns: Vec<String> = self
                .insert_columns
                .iter()
                .map(|c| format!("\"{c}\""))
                .collect();
            sql.push_str(&format!(" ({})", columns.join(", ")));
        }

        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| format!("({})", join_values(row)))
            .collect();
        sql.push_str(" VALUES ");
        sql.push_str(&rows.join(", "));

        sql
    }

    fn render_update(&self) -> String {
        let mut sql = format!("UPDATE {}", self.table_name());

        if !self.assignments.is_empty() {
            let assignments: Vec<String> = self
                .assignments
                .iter()
                .map(|(column, value)| format!("\"{column}\" = {}", value.to_sql()))
                .collect();
            sql.push_str(" SET ");
            sql.push_str(&assignments.join(", "));
        }

        self.push_where(&mut sql);
        sql
    }

    fn render_delete(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.table_name());
        self.push_where(&mut sql);
        sql
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{JoinTable, Order, QueryBuilder, Selection};
    use crate::value::Value;

    #[test]
    fn test_select_full_clause_order() {
        let sql = QueryBuilder::new()
            .select("status")
            .count_as("*", "n")
            .from("orders")
            .where_clause(["created_at > '2024-01-01'", "amount > 0"])
            .group_by("status")
            .having("COUNT(*) > 5")
            .order_by(vec![("n", Order::Desc), ("status", Order::Asc)])
            .limit(10)
            .offset(20)
            .add_raw_sql("FOR UPDATE")
            .build();
        assert_eq!(
            sql,
            "SELECT status, COUNT(*) AS n FROM \"orders\" orders \
             WHERE (created_at > '2024-01-01') AND (amount > 0) \
             GROUP BY status HAVING (COUNT(*) > 5) \
             ORDER BY n DESC, status ASC LIMIT 10 OFFSET 20 FOR UPDATE"
        );
    }

    #[test]
    fn test_select_limit_without_offset() {
        let sql = QueryBuilder::new().from("t").limit(10).build();
        assert_eq!(sql, "SELECT * FROM \"t\" t LIMIT 10");
        let sql = QueryBuilder::new().from("t").build();
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OFFSET"));
    }

    #[test]
    fn test_select_without_table_omits_from() {
        assert_eq!(QueryBuilder::new().select("NOW()").build(), "SELECT NOW()");
    }

    #[test]
    fn test_join_selection_is_injected_at_call_position() {
        let sql = QueryBuilder::new()
            .select("u.id")
            .from_as("users", "u")
            .left_join(
                JoinTable::new("posts")
                    .alias("p")
                    .on("p.user_id = u.id")
                    .select(vec![Selection::from("title"), Selection::aliased("id", "post_id")]),
            )
            .select("u.email")
            .inner_join(JoinTable::new("roles").select_all())
            .build();
        assert_eq!(
            sql,
            "SELECT u.id, p.title, p.id AS post_id, u.email, roles.* \
             FROM \"users\" u \
             LEFT JOIN \"posts\" p ON (p.user_id = u.id) \
             INNER JOIN \"roles\" roles ON (TRUE)"
        );
    }

    #[test]
    fn test_insert() {
        let sql = QueryBuilder::new()
            .insert_into("t", ["a", "b"])
            .values([Value::from(1), Value::from("x")])
            .build();
        assert_eq!(sql, "INSERT INTO t (\"a\", \"b\") VALUES (1, 'x')");
    }

    #[test]
    fn test_insert_many_rows_and_values_kinds() {
        let sql = QueryBuilder::new()
            .insert_into("users", ["name", "admin", "meta"])
            .values_rows([
                vec![
                    Value::from("O'Brien"),
                    Value::from(true),
                    Value::from(serde_json::json!({"a": 1})),
                ],
                vec![Value::from("Ann"), Value::Null, Value::raw_sql("DEFAULT")],
            ])
            .build();
        assert_eq!(
            sql,
            "INSERT INTO users (\"name\", \"admin\", \"meta\") VALUES \
             ('O''Brien', TRUE, '{\"a\":1}'), ('Ann', NULL, DEFAULT)"
        );
    }

    #[test]
    fn test_insert_ignores_filters_and_without_rows_uses_defaults() {
        let sql = QueryBuilder::new()
            .insert_into("t", ["a"])
            .where_clause("ignored")
            .order_by("ignored")
            .build();
        assert_eq!(sql, "INSERT INTO t DEFAULT VALUES");
    }

    #[test]
    fn test_insert_columns_appended_separately() {
        let sql = QueryBuilder::new()
            .insert_into("t", Vec::<String>::new())
            .columns("a")
            .values([5])
            .build();
        assert_eq!(sql, "INSERT INTO t (\"a\") VALUES (5)");
    }

    #[test]
    fn test_update() {
        let sql = QueryBuilder::new()
            .update("t")
            .set("n", 5)
            .where_clause("id = 1")
            .build();
        assert_eq!(sql, "UPDATE t SET \"n\" = 5 WHERE (id = 1)");
    }

    #[test]
    fn test_update_with_data_then_set() {
        let sql = QueryBuilder::new()
            .update_with("users", [("name", "Bob"), ("role", "admin")])
            .set("role", "owner")
            .where_clause(["id = 1", "active"])
            .build();
        assert_eq!(
            sql,
            "UPDATE users SET \"name\" = 'Bob', \"role\" = 'owner' WHERE (id = 1) AND (active)"
        );
    }

    #[test]
    fn test_delete() {
        assert_eq!(QueryBuilder::new().delete("t").build(), "DELETE FROM t");
        assert_eq!(
            QueryBuilder::new()
                .delete("t")
                .where_clause("id = 1")
                .add_raw_sql("RETURNING id")
                .build(),
            "DELETE FROM t WHERE (id = 1) RETURNING id"
        );
    }

    #[test]
    fn test_inert_fields_are_ignored() {
        let sql = QueryBuilder::new()
            .select("id")
            .from("t")
            .set("ignored", 1)
            .build();
        assert_eq!(sql, "SELECT id FROM \"t\" t");
    }

    #[test]
    fn test_build_is_pure() {
        let builder = QueryBuilder::new().select("id").from("t");
        assert_eq!(builder.build(), builder.build());
    }

    #[test]
    fn test_clear_then_reuse_matches_fresh_builder() {
        let mut builder = QueryBuilder::new().select("a").from("x").limit(1);
        builder.clear();
        let reused = builder.clone().select("b").from("y").build();
        let fresh = QueryBuilder::new().select("b").from("y").build();
        assert_eq!(reused, fresh);
    }
}
