use anyhow::Context;
use serde::Serialize;
use sqlselect::{SelectQuery, SelectQueryBuilder};
use std::io::Write;

use crate::cli::{DemoArgs, QueryFlags, QuerySource, RenderArgs};
use crate::config::QueryFile;

/// One query ready for output.
#[derive(Debug, Clone)]
struct Named {
    name: Option<String>,
    query: SelectQuery,
}

#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    name: Option<&'a str>,
    sql: &'a str,
    query: &'a SelectQuery,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let queries = collect_queries(&args.source)?;

    let stdout = std::io::stdout();
    write_queries(&mut stdout.lock(), &queries, args.strict, args.json)
}

fn collect_queries(source: &QuerySource) -> anyhow::Result<Vec<Named>> {
    let queries = match source {
        QuerySource::Flags(flags) => vec![Named {
            name: None,
            query: from_flags(flags),
        }],
        QuerySource::Config { path, query } => {
            // A missing .env is fine; variables may come from the real environment.
            dotenvy::dotenv().ok();

            let loaded = QueryFile::load(path)?;
            tracing::debug!(
                path = %loaded.path.display(),
                queries = loaded.file.queries.len(),
                "loaded query file"
            );

            let selected = match query {
                Some(name) => {
                    let Some(q) = loaded.file.find(name) else {
                        anyhow::bail!("no query named `{name}` in {}", loaded.path.display());
                    };
                    vec![q]
                }
                None => loaded.file.queries.iter().collect(),
            };

            selected
                .into_iter()
                .map(|q| Named {
                    name: Some(q.name.clone()),
                    query: q.to_query(),
                })
                .collect()
        }
    };

    Ok(queries)
}

pub fn demo(args: DemoArgs) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_queries(&mut stdout.lock(), &demo_queries(), false, args.json)
}

fn from_flags(flags: &QueryFlags) -> SelectQuery {
    let mut qb = SelectQueryBuilder::new();
    qb.add_columns(flags.columns.iter().cloned());
    if let Some(table) = &flags.table {
        qb.add_from(table.as_str());
    }
    for (column, value) in &flags.filters {
        qb.add_where(column.as_str(), value.as_str());
    }
    qb.build()
}

fn demo_queries() -> Vec<Named> {
    let contacts = SelectQueryBuilder::new()
        .add_column("name")
        .add_column("phone")
        .add_from("students")
        .add_where("id", "42")
        .add_where("name", "John")
        .build();

    let multiple_columns = SelectQueryBuilder::new()
        .add_columns(["name", "phone", "email"])
        .add_from("students")
        .add_where("id", "42")
        .build();

    let multiple_where = SelectQueryBuilder::new()
        .add_where_all([("id", "42"), ("name", "John"), ("age", "22")])
        .add_from("students")
        .build();

    vec![
        Named {
            name: Some("contacts".to_string()),
            query: contacts,
        },
        Named {
            name: Some("multiple_columns".to_string()),
            query: multiple_columns,
        },
        Named {
            name: Some("multiple_where".to_string()),
            query: multiple_where,
        },
    ]
}

fn write_queries(
    out: &mut impl Write,
    queries: &[Named],
    strict: bool,
    json: bool,
) -> anyhow::Result<()> {
    for named in queries {
        let label = named.name.as_deref().unwrap_or("<flags>");

        let sql = if strict {
            named
                .query
                .try_build_query()
                .with_context(|| format!("query {label}"))?
        } else {
            if !named.query.is_buildable() {
                tracing::warn!(query = label, "no table set, printing empty statement");
            }
            named.query.build_query()
        };

        if json {
            let line = JsonLine {
                name: named.name.as_deref(),
                sql: &sql,
                query: &named.query,
            };
            serde_json::to_writer(&mut *out, &line)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{sql}")?;
        }
    }

    out.flush()?;
    Ok(())
}
