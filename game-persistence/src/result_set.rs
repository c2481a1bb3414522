use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, JsonValue, Statement};
use tracing::{debug, error};

/// One result row keyed by column name.
pub type Row = serde_json::Map<String, JsonValue>;

/// Split query text into individual statements on `;`, ignoring separators
/// inside quotes and comments. Blank statements are dropped.
///
/// Lexing follows the backend: MySQL only starts a `--` comment when
/// whitespace or a control character follows, and honours `#` comments and
/// backslash escapes. SQLite and Postgres have none of those extras.
pub fn split_statements(sql: &str, backend: DbBackend) -> Vec<String> {
    #[derive(Clone, Copy, PartialEq)]
    enum Scan {
        Code,
        Quoted(char),
        LineComment,
        BlockComment,
    }

    let mysql = backend == DbBackend::MySql;
    let chars: Vec<char> = sql.chars().collect();
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut state = Scan::Code;
    let mut has_code = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            Scan::Code => match c {
                ';' => {
                    if has_code {
                        push_statement(&mut statements, &current);
                    }
                    current.clear();
                    has_code = false;
                    i += 1;
                    continue;
                }
                '#' if mysql => state = Scan::LineComment,
                '-' if next == Some('-') && (!mysql || opens_mysql_dash_comment(&chars, i)) => {
                    state = Scan::LineComment
                }
                '/' if next == Some('*') => {
                    current.push_str("/*");
                    state = Scan::BlockComment;
                    i += 2;
                    continue;
                }
                '\'' | '"' | '`' => {
                    state = Scan::Quoted(c);
                    has_code = true;
                }
                c if !c.is_whitespace() => has_code = true,
                _ => {}
            },
            Scan::Quoted(quote) => {
                if mysql && c == '\\' && quote != '`' {
                    current.push(c);
                    current.extend(next);
                    i += 2;
                    continue;
                }
                if c == quote {
                    // A doubled quote is an escaped quote
                    if next == Some(quote) {
                        current.push(c);
                        current.push(quote);
                        i += 2;
                        continue;
                    }
                    state = Scan::Code;
                }
            }
            Scan::LineComment => {
                if c == '\n' {
                    state = Scan::Code;
                }
            }
            Scan::BlockComment => {
                if c == '*' && next == Some('/') {
                    current.push_str("*/");
                    state = Scan::Code;
                    i += 2;
                    continue;
                }
            }
        }
        current.push(c);
        i += 1;
    }

    if has_code {
        push_statement(&mut statements, &current);
    }
    statements
}

/// `--` at `index` is a MySQL comment only when followed by whitespace, a
/// control character or the end of input.
fn opens_mysql_dash_comment(chars: &[char], index: usize) -> bool {
    chars
        .get(index + 2)
        .is_none_or(|c| c.is_whitespace() || c.is_control())
}

fn push_statement(statements: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

fn row_to_map(row: &sea_orm::QueryResult) -> Result<Row, DbErr> {
    match JsonValue::from_query_result(row, "")? {
        JsonValue::Object(map) => Ok(map),
        other => Err(DbErr::Type(format!(
            "unable to process result set: expected a row, got {other}"
        ))),
    }
}

/// Execute statements in order and flatten every row they return into one
/// sequence. Statements that yield no result set add nothing. The first
/// failing statement aborts the run.
pub async fn collect_rows<C, I>(db: &C, statements: I) -> Result<Vec<Row>, DbErr>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = Statement>,
{
    let mut rows = Vec::new();

    for (index, statement) in statements.into_iter().enumerate() {
        let results = db.query_all(statement).await.inspect_err(|err| {
            error!(statement = index, "query failed: {}", err);
        })?;
        debug!(statement = index, rows = results.len(), "collected result set");

        for result in &results {
            rows.push(row_to_map(result)?);
        }
    }

    Ok(rows)
}

/// Run raw, possibly multi-statement, query text and aggregate all rows.
pub async fn run_query<C>(db: &C, sql: &str) -> Result<Vec<Row>, DbErr>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let statements = split_statements(sql, backend)
        .into_iter()
        .map(|text| Statement::from_string(backend, text));

    collect_rows(db, statements).await
}

/// Serialize aggregated rows as a JSON array.
pub fn rows_to_json(rows: &[Row]) -> Result<String, serde_json::Error> {
    serde_json::to_string(rows)
}
