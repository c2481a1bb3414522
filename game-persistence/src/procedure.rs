use sea_orm::{DbBackend, Statement, Value};

/// A call to a named stored procedure. Arguments are always bound, never
/// spliced into the SQL text. Placeholders are positional `?`, as MySQL and
/// SQLite expect.
#[derive(Debug, Clone)]
pub struct ProcedureCall {
    name: &'static str,
    args: Vec<Value>,
}

impl ProcedureCall {
    pub fn new(name: &'static str) -> Self {
        debug_assert!(
            name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "procedure names are plain identifiers"
        );
        Self {
            name,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn statement(self, backend: DbBackend) -> Statement {
        let placeholders = vec!["?"; self.args.len()].join(", ");

        Statement::from_sql_and_values(
            backend,
            format!("CALL {}({})", self.name, placeholders),
            self.args,
        )
    }
}
