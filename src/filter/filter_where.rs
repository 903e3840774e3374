use serde_json::Value;

/// A composed SQL fragment plus its bind values, in placeholder order.
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

/// Accumulates WHERE conditions and their bind values, handing out `$n`
/// placeholders in insertion order. User input only ever travels through
/// `param`; condition text itself is built from fixed column names.
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
            conditions: vec![],
        }
    }

    /// Register a bind value and return its placeholder.
    pub fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }

    pub fn push(&mut self, condition: String) {
        self.conditions.push(condition);
    }

    /// Condition with no bind values, e.g. an IS NOT NULL check.
    pub fn push_static(&mut self, condition: &str) {
        self.conditions.push(condition.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Join everything with AND; degenerates to `1=1` when nothing was
    /// pushed so the caller can always write `WHERE {}`.
    pub fn build(self) -> (String, Vec<Value>) {
        let where_clause = if self.conditions.is_empty() {
            "1=1".to_string()
        } else {
            self.conditions.join(" AND ")
        };
        (where_clause, self.param_values)
    }
}

/// `%needle%` containment pattern with `\`, `%` and `_` escaped so the
/// needle matches literally.
pub fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}
