use std::fmt;

/// An ordered list of SQL statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlScript {
    stmts: Vec<String>,
}

impl SqlScript {
    pub fn new() -> SqlScript {
        SqlScript::default()
    }

    pub fn add_stmt(&mut self, stmt: impl Into<String>) {
        self.stmts.push(stmt.into());
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.stmts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn clear(&mut self) {
        self.stmts.clear();
    }
}

impl<'a> IntoIterator for &'a SqlScript {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.stmts.iter()
    }
}

impl fmt::Display for SqlScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for stmt in &self.stmts {
            write!(f, "{s}{stmt}")?;
            s = ";\r\n";
        }
        Ok(())
    }
}
