use super::CompareExpr;
use crate::Command;

/// `exists (select ..)`, optionally narrowed by an extra condition that is
/// appended to the subquery's WHERE.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareExists {
    pub cmd: Box<Command>,
    pub compare: Option<Box<CompareExpr>>,
}

pub fn exists(cmd: Command) -> CompareExpr {
    CompareExists {
        cmd: Box::new(cmd),
        compare: None,
    }
    .into()
}

pub fn exists_where(cmd: Command, compare: CompareExpr) -> CompareExpr {
    CompareExists {
        cmd: Box::new(cmd),
        compare: Some(Box::new(compare)),
    }
    .into()
}

impl From<CompareExists> for CompareExpr {
    fn from(value: CompareExists) -> Self {
        CompareExpr::Exists(value)
    }
}
