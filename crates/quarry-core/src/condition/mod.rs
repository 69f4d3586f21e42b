mod ast;

pub use ast::{ConditionKind, ConditionNode};
