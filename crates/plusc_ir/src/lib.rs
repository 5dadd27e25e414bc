//! Tree types shared by the parser, the folder and the code generator.

#[macro_use]
extern crate macro_rules_attribute;

pub mod tree;

use std::fmt;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)];
}

/// Binary operators. Addition is the only operator the language has.
#[derive(NodeCopy!)]
pub enum BinOp {
    Add,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
