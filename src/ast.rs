//! Syntax tree types for the worksheet description language.
//!
//! A parsed document is a tree of [`Node`]s: scalar atoms decoded by
//! preference order (integer, then float, then string) and lists carrying an
//! operator name plus heterogeneous operands.

use std::fmt;

/// A single expression in a worksheet document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Integer atom: `42`, `-7`
    Int(i64),
    /// Floating-point atom: `3.5`, `1e3`
    Float(f64),
    /// String atom; surrounding quote characters, if any, are kept verbatim
    Str(String),
    /// Nested list: `(operator operand ...)`
    List(ListExpr),
}

/// A list expression: operator name plus zero or more operands.
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpr {
    /// The first element of the list, always captured as text even when it
    /// looks numeric
    pub operator: String,
    pub operands: Vec<Node>,
}

impl Node {
    /// Numeric value of this atom, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Int(i) => Some(*i as f64),
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow this node as a list expression, if it is one.
    pub fn as_list(&self) -> Option<&ListExpr> {
        match self {
            Node::List(list) => Some(list),
            _ => None,
        }
    }

    /// Borrow the string content of a string atom.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    /// True for scalar atoms, false for lists.
    pub fn is_atom(&self) -> bool {
        !matches!(self, Node::List(_))
    }

    /// Text form of a scalar atom (`None` for lists). Used wherever the
    /// format allows a bare word in place of a `(name value)` clause.
    pub fn atom_text(&self) -> Option<String> {
        match self {
            Node::Int(i) => Some(i.to_string()),
            Node::Float(f) => Some(f.to_string()),
            Node::Str(s) => Some(s.clone()),
            Node::List(_) => None,
        }
    }
}

impl ListExpr {
    /// The nth operand (0-based, operator excluded).
    pub fn operand(&self, index: usize) -> Option<&Node> {
        self.operands.get(index)
    }

    /// Iterate only the operands that are themselves lists.
    pub fn sublists(&self) -> impl Iterator<Item = &ListExpr> {
        self.operands.iter().filter_map(Node::as_list)
    }
}

impl fmt::Display for Node {
    /// Re-serialize the tree in source syntax. Round-trips the token
    /// structure (numeric atoms come back normalized).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Int(i) => write!(f, "{i}"),
            Node::Float(v) => write!(f, "{v}"),
            Node::Str(s) => write!(f, "{s}"),
            Node::List(list) => {
                write!(f, "({}", list.operator)?;
                for op in &list.operands {
                    write!(f, " {op}")?;
                }
                write!(f, ")")
            }
        }
    }
}
