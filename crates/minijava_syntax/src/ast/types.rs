use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    // --- 内置类型 ---
    Int,      // int
    Boolean,  // boolean
    IntArray, // int[]

    // 类引用: Foo (只记录名字，不在此处解析)
    Class(String),
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Boolean => write!(f, "boolean"),
            Type::IntArray => write!(f, "int[]"),
            Type::Class(name) => write!(f, "{}", name),
        }
    }
}
