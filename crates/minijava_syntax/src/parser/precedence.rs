//! Precedence Table
//!
//! 二元运算符与后缀形式的结合力。数值越大结合越紧；
//! 所有层级都是左结合 (`right == left + 1`)。
//!
//! | 层级 | 形式 |
//! |------|------|
//! | 10 | `&&` |
//! | 20 | `<` |
//! | 30 | `+` `-` |
//! | 40 | `*` |
//! | 50 | `e[i]` |
//! | 60 | `e.length` |
//! | 70 | `e.m(args)` |

use crate::ast::BinaryOp;
use crate::lexer::TokenKind;

/// 左右结合力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingPower {
    pub left: u8,
    pub right: u8,
}

impl BindingPower {
    pub const fn left_assoc(precedence: u8) -> Self {
        Self {
            left: precedence,
            right: precedence + 1,
        }
    }
}

/// climbing 循环中可以折叠到左操作数上的运算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Binary(BinaryOp),
    Index,
    Length,
    Call,
}

impl Operator {
    pub fn binding_power(&self) -> BindingPower {
        match self {
            Operator::Binary(op) => BindingPower::left_assoc(binary_precedence(*op)),
            Operator::Index => BindingPower::left_assoc(50),
            Operator::Length => BindingPower::left_assoc(60),
            Operator::Call => BindingPower::left_assoc(70),
        }
    }
}

pub fn binary_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::And => 10,
        BinaryOp::LessThan => 20,
        BinaryOp::Plus | BinaryOp::Minus => 30,
        BinaryOp::Times => 40,
    }
}

/// 查表：当前 token (以及 `.` 之后的一个 token) 是否构成运算符
///
/// 返回 `None` 表示表达式到此结束。
pub fn lookup(current: TokenKind, next: TokenKind) -> Option<Operator> {
    let op = match current {
        TokenKind::AndAnd => Operator::Binary(BinaryOp::And),
        TokenKind::Lt => Operator::Binary(BinaryOp::LessThan),
        TokenKind::Plus => Operator::Binary(BinaryOp::Plus),
        TokenKind::Minus => Operator::Binary(BinaryOp::Minus),
        TokenKind::Star => Operator::Binary(BinaryOp::Times),
        TokenKind::LBracket => Operator::Index,
        TokenKind::Dot if next == TokenKind::Length => Operator::Length,
        // `.` 后面不是 length 时按方法调用处理，缺失的方法名由调用解析报告
        TokenKind::Dot => Operator::Call,
        _ => return None,
    };
    Some(op)
}

/// 后缀形式 (下标、长度、调用) 的最低结合力
pub const POSTFIX_PRECEDENCE: u8 = 50;
