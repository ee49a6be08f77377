use super::Stack;
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Sub-operations of `OPR`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ret = 0,
    Neg = 1,
    Add = 2,
    Sub = 3,
    Mul = 4,
    Div = 5,
    Odd = 6,
    Mod = 7,
    Eql = 8,
    Neq = 9,
    Lss = 10,
    Leq = 11,
    Gtr = 12,
    Geq = 13,
}

impl TryFrom<i32> for Operation {
    type Error = Error;
    fn try_from(m: i32) -> Result<Self> {
        use Operation::*;
        Ok(match m {
            0 => Ret,
            1 => Neg,
            2 => Add,
            3 => Sub,
            4 => Mul,
            5 => Div,
            6 => Odd,
            7 => Mod,
            8 => Eql,
            9 => Neq,
            10 => Lss,
            11 => Leq,
            12 => Gtr,
            13 => Geq,
            _ => return Err(error!(InvalidInstruction; &format!("OPR {}", m))),
        })
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operation::*;
        match self {
            Ret => write!(f, "RET"),
            Neg => write!(f, "NEG"),
            Add => write!(f, "ADD"),
            Sub => write!(f, "SUB"),
            Mul => write!(f, "MUL"),
            Div => write!(f, "DIV"),
            Odd => write!(f, "ODD"),
            Mod => write!(f, "MOD"),
            Eql => write!(f, "EQL"),
            Neq => write!(f, "NEQ"),
            Lss => write!(f, "LSS"),
            Leq => write!(f, "LEQ"),
            Gtr => write!(f, "GTR"),
            Geq => write!(f, "GEQ"),
        }
    }
}

impl Operation {
    /// Pops the operands and pushes the result. `Ret` touches the frame
    /// registers, so the runtime handles it itself.
    pub fn apply(self, stack: &mut Stack) -> Result<()> {
        use Operation::*;
        let val = match self {
            Ret => return Err(error!(InvalidInstruction; "RET IS NOT AN ARITHMETIC OPERATION")),
            Neg => Operation::negate(stack.pop()?)?,
            Odd => stack.pop()?.rem_euclid(2),
            _ => {
                let (lhs, rhs) = stack.pop_2()?;
                match self {
                    Add => Operation::sum(lhs, rhs)?,
                    Sub => Operation::subtract(lhs, rhs)?,
                    Mul => Operation::multiply(lhs, rhs)?,
                    Div => Operation::divide(lhs, rhs)?,
                    Mod => Operation::modulus(lhs, rhs)?,
                    Eql => (lhs == rhs) as i32,
                    Neq => (lhs != rhs) as i32,
                    Lss => (lhs < rhs) as i32,
                    Leq => (lhs <= rhs) as i32,
                    Gtr => (lhs > rhs) as i32,
                    Geq => (lhs >= rhs) as i32,
                    Ret | Neg | Odd => unreachable!(),
                }
            }
        };
        stack.push(val)
    }

    pub fn negate(val: i32) -> Result<i32> {
        val.checked_neg().ok_or_else(|| error!(Overflow))
    }

    pub fn sum(lhs: i32, rhs: i32) -> Result<i32> {
        lhs.checked_add(rhs).ok_or_else(|| error!(Overflow))
    }

    pub fn subtract(lhs: i32, rhs: i32) -> Result<i32> {
        lhs.checked_sub(rhs).ok_or_else(|| error!(Overflow))
    }

    pub fn multiply(lhs: i32, rhs: i32) -> Result<i32> {
        lhs.checked_mul(rhs).ok_or_else(|| error!(Overflow))
    }

    pub fn divide(lhs: i32, rhs: i32) -> Result<i32> {
        match lhs.checked_div(rhs) {
            Some(i) => Ok(i),
            None => {
                if rhs == 0 {
                    Err(error!(DivisionByZero))
                } else {
                    Err(error!(Overflow))
                }
            }
        }
    }

    pub fn modulus(lhs: i32, rhs: i32) -> Result<i32> {
        match lhs.checked_rem(rhs) {
            Some(i) => Ok(i),
            None => {
                if rhs == 0 {
                    Err(error!(DivisionByZero))
                } else {
                    Err(error!(Overflow))
                }
            }
        }
    }
}
