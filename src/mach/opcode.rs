use super::Operation;
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Virtual machine instruction set
///
/// Every instruction is an `(op, l, m)` triple. `l` is the number of static
/// links to follow for `LOD`, `STO` and `CAL`; `m` is a literal, an address,
/// a frame slot or an [`Operation`] depending on the opcode.
///
/// For example: `x := 3 * y` compiles to `[LIT 0 3, LOD 0 y, OPR 0 MUL, STO 0 x]`

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Push `m`.
    Lit = 1,
    /// Arithmetic, comparison or return, selected by `m`.
    Opr = 2,
    Lod = 3,
    Sto = 4,
    /// Push a frame header and branch to `m`.
    Cal = 5,
    /// Reserve `m` cells at the top of the stack.
    Inc = 6,
    Jmp = 7,
    /// Pop and branch to `m` if zero.
    Jpc = 8,
    /// Pop and print.
    Out = 9,
    /// Read and push.
    In = 10,
}

impl TryFrom<i32> for Opcode {
    type Error = Error;
    fn try_from(op: i32) -> Result<Self> {
        use Opcode::*;
        Ok(match op {
            1 => Lit,
            2 => Opr,
            3 => Lod,
            4 => Sto,
            5 => Cal,
            6 => Inc,
            7 => Jmp,
            8 => Jpc,
            9 => Out,
            10 => In,
            _ => return Err(error!(InvalidInstruction; &format!("OPCODE {}", op))),
        })
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Lit => write!(f, "LIT"),
            Opr => write!(f, "OPR"),
            Lod => write!(f, "LOD"),
            Sto => write!(f, "STO"),
            Cal => write!(f, "CAL"),
            Inc => write!(f, "INC"),
            Jmp => write!(f, "JMP"),
            Jpc => write!(f, "JPC"),
            Out | In => write!(f, "SIO"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Opcode,
    pub l: usize,
    pub m: i32,
}

impl Instruction {
    pub fn new(op: Opcode, l: usize, m: i32) -> Instruction {
        Instruction { op, l, m }
    }

    /// `m` as a code address or frame slot.
    pub fn address(&self) -> Result<usize> {
        usize::try_from(self.m)
            .map_err(|_| error!(InvalidInstruction; &format!("ADDRESS {}", self.m)))
    }

    pub fn operation(&self) -> Result<Operation> {
        Operation::try_from(self.m)
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.op, self.operation()) {
            (Opcode::Opr, Ok(opr)) => write!(f, "{} {} {}", self.op, self.l, opr),
            _ => write!(f, "{} {} {}", self.op, self.l, self.m),
        }
    }
}
