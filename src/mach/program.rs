use super::{Address, Instruction, Opcode};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// ## Code emitter
///
/// Append only and capacity bounded. The index returned by [`emit`] stays
/// valid for the life of the program so forward jumps can be patched once
/// their target is known.
///
/// [`emit`]: Program::emit
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    ops: Vec<Instruction>,
    capacity: usize,
}

impl Program {
    pub fn new(capacity: usize) -> Program {
        Program {
            ops: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn emit(&mut self, op: Opcode, l: usize, m: i32) -> Result<Address> {
        if self.ops.len() >= self.capacity {
            return Err(error!(CodeTooLong));
        }
        let addr = self.ops.len();
        let instruction = Instruction::new(op, l, m);
        trace!(addr, %instruction, "emit");
        self.ops.push(instruction);
        Ok(addr)
    }

    /// Rewrites the `m` field of an already emitted instruction.
    pub fn patch(&mut self, addr: Address, m: Address) -> Result<()> {
        let m = match i32::try_from(m) {
            Ok(m) => m,
            Err(_) => return Err(error!(CodeTooLong)),
        };
        match self.ops.get_mut(addr) {
            Some(op) => {
                trace!(addr, m, "patch");
                op.m = m;
                Ok(())
            }
            None => Err(error!(InvalidInstruction; &format!("PATCH {}", addr))),
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ops(&self) -> &[Instruction] {
        &self.ops
    }

    pub fn op(&self, addr: Address) -> Option<&Instruction> {
        self.ops.get(addr)
    }
}

/// Raw code file: one `op l m` triple per line.
impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for op in &self.ops {
            writeln!(f, "{} {} {}", op.op as u8, op.l, op.m)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Program {
    type Err = Error;

    /// Reads a raw code file. The capacity is the number of instructions read.
    fn from_str(s: &str) -> Result<Program> {
        let mut words = s.split_whitespace().map(|w| match w.parse::<i32>() {
            Ok(n) => Ok(n),
            Err(_) => Err(error!(MalformedFile; &format!("NOT A NUMBER: {}", w))),
        });
        let mut ops = vec![];
        while let Some(op) = words.next() {
            let op = Opcode::try_from(op?)?;
            let l = match words.next() {
                Some(l) => l?,
                None => return Err(error!(MalformedFile; "INCOMPLETE INSTRUCTION")),
            };
            let m = match words.next() {
                Some(m) => m?,
                None => return Err(error!(MalformedFile; "INCOMPLETE INSTRUCTION")),
            };
            let l = match usize::try_from(l) {
                Ok(l) => l,
                Err(_) => return Err(error!(MalformedFile; "NEGATIVE LEVEL")),
            };
            ops.push(Instruction::new(op, l, m));
        }
        let capacity = ops.len();
        Ok(Program { ops, capacity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_emit_past_capacity() {
        let mut prog = Program::new(2);
        assert_eq!(prog.emit(Opcode::Inc, 0, 3), Ok(0));
        assert_eq!(prog.emit(Opcode::Jmp, 0, 0), Ok(1));
        let before = prog.clone();
        assert_eq!(prog.emit(Opcode::Lit, 0, 1).unwrap_err().code(), 30);
        assert_eq!(prog, before);
    }

    #[test]
    fn test_patch() {
        let mut prog = Program::new(4);
        let jump = prog.emit(Opcode::Jpc, 0, 0).unwrap();
        prog.emit(Opcode::Lit, 0, 9).unwrap();
        prog.patch(jump, prog.len()).unwrap();
        assert_eq!(prog.op(jump).unwrap().m, 2);
        assert!(prog.patch(7, 0).is_err());
    }

    #[test]
    fn test_code_file() {
        let prog = Program::from_str("6 0 4\n1 0 5\n4 0 3\n3 0 3\n9 0 1\n2 0 0\n").unwrap();
        assert_eq!(prog.len(), 6);
        assert_eq!(prog.op(2), Some(&Instruction::new(Opcode::Sto, 0, 3)));
        assert_eq!(Program::from_str(&prog.to_string()), Ok(prog));
        assert_eq!(Program::from_str("1 0").unwrap_err().code(), 37);
        assert_eq!(Program::from_str("11 0 0").unwrap_err().code(), 54);
        assert_eq!(Program::from_str("1 -1 0").unwrap_err().code(), 37);
    }
}
