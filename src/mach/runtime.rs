use super::{Address, Frames, Instruction, Opcode, Operation, Program, Stack, FRAME_HEADER};
use crate::error;
use crate::lang::Error;
use crate::Limits;
use std::convert::TryFrom;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

/// ## Execution events
///
/// [`Runtime::execute`] runs until something happens that the host must
/// deal with, then reports it here.
#[derive(Debug, PartialEq)]
pub enum Event {
    /// Cycle budget spent; call `execute` again.
    Running,
    /// The program printed a value.
    Output(i32),
    /// The program is waiting for [`Runtime::enter`].
    Input,
    Stopped,
    Error(Error),
}

/// Register values, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub pc: Address,
    pub bp: usize,
    pub sp: usize,
}

/// ## Virtual machine
///
/// Registers start at `pc = 0, bp = 1, sp = 0` with a synthetic outermost
/// frame whose header cells are zero. The program ends when that frame
/// returns or `pc` runs off the end of the code.
pub struct Runtime {
    program: Program,
    stack: Stack,
    frames: Frames,
    pc: Address,
    bp: usize,
    input: bool,
    stopped: bool,
    interrupted: bool,
}

impl Runtime {
    pub fn new(program: Program, limits: &Limits) -> Runtime {
        Runtime {
            program,
            stack: Stack::new(limits.stack_height),
            frames: Frames::new(limits.stack_height / FRAME_HEADER + 1),
            pc: 0,
            bp: 1,
            input: false,
            stopped: false,
            interrupted: false,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn registers(&self) -> Registers {
        Registers {
            pc: self.pc,
            bp: self.bp,
            sp: self.stack.len(),
        }
    }

    pub fn frames(&self) -> &Frames {
        &self.frames
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Stops a running program at the next call to `execute`.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// Supplies the value an `in` instruction is waiting for.
    pub fn enter(&mut self, val: i32) -> Result<()> {
        if !self.input {
            return Ok(());
        }
        self.stack.push(val)?;
        self.input = false;
        Ok(())
    }

    pub fn enter_str(&mut self, s: &str) -> Result<()> {
        match s.trim().parse::<i32>() {
            Ok(val) => self.enter(val),
            Err(_) => Err(error!(InvalidInput; s.trim())),
        }
    }

    pub fn execute(&mut self, cycles: usize) -> Event {
        if self.interrupted {
            self.interrupted = false;
            if !self.stopped {
                self.stopped = true;
                self.input = false;
                return Event::Error(error!(Break; &format!("IN INSTRUCTION {}", self.pc)));
            }
        }
        for _ in 0..cycles {
            match self.step() {
                Event::Running => continue,
                event => return event,
            }
        }
        Event::Running
    }

    /// Executes exactly one instruction unless the machine is stopped or
    /// waiting for input.
    pub fn step(&mut self) -> Event {
        if self.stopped {
            return Event::Stopped;
        }
        if self.input {
            return Event::Input;
        }
        let addr = self.pc;
        let instruction = match self.program.op(addr) {
            Some(op) if !self.frames.is_empty() => *op,
            _ => {
                self.stopped = true;
                debug!(pc = addr, "stopped");
                return Event::Stopped;
            }
        };
        self.pc += 1;
        match self.dispatch(instruction) {
            Ok(event) => event,
            Err(error) => {
                self.stopped = true;
                Event::Error(error.message(&format!("IN INSTRUCTION {}", addr)))
            }
        }
    }

    /// Convenience driver: runs to completion feeding `input` to every `in`
    /// instruction and collecting every `out`.
    pub fn run<I: IntoIterator<Item = i32>>(&mut self, input: I) -> Result<Vec<i32>> {
        let mut input = input.into_iter();
        let mut output = vec![];
        loop {
            match self.execute(5000) {
                Event::Running => {}
                Event::Output(val) => output.push(val),
                Event::Input => match input.next() {
                    Some(val) => self.enter(val)?,
                    None => return Err(error!(InvalidInput; "NO MORE INPUT")),
                },
                Event::Stopped => return Ok(output),
                Event::Error(error) => return Err(error),
            }
        }
    }

    /// Stack contents with activation records separated by `|`.
    pub fn stack_dump(&self) -> String {
        let mut s = String::new();
        let values = self.stack.values();
        let mut cell = 0;
        for (index, size) in self.frames.sizes(values.len()).iter().enumerate() {
            if index > 0 {
                s.push_str(" | ");
            }
            let end = (cell + size).min(values.len());
            let vals: Vec<String> = values[cell..end].iter().map(|v| v.to_string()).collect();
            s.push_str(&vals.join(" "));
            cell = end;
        }
        s
    }

    fn dispatch(&mut self, ir: Instruction) -> Result<Event> {
        match ir.op {
            Opcode::Lit => self.stack.push(ir.m)?,
            Opcode::Opr => match ir.operation()? {
                Operation::Ret => self.r#return()?,
                opr => opr.apply(&mut self.stack)?,
            },
            Opcode::Lod => {
                let cell = self.cell(ir)?;
                let val = self.stack.get(cell)?;
                self.stack.push(val)?;
            }
            Opcode::Sto => {
                let cell = self.cell(ir)?;
                let val = self.stack.pop()?;
                self.stack.set(cell, val)?;
            }
            Opcode::Cal => self.call(ir)?,
            Opcode::Inc => self.stack.reserve(ir.m)?,
            Opcode::Jmp => self.pc = ir.address()?,
            Opcode::Jpc => {
                if self.stack.pop()? == 0 {
                    self.pc = ir.address()?;
                }
            }
            Opcode::Out => return Ok(Event::Output(self.stack.pop()?)),
            Opcode::In => {
                self.input = true;
                return Ok(Event::Input);
            }
        }
        Ok(Event::Running)
    }

    /// Follows `l` static links outward from the current frame.
    fn base(&self, l: usize) -> Result<usize> {
        let mut base = self.bp;
        for _ in 0..l {
            let link = match base.checked_sub(1) {
                Some(cell) => self.stack.get(cell)?,
                None => return Err(error!(StackUnderflow; "BROKEN STATIC LINK")),
            };
            base = Runtime::to_cell(link)?;
        }
        Ok(base)
    }

    /// Absolute stack cell named by an `(l, m)` pair.
    fn cell(&self, ir: Instruction) -> Result<usize> {
        let base = self.base(ir.l)?;
        match (base + ir.address()?).checked_sub(1) {
            Some(cell) => Ok(cell),
            None => Err(error!(StackUnderflow; "BROKEN STATIC LINK")),
        }
    }

    fn call(&mut self, ir: Instruction) -> Result<()> {
        let static_link = self.base(ir.l)?;
        let sp = self.stack.len();
        if sp + FRAME_HEADER > self.stack.capacity() {
            return Err(error!(StackOverflow; "NO ROOM FOR FRAME"));
        }
        self.stack.set(sp, Runtime::to_value(static_link)?)?;
        self.stack.set(sp + 1, Runtime::to_value(self.bp)?)?;
        self.stack.set(sp + 2, Runtime::to_value(self.pc)?)?;
        self.frames.push(sp + 1)?;
        trace!(from = self.pc - 1, to = ir.m, static_link, "call");
        self.bp = sp + 1;
        self.pc = ir.address()?;
        Ok(())
    }

    fn r#return(&mut self) -> Result<()> {
        let sp = match self.bp.checked_sub(1) {
            Some(sp) => sp,
            None => return Err(error!(StackUnderflow; "RETURN WITHOUT FRAME")),
        };
        let dynamic_link = self.stack.get(sp + 1)?;
        let return_address = self.stack.get(sp + 2)?;
        self.stack.truncate(sp)?;
        self.bp = Runtime::to_cell(dynamic_link)?;
        self.pc = Runtime::to_cell(return_address)?;
        self.frames.pop();
        trace!(to = self.pc, frames = self.frames.len(), "return");
        Ok(())
    }

    fn to_cell(val: i32) -> Result<usize> {
        usize::try_from(val).map_err(|_| error!(StackUnderflow; &format!("BAD LINK {}", val)))
    }

    fn to_value(cell: usize) -> Result<i32> {
        i32::try_from(cell).map_err(|_| error!(StackOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn runtime(code: &str) -> Runtime {
        Runtime::new(Program::from_str(code).unwrap(), &Limits::default())
    }

    #[test]
    fn test_initial_registers() {
        let r = runtime("6 0 3");
        assert_eq!(r.registers(), Registers { pc: 0, bp: 1, sp: 0 });
        assert_eq!(r.frames().len(), 1);
    }

    #[test]
    fn test_input_suspends() {
        let mut r = runtime("6 0 4 10 0 2 4 0 3 3 0 3 9 0 1 2 0 0");
        assert_eq!(r.execute(100), Event::Input);
        assert_eq!(r.execute(100), Event::Input);
        assert_eq!(r.enter_str("x").unwrap_err().code(), 56);
        r.enter_str(" 12 ").unwrap();
        assert_eq!(r.execute(100), Event::Output(12));
        assert_eq!(r.execute(100), Event::Stopped);
        assert!(r.is_stopped());
    }

    #[test]
    fn test_interrupt() {
        let mut r = runtime("7 0 0");
        assert_eq!(r.execute(10), Event::Running);
        r.interrupt();
        match r.execute(10) {
            Event::Error(e) => assert_eq!(e.code(), 55),
            e => panic!("{:?}", e),
        }
        assert_eq!(r.execute(10), Event::Stopped);
    }

    #[test]
    fn test_stack_dump() {
        let mut r = runtime("6 0 4 1 0 7 5 0 3 6 0 3 1 0 9");
        for _ in 0..5 {
            assert_eq!(r.step(), Event::Running);
        }
        assert_eq!(r.stack_dump(), "0 0 0 0 7 | 1 1 3 9");
        assert_eq!(r.frames().sizes(r.registers().sp), vec![5, 4]);
    }

    #[test]
    fn test_bad_operation() {
        let mut r = runtime("2 0 14");
        match r.step() {
            Event::Error(e) => assert_eq!(e.code(), 54),
            e => panic!("{:?}", e),
        }
    }
}
