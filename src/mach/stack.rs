use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Size limited value stack
///
/// All cells exist up front, as in the classic machine. `len()` is the stack
/// pointer; cells above it keep their contents so a frame header written by
/// `CAL` survives until the callee's `INC` covers it.

pub struct Stack {
    vec: Vec<i32>,
    sp: usize,
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.values())
    }
}

impl Stack {
    pub fn new(height: usize) -> Stack {
        Stack {
            vec: vec![0; height],
            sp: 0,
        }
    }
    /// Cells in the stack, used or not.
    pub fn capacity(&self) -> usize {
        self.vec.len()
    }
    fn overflow_error(&self) -> Error {
        error!(StackOverflow)
    }
    fn range_error(&self, index: usize) -> Error {
        error!(StackUnderflow; &format!("CELL {}", index))
    }
    pub fn len(&self) -> usize {
        self.sp
    }
    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }
    pub fn values(&self) -> &[i32] {
        &self.vec[..self.sp]
    }
    pub fn get(&self, index: usize) -> Result<i32> {
        match self.vec.get(index) {
            Some(v) => Ok(*v),
            None => Err(self.range_error(index)),
        }
    }
    pub fn set(&mut self, index: usize, val: i32) -> Result<()> {
        match self.vec.get_mut(index) {
            Some(v) => {
                *v = val;
                Ok(())
            }
            None => Err(self.range_error(index)),
        }
    }
    pub fn push(&mut self, val: i32) -> Result<()> {
        if self.sp >= self.capacity() {
            return Err(self.overflow_error());
        }
        self.vec[self.sp] = val;
        self.sp += 1;
        Ok(())
    }
    pub fn pop(&mut self) -> Result<i32> {
        match self.sp.checked_sub(1) {
            Some(sp) => {
                self.sp = sp;
                Ok(self.vec[sp])
            }
            None => Err(self.range_error(0)),
        }
    }
    pub fn pop_2(&mut self) -> Result<(i32, i32)> {
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
    /// Moves the stack pointer by `n` cells without touching them.
    pub fn reserve(&mut self, n: i32) -> Result<()> {
        let sp = self.sp as i64 + n as i64;
        if sp < 0 {
            return Err(self.range_error(0));
        }
        self.truncate(sp as usize)
    }
    /// Sets the stack pointer.
    pub fn truncate(&mut self, sp: usize) -> Result<()> {
        if sp > self.capacity() {
            return Err(self.overflow_error());
        }
        self.sp = sp;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_keeps_cells() {
        let mut stack = Stack::new(6);
        stack.set(2, 42).unwrap();
        stack.reserve(4).unwrap();
        assert_eq!(stack.values(), &[0, 0, 42, 0]);
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert_eq!(stack.push(3).unwrap_err().code(), 50);
        assert_eq!(stack.pop_2(), Ok((1, 2)));
        assert_eq!(stack.reserve(-5).unwrap_err().code(), 51);
        assert_eq!(stack.reserve(3).unwrap_err().code(), 50);
    }

    #[test]
    fn test_bounds() {
        let mut stack = Stack::new(2);
        assert_eq!(stack.pop().unwrap_err().code(), 51);
        assert_eq!(stack.get(2).unwrap_err().code(), 51);
        assert_eq!(stack.set(5, 1).unwrap_err().code(), 51);
    }
}
