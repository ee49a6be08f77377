use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Cells in every frame header: static link, dynamic link, return address.
pub const FRAME_HEADER: usize = 3;

/// ## Activation records
///
/// Base pointer of every live frame, outermost first. The machine's
/// correctness never depends on this table; it exists so frames can be
/// counted and the stack can be printed one frame at a time.
#[derive(Debug, Clone)]
pub struct Frames {
    bases: Vec<usize>,
    max_len: usize,
}

impl Frames {
    /// The synthetic outermost frame has its base at cell 1.
    pub fn new(max_len: usize) -> Frames {
        Frames {
            bases: vec![1],
            max_len,
        }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn bases(&self) -> &[usize] {
        &self.bases
    }

    pub fn push(&mut self, bp: usize) -> Result<()> {
        if self.bases.len() >= self.max_len {
            return Err(error!(StackOverflow; "TOO MANY ACTIVATION RECORDS"));
        }
        self.bases.push(bp);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.bases.pop()
    }

    /// Cell count of each live frame given the current stack pointer.
    pub fn sizes(&self, sp: usize) -> Vec<usize> {
        let mut ends: Vec<usize> = self.bases.iter().skip(1).map(|bp| bp - 1).collect();
        ends.push(sp);
        self.bases
            .iter()
            .zip(ends)
            .map(|(bp, end)| end.saturating_sub(bp - 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        let mut frames = Frames::new(4);
        assert_eq!(frames.sizes(4), vec![4]);
        frames.push(5).unwrap();
        assert_eq!(frames.sizes(9), vec![4, 5]);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.pop(), Some(5));
    }

    #[test]
    fn test_overflow() {
        let mut frames = Frames::new(1);
        assert_eq!(frames.push(4).unwrap_err().code(), 50);
    }
}
