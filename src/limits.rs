/// ## Capacities
///
/// Every fixed size table of the compiler and the machine is sized from
/// here. The defaults are the classic PL/0 limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Slots in the symbol directory.
    pub symbols: usize,
    /// Instructions the code emitter will accept.
    pub code: usize,
    /// Cells in the machine's value stack.
    pub stack_height: usize,
    /// Deepest lexical level a procedure may be declared at.
    pub max_level: usize,
    pub ident_len: usize,
    pub number_digits: usize,
    /// Deepest nesting of statements inside statements or expressions
    /// inside parentheses.
    pub nesting: usize,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            symbols: 100,
            code: 1000,
            stack_height: 2000,
            max_level: 10,
            ident_len: 11,
            number_digits: 5,
            nesting: 256,
        }
    }
}
