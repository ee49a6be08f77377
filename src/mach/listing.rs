use super::Program;

/// ## Pretty code listing
///
/// One instruction per line as `index | MNEMONIC l m`, with `OPR`
/// instructions naming their sub-operation.
pub struct Listing<'a> {
    program: &'a Program,
}

impl<'a> Listing<'a> {
    pub fn new(program: &'a Program) -> Listing<'a> {
        Listing { program }
    }
}

impl<'a> std::fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let width = self.program.len().saturating_sub(1).to_string().len();
        writeln!(f, "{:>width$} | OP  L M", "#", width = width)?;
        for (addr, op) in self.program.ops().iter().enumerate() {
            writeln!(f, "{:>width$} | {}", addr, op, width = width)?;
        }
        Ok(())
    }
}
