//! # PL/0
//!
//! Niklaus Wirth's teaching language, compiled in a single pass to code
//! for a small stack machine and run there.
//!
//! Build with [Rust](https://www.rust-lang.org/tools/install) then run a
//! program from a source file.
//! ```text
//! $ pl0 -a hello.pl0
//! ```
//!
//! The compiler and the machine are also usable as a library.
//! ```
//! let program = pl0::compile("var x; begin x := 6; out x * 7 end.").unwrap();
//! let mut runtime = pl0::mach::Runtime::new(program, &pl0::Limits::default());
//! assert_eq!(runtime.run(std::iter::empty()).unwrap(), vec![42]);
//! ```

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

#[path = "doc/chapter_2.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_2;

#[path = "doc/appendix_a.rs"]
#[allow(non_snake_case)]
pub mod ___Appendix_A;

pub mod lang;
pub mod mach;
pub mod term;

mod limits;
pub use limits::Limits;

/// Source line an error was found on, when known.
pub type LineNumber = Option<usize>;

/// Scans and translates `source` with the default [`Limits`].
pub fn compile(source: &str) -> Result<mach::Program, lang::Error> {
    compile_with(source, &Limits::default())
}

pub fn compile_with(source: &str, limits: &Limits) -> Result<mach::Program, lang::Error> {
    lang::parse(lang::lex(source)?, limits)
}
