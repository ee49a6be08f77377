use crate::lang::{lex, parse, parse_tokens, tokens_to_string, tokens_to_symbolic, Error};
use crate::mach::{Event, Listing, Program, Runtime};
use crate::Limits;
use ansi_term::Style;
use clap::Parser;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::io::BufRead;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pl0")]
#[command(about = "Compile a PL/0 program and run it on the stack machine")]
struct Args {
    /// Print the token list
    #[arg(short = 'l')]
    lexemes: bool,

    /// Print the generated code
    #[arg(short = 'a')]
    assembly: bool,

    /// Trace every instruction the machine executes
    #[arg(short = 'v')]
    verbose: bool,

    /// FILE is a token file instead of source text
    #[arg(long, conflicts_with = "bytecode")]
    tokens: bool,

    /// FILE is a raw code file
    #[arg(long)]
    bytecode: bool,

    #[arg(long = "code-size", default_value_t = Limits::default().code)]
    code_size: usize,

    #[arg(long, default_value_t = Limits::default().symbols)]
    symbols: usize,

    #[arg(long = "stack-height", default_value_t = Limits::default().stack_height)]
    stack_height: usize,

    #[arg(long = "max-level", default_value_t = Limits::default().max_level)]
    max_level: usize,

    file: PathBuf,
}

impl Args {
    fn limits(&self) -> Limits {
        Limits {
            symbols: self.symbols,
            code: self.code_size,
            stack_height: self.stack_height,
            max_level: self.max_level,
            ..Limits::default()
        }
    }
}

pub fn main() {
    init_logging();
    let args = Args::parse();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        warn!("Error setting Ctrl-C handler: {}", error);
    }
    match main_loop(&args, interrupted) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("{}: {}", args.file.display(), error);
            process::exit(1);
        }
    }
}

/// `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `Ok(false)` when the program failed to compile or stopped on an error.
fn main_loop(args: &Args, interrupted: Arc<AtomicBool>) -> std::io::Result<bool> {
    let limits = args.limits();
    let text = std::fs::read_to_string(&args.file)?;
    let program = match compile(args, &text, &limits) {
        Ok(program) => program,
        Err(error) => {
            report(&error);
            return Ok(false);
        }
    };
    if args.assembly {
        println!("{}", program);
        println!("{}", Listing::new(&program));
    }

    let input = match Interface::new("PL/0") {
        Ok(interface) => {
            interface.set_report_signal(Signal::Interrupt, true);
            Some(interface)
        }
        Err(error) => {
            debug!("line editor unavailable: {}", error);
            None
        }
    };

    let mut runtime = Runtime::new(program, &limits);
    if args.verbose {
        println!(
            "{:>5} {:<13} {:>5} {:>5} {:>5}  stack",
            "", "", "pc", "bp", "sp"
        );
        let r = runtime.registers();
        println!("{:>5} {:<13} {:>5} {:>5} {:>5}", "", "initial", r.pc, r.bp, r.sp);
    }
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        let event = if args.verbose {
            let pc = runtime.registers().pc;
            let instruction = runtime.program().op(pc).copied();
            let event = runtime.execute(1);
            let r = runtime.registers();
            let waiting = event == Event::Input && r.pc == pc;
            if let (Some(instruction), false) = (instruction, runtime.is_stopped() || waiting) {
                println!(
                    "{:>5} {:<13} {:>5} {:>5} {:>5}  {}",
                    pc,
                    instruction.to_string(),
                    r.pc,
                    r.bp,
                    r.sp,
                    runtime.stack_dump()
                );
            }
            event
        } else {
            runtime.execute(5000)
        };
        match event {
            Event::Running => {}
            Event::Output(val) => println!("{}", val),
            Event::Input => match read_line(&input)? {
                Some(line) => {
                    if let Err(error) = runtime.enter_str(&line) {
                        report(&error);
                    }
                }
                None => runtime.interrupt(),
            },
            Event::Stopped => return Ok(true),
            Event::Error(error) => {
                report(&error);
                return Ok(false);
            }
        }
    }
}

fn compile(args: &Args, text: &str, limits: &Limits) -> Result<Program, Error> {
    if args.bytecode {
        return Program::from_str(text);
    }
    let tokens = if args.tokens {
        parse_tokens(text)?
    } else {
        lex(text)?
    };
    if args.lexemes {
        println!("{}\n", tokens_to_string(&tokens));
        println!("{}\n", tokens_to_symbolic(&tokens));
    }
    parse(tokens, limits)
}

/// `None` at end of input or on Ctrl-C.
fn read_line(input: &Option<Interface<DefaultTerminal>>) -> std::io::Result<Option<String>> {
    match input {
        Some(interface) => {
            interface.set_prompt("? ")?;
            match interface.read_line()? {
                ReadResult::Input(line) => {
                    interface.add_history_unique(line.clone());
                    Ok(Some(line))
                }
                ReadResult::Signal(_) | ReadResult::Eof => Ok(None),
            }
        }
        None => {
            let mut line = String::new();
            if std::io::stdin().lock().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            Ok(Some(line))
        }
    }
}

fn report(error: &Error) {
    eprintln!("{}", Style::new().bold().paint(error.to_string()));
}
