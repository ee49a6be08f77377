#![allow(dead_code)]
use pl0::mach::{Event, Runtime};
use pl0::Limits;

pub fn runtime(s: &str) -> Runtime {
    runtime_with(s, Limits::default())
}

pub fn runtime_with(s: &str, limits: Limits) -> Runtime {
    match pl0::compile_with(s, &limits) {
        Ok(program) => Runtime::new(program, &limits),
        Err(error) => panic!("{}", error),
    }
}

pub fn compile_error(s: &str) -> u16 {
    match pl0::compile(s) {
        Ok(program) => panic!("compiled to {} instructions", program.len()),
        Err(error) => error.code(),
    }
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

/// Runs until the program stops or asks for input. Output values are
/// printed one per line, errors as their message.
pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) => {
                s.push_str(&format!("{}\n", error));
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Output(val) => {
                s.push_str(&format!("{}\n", val));
            }
            Event::Input => {
                s.push_str("? ");
                break;
            }
        }
        prev_running = event == Event::Running;
    }
    s
}
