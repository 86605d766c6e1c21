use arch::inst::Inst;
use color_print::cformat;

use super::Hook;
use crate::model::State;

/// Prints every executed instruction with the registers it left behind.
#[derive(Debug, Default)]
pub struct Trace {
    enabled: bool,
}

impl Trace {
    pub fn arg(enabled: bool) -> Self {
        Self { enabled }
    }

    /// One trace line: cycle, address, word, decoded instruction, registers.
    pub fn line(time: u64, addr: u16, code: u16, state: &State) -> String {
        let inst = match Inst::from_bin(code) {
            Some(inst) => inst.cformat(),
            None => cformat!("<r,s>illegal</>"),
        };
        format!(
            "[{:>6}] [{:04X}] {:016b} | {:<24} | A={:04X} D={:04X}",
            time,
            addr,
            code,
            inst,
            state.a(),
            state.d()
        )
    }
}

impl Hook for Trace {
    fn init(&mut self, state: State) -> State {
        if self.enabled {
            println!(" * Trace");
        }
        state
    }

    fn exec(&mut self, time: u64, addr: u16, code: u16, state: State) -> State {
        if self.enabled {
            println!("{}", Self::line(time, addr, code, &state));
        }
        state
    }
}
