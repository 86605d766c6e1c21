pub mod dump;
pub mod trace;

use crate::model::State;

/// Side effects run around the main loop, threaded through the machine state.
pub trait Hook {
    fn init(&mut self, state: State) -> State {
        state
    }
    fn exec(&mut self, time: u64, addr: u16, code: u16, state: State) -> State;
}
