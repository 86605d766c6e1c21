use arch::{dest::Dest, inst::Inst, reg::ADDR_MAX};

use crate::{error::Error, util::load_image};

/// Machine state: program ROM, data RAM and the A, D and PC registers.
pub struct State {
    rom: Vec<u16>,
    ram: Vec<u16>,
    a: u16,
    d: u16,
    pc: u16,
    halted: bool,
}

// Memory access
impl State {
    pub fn get(&self, addr: impl Into<u16>) -> u16 {
        self.ram[addr.into() as usize]
    }

    pub fn set(&mut self, addr: impl Into<u16>, val: u16) {
        self.ram[addr.into() as usize] = val;
    }

    pub fn a(&self) -> u16 {
        self.a
    }

    pub fn d(&self) -> u16 {
        self.d
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn rom(&self) -> &[u16] {
        &self.rom
    }

    /// Non-zero RAM cells in address order.
    pub fn ram_nonzero(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.ram
            .iter()
            .enumerate()
            .filter(|(_, val)| **val != 0)
            .map(|(addr, val)| (addr as u16, *val))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub const RAM_SIZE: usize = 0x10000;

    pub fn new() -> Self {
        State {
            rom: vec![],
            ram: vec![0; Self::RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
            halted: false,
        }
    }

    /// Replace the program and restart from address 0. RAM is kept.
    pub fn load_rom(&mut self, words: &[u16]) -> Result<(), Error> {
        if words.len() > ADDR_MAX as usize + 1 {
            return Err(Error::RomOverflow(words.len()));
        }
        self.rom = words.to_vec();
        self.a = 0;
        self.d = 0;
        self.pc = 0;
        self.halted = false;
        Ok(())
    }

    /// Load a binary image (one 16-digit word per line) or an `.asm` source.
    pub fn load_rom_file(&mut self, fname: &str) -> Result<(), Error> {
        self.load_rom(&load_image(fname)?)
    }

    /// PC ran past the program, or the program entered its halt loop.
    pub fn is_terminated(&self) -> bool {
        self.halted || self.pc as usize >= self.rom.len()
    }

    /// Execute one instruction. Returns the address and word executed.
    pub fn exec(&mut self, _time: u64) -> Result<(u16, u16), Error> {
        let pc = self.pc;
        let bin = match self.rom.get(pc as usize) {
            Some(bin) => *bin,
            None => return Ok((pc, 0)),
        };
        let inst = Inst::from_bin(bin).ok_or(Error::IllegalInstruction(pc, bin))?;

        match inst {
            Inst::A(imm) => {
                self.a = imm;
                self.pc = pc.wrapping_add(1);
            }
            Inst::C(dest, comp, jump) => {
                let addr = self.a;
                let y = match comp.reads_memory() {
                    true => self.get(addr),
                    false => self.a,
                };
                let out = comp.eval(self.d, y);
                if dest.m {
                    self.set(addr, out);
                }
                if dest.a {
                    self.a = out;
                }
                if dest.d {
                    self.d = out;
                }
                match jump {
                    Some(jump) if jump.test(out) => {
                        self.pc = addr;
                        self.halted = dest == Dest::NONE && self.is_halt_loop(pc, addr);
                    }
                    _ => self.pc = pc.wrapping_add(1),
                }
            }
        }
        Ok((pc, bin))
    }

    /// `@N` at N followed by a jump to N: nothing changes on the next pass.
    fn is_halt_loop(&self, pc: u16, target: u16) -> bool {
        target.wrapping_add(1) == pc
            && self.rom.get(target as usize) == Some(&Inst::A(target).to_bin())
    }

    /// Run until terminated or `tmax` cycles have passed. Returns the cycle count.
    pub fn run(&mut self, tmax: u64) -> Result<u64, Error> {
        let mut time = 0;
        while time < tmax && !self.is_terminated() {
            self.exec(time)?;
            time += 1;
        }
        Ok(time)
    }
}

pub fn parse_image(text: &str) -> Result<Vec<u16>, Error> {
    let mut words = vec![];
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match u16::from_str_radix(line, 2) {
            Ok(word) if line.len() == 16 => words.push(word),
            _ => return Err(Error::ParseWord(idx + 1, line.to_string())),
        }
    }
    Ok(words)
}
