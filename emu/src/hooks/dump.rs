use arch::reg::{Ptr, STACK_BASE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use crate::{error::Error, model::State};

use super::Hook;

/// Prints registers and RAM when PC reaches configured addresses.
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    list: List,
}

/// `pc: { stack: bool, ram: [addr, ...] }`
#[derive(Debug, Default, Serialize, Deserialize)]
struct List(HashMap<u16, Config>);

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    stack: bool,
    #[serde(default)]
    ram: Vec<u16>,
}

impl Dump {
    pub fn arg(file: Option<String>, all: bool) -> Result<Self, Error> {
        let list = match &file {
            Some(fname) => {
                let reader = File::open(fname).map_err(|e| Error::FileOpen(fname.clone(), e))?;
                serde_yaml::from_reader(BufReader::new(reader))
                    .map_err(|e| Error::Config(fname.clone(), e))?
            }
            None => List::default(),
        };
        Ok(Self { file, all, list })
    }

    pub fn from_yaml(text: &str, all: bool) -> Result<Self, Error> {
        let list = serde_yaml::from_str(text).map_err(|e| Error::Config("<str>".into(), e))?;
        Ok(Self {
            file: None,
            all,
            list,
        })
    }

    fn get(&self, pc: u16) -> Option<&Config> {
        self.list.0.get(&pc)
    }
}

impl Hook for Dump {
    fn init(&mut self, state: State) -> State {
        if self.all {
            println!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
        state
    }

    fn exec(&mut self, _time: u64, addr: u16, _code: u16, cpu: State) -> State {
        if let Some(cfg) = self.get(addr) {
            self.print_reg(&cpu);
            if cfg.stack {
                self.print_stack(&cpu);
            }
            self.print_ram(&cpu, &cfg.ram);
        } else if self.all {
            self.print_reg(&cpu);
        }
        cpu
    }
}

impl Dump {
    fn print_reg(&self, cpu: &State) {
        println!(" +-----------+-----------+-----------+");
        println!(
            " |  pc: {:0>4X} |  sp: {:0>4X} | arg: {:0>4X} |",
            cpu.pc(),
            cpu.get(Ptr::SP),
            cpu.get(Ptr::ARG)
        );
        println!(
            " |   a: {:0>4X} | lcl: {:0>4X} | this: {:0>4X}|",
            cpu.a(),
            cpu.get(Ptr::LCL),
            cpu.get(Ptr::THIS)
        );
        println!(
            " |   d: {:0>4X} |           | that: {:0>4X}|",
            cpu.d(),
            cpu.get(Ptr::THAT)
        );
        println!(" +-----------+-----------+-----------+");
    }

    fn print_stack(&self, cpu: &State) {
        let sp = cpu.get(Ptr::SP);
        for addr in STACK_BASE..sp.max(STACK_BASE) {
            println!(" | {:0>4X} : {:0>4X}                      |", addr, cpu.get(addr));
        }
        println!(" +-----------------------------------+");
    }

    fn print_ram(&self, cpu: &State, addrs: &[u16]) {
        for addr in addrs {
            println!(" | {:0>4X} : {:0>4X}                      |", addr, cpu.get(*addr));
        }
        println!(" +-----------------------------------+");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config() {
        let dump = Dump::from_yaml("12:\n  stack: true\n  ram: [16, 17]\n40: {}\n", false).unwrap();
        let cfg = dump.get(12).unwrap();
        assert!(cfg.stack);
        assert_eq!(cfg.ram, [16, 17]);
        let cfg = dump.get(40).unwrap();
        assert!(!cfg.stack);
        assert!(cfg.ram.is_empty());
        assert!(dump.get(0).is_none());
    }

    #[test]
    fn bad_config() {
        assert!(matches!(Dump::from_yaml("12: [1, 2", false), Err(Error::Config(..))));
    }
}
