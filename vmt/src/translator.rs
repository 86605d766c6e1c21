use crate::{
    command::{Arith, Command, Line, Segment},
    error::Error,
};
use arch::{
    alu::Comp,
    asm::Asm,
    dest::Dest,
    jump::Jump,
    reg::{Ptr, Reg, STACK_BASE, TEMP_BASE, TEMP_SIZE},
};

pub const DEFAULT_ENTRY: &str = "Sys.init";
const BOOTSTRAP_SCOPE: &str = "Bootstrap";

/// Where a segment cell lives.
enum Addr {
    /// The index itself (`constant`).
    Literal(u16),
    /// Base pointer plus index.
    Based(Ptr),
    /// Fixed address or symbol.
    Direct(Asm),
}

/// Lowers bytecode to symbolic assembly.
///
/// Counters live on the instance, so feeding several files through one
/// translator keeps every synthesized label unique across the stream.
#[derive(Debug)]
pub struct Translator {
    file: String,
    function: String,
    entry: String,
    compares: usize,
    calls: usize,
    out: Vec<Asm>,
    skipped: Vec<(usize, String)>,
}

impl Translator {
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            function: file.to_string(),
            entry: DEFAULT_ENTRY.to_string(),
            compares: 0,
            calls: 1,
            out: vec![],
            skipped: vec![],
        }
    }

    pub fn with_entry(mut self, entry: &str) -> Self {
        self.entry = entry.to_string();
        self
    }

    /// Switch the static namespace to another source file.
    pub fn set_file_name(&mut self, file: &str) {
        self.file = file.to_string();
        self.function = file.to_string();
        self.calls = 1;
    }

    /// Lines skipped because they are not bytecode commands, as (1-based line, text).
    pub fn skipped(&self) -> &[(usize, String)] {
        &self.skipped
    }

    /// Translate one unit. On error nothing of the unit is kept.
    pub fn translate<S: AsRef<str>>(&mut self, lines: &[S], boot: bool) -> Result<Vec<Asm>, Error> {
        let result = self.translate_lines(lines, boot);
        let out = std::mem::take(&mut self.out);
        result.map(|()| out)
    }

    fn translate_lines<S: AsRef<str>>(&mut self, lines: &[S], boot: bool) -> Result<(), Error> {
        if boot {
            self.bootstrap();
        }
        for (idx, line) in lines.iter().enumerate() {
            match Command::parse(line.as_ref()).map_err(|e| e.at(idx))? {
                Line::Blank => {}
                Line::Unknown(_) => self.skipped.push((idx + 1, line.as_ref().trim().to_string())),
                Line::Command(cmd) => self.translate_command(&cmd).map_err(|e| e.at(idx))?,
            }
        }
        Ok(())
    }

    /// Stack base, segment sentinels, then `call <entry> 0`.
    pub fn bootstrap(&mut self) {
        self.emit([
            Asm::at(STACK_BASE),
            Asm::set(Dest::D, Comp::A),
            Asm::at(Ptr::SP),
            Asm::set(Dest::M, Comp::D),
            Asm::at(Ptr::LCL),
            Asm::set(Dest::M, Comp::NegOne),
        ]);
        for (ptr, value) in [(Ptr::ARG, 2u16), (Ptr::THIS, 3), (Ptr::THAT, 4)] {
            self.emit([
                Asm::at(value),
                Asm::set(Dest::D, Comp::NegA),
                Asm::at(ptr),
                Asm::set(Dest::M, Comp::D),
            ]);
        }

        let function = std::mem::replace(&mut self.function, BOOTSTRAP_SCOPE.to_string());
        let calls = std::mem::replace(&mut self.calls, 1);
        let entry = self.entry.clone();
        self.call(&entry, 0);
        self.function = function;
        self.calls = calls;
    }

    /// Append the code of one command to the current unit.
    pub fn translate_command(&mut self, cmd: &Command) -> Result<(), Error> {
        cmd.validate()?;
        match cmd {
            Command::Arith(op) => self.arith(*op),
            Command::Push(segment, index) => self.push(*segment, *index)?,
            Command::Pop(segment, index) => self.pop(*segment, *index)?,
            Command::Label(label) => {
                let label = self.scoped(label);
                self.emit([Asm::label(label)]);
            }
            Command::Goto(label) => {
                let label = self.scoped(label);
                self.emit([Asm::at(label), Asm::jump(Comp::Zero, Jump::JMP)]);
            }
            Command::IfGoto(label) => {
                let label = self.scoped(label);
                self.pop_d();
                self.emit([Asm::at(label), Asm::jump(Comp::D, Jump::JNE)]);
            }
            Command::Function(name, locals) => self.function(name, *locals),
            Command::Call(name, args) => self.call(name, *args),
            Command::Return => self.ret(),
        }
        Ok(())
    }

    fn emit<I: IntoIterator<Item = Asm>>(&mut self, asm: I) {
        self.out.extend(asm);
    }

    fn scoped(&self, label: &str) -> String {
        format!("{}${}", self.function, label)
    }

    fn push_d(&mut self) {
        self.emit([
            Asm::at(Ptr::SP),
            Asm::set(Dest::A, Comp::M),
            Asm::set(Dest::M, Comp::D),
            Asm::at(Ptr::SP),
            Asm::set(Dest::M, Comp::MPlusOne),
        ]);
    }

    /// Leaves the popped value in D and A pointing at its old slot.
    fn pop_d(&mut self) {
        self.emit([
            Asm::at(Ptr::SP),
            Asm::set(Dest::AM, Comp::MMinusOne),
            Asm::set(Dest::D, Comp::M),
        ]);
    }

    fn arith(&mut self, op: Arith) {
        match op {
            Arith::Neg | Arith::Not => {
                let comp = if op == Arith::Neg { Comp::NegM } else { Comp::NotM };
                self.emit([
                    Asm::at(Ptr::SP),
                    Asm::set(Dest::A, Comp::MMinusOne),
                    Asm::set(Dest::M, comp),
                ]);
            }
            Arith::Add | Arith::Sub | Arith::And | Arith::Or => {
                let comp = match op {
                    Arith::Add => Comp::DPlusM,
                    Arith::Sub => Comp::MMinusD,
                    Arith::And => Comp::DAndM,
                    _ => Comp::DOrM,
                };
                self.pop_d();
                self.emit([Asm::set(Dest::A, Comp::AMinusOne), Asm::set(Dest::M, comp)]);
            }
            Arith::Eq | Arith::Gt | Arith::Lt => {
                let jump = match op {
                    Arith::Eq => Jump::JEQ,
                    Arith::Gt => Jump::JGT,
                    _ => Jump::JLT,
                };
                self.compares += 1;
                let on_true = format!("CMP_TRUE.{}", self.compares);
                let end = format!("CMP_END.{}", self.compares);
                self.pop_d();
                self.emit([
                    Asm::set(Dest::A, Comp::AMinusOne),
                    Asm::set(Dest::D, Comp::MMinusD),
                    Asm::at(on_true.as_str()),
                    Asm::jump(Comp::D, jump),
                    Asm::at(Ptr::SP),
                    Asm::set(Dest::A, Comp::MMinusOne),
                    Asm::set(Dest::M, Comp::Zero),
                    Asm::at(end.as_str()),
                    Asm::jump(Comp::Zero, Jump::JMP),
                    Asm::label(on_true),
                    Asm::at(Ptr::SP),
                    Asm::set(Dest::A, Comp::MMinusOne),
                    Asm::set(Dest::M, Comp::NegOne),
                    Asm::label(end),
                ]);
            }
        }
    }

    fn locate(&self, segment: Segment, index: u16) -> Result<Addr, Error> {
        let out_of_range = || Error::IndexOutOfRange(segment, index);
        let addr = match segment {
            Segment::Constant => Addr::Literal(index),
            Segment::Local => Addr::Based(Ptr::LCL),
            Segment::Argument => Addr::Based(Ptr::ARG),
            Segment::This => Addr::Based(Ptr::THIS),
            Segment::That => Addr::Based(Ptr::THAT),
            Segment::Static => Addr::Direct(Asm::at(format!("{}.{}", self.file, index))),
            Segment::Temp if index < TEMP_SIZE => {
                Addr::Direct(Asm::at(TEMP_BASE.checked_add(index).ok_or_else(out_of_range)?))
            }
            Segment::Temp => return Err(out_of_range()),
            Segment::Pointer => match index {
                0 => Addr::Direct(Asm::at(Ptr::THIS)),
                1 => Addr::Direct(Asm::at(Ptr::THAT)),
                _ => return Err(out_of_range()),
            },
        };
        Ok(addr)
    }

    fn push(&mut self, segment: Segment, index: u16) -> Result<(), Error> {
        match self.locate(segment, index)? {
            Addr::Literal(value) => self.emit([Asm::at(value), Asm::set(Dest::D, Comp::A)]),
            Addr::Based(base) => self.emit([
                Asm::at(index),
                Asm::set(Dest::D, Comp::A),
                Asm::at(base),
                Asm::set(Dest::A, Comp::DPlusM),
                Asm::set(Dest::D, Comp::M),
            ]),
            Addr::Direct(addr) => self.emit([addr, Asm::set(Dest::D, Comp::M)]),
        }
        self.push_d();
        Ok(())
    }

    fn pop(&mut self, segment: Segment, index: u16) -> Result<(), Error> {
        match self.locate(segment, index)? {
            Addr::Literal(_) => return Err(Error::PopConstant),
            Addr::Based(base) => {
                self.emit([
                    Asm::at(index),
                    Asm::set(Dest::D, Comp::A),
                    Asm::at(base),
                    Asm::set(Dest::D, Comp::DPlusM),
                    Asm::at(Reg::R13),
                    Asm::set(Dest::M, Comp::D),
                ]);
                self.pop_d();
                self.emit([
                    Asm::at(Reg::R13),
                    Asm::set(Dest::A, Comp::M),
                    Asm::set(Dest::M, Comp::D),
                ]);
            }
            Addr::Direct(addr) => {
                self.pop_d();
                self.emit([addr, Asm::set(Dest::M, Comp::D)]);
            }
        }
        Ok(())
    }

    fn function(&mut self, name: &str, locals: u16) {
        self.function = name.to_string();
        self.calls = 1;
        self.emit([Asm::label(name)]);
        for _ in 0..locals {
            self.emit([
                Asm::at(Ptr::SP),
                Asm::set(Dest::A, Comp::M),
                Asm::set(Dest::M, Comp::Zero),
                Asm::at(Ptr::SP),
                Asm::set(Dest::M, Comp::MPlusOne),
            ]);
        }
    }

    fn call(&mut self, name: &str, args: u16) {
        let ret = format!("{}$ret.{}", self.function, self.calls);
        self.calls += 1;

        // 1. Save return address and caller frame
        self.emit([Asm::at(ret.as_str()), Asm::set(Dest::D, Comp::A)]);
        self.push_d();
        for ptr in [Ptr::LCL, Ptr::ARG, Ptr::THIS, Ptr::THAT] {
            self.emit([Asm::at(ptr), Asm::set(Dest::D, Comp::M)]);
            self.push_d();
        }

        // 2. ARG = SP - 5 - args, LCL = SP
        self.emit([
            Asm::at(Ptr::SP),
            Asm::set(Dest::D, Comp::M),
            Asm::at(args + 5),
            Asm::set(Dest::D, Comp::DMinusA),
            Asm::at(Ptr::ARG),
            Asm::set(Dest::M, Comp::D),
            Asm::at(Ptr::SP),
            Asm::set(Dest::D, Comp::M),
            Asm::at(Ptr::LCL),
            Asm::set(Dest::M, Comp::D),
        ]);

        // 3. Jump
        self.emit([
            Asm::at(name),
            Asm::jump(Comp::Zero, Jump::JMP),
            Asm::label(ret),
        ]);
    }

    fn ret(&mut self) {
        // R13 = frame, R14 = *(frame - 5)
        self.emit([
            Asm::at(Ptr::LCL),
            Asm::set(Dest::D, Comp::M),
            Asm::at(Reg::R13),
            Asm::set(Dest::M, Comp::D),
            Asm::at(5u16),
            Asm::set(Dest::A, Comp::DMinusA),
            Asm::set(Dest::D, Comp::M),
            Asm::at(Reg::R14),
            Asm::set(Dest::M, Comp::D),
        ]);

        // *ARG = pop(), SP = ARG + 1
        self.pop_d();
        self.emit([
            Asm::at(Ptr::ARG),
            Asm::set(Dest::A, Comp::M),
            Asm::set(Dest::M, Comp::D),
            Asm::at(Ptr::ARG),
            Asm::set(Dest::D, Comp::MPlusOne),
            Asm::at(Ptr::SP),
            Asm::set(Dest::M, Comp::D),
        ]);

        for ptr in [Ptr::THAT, Ptr::THIS, Ptr::ARG, Ptr::LCL] {
            self.emit([
                Asm::at(Reg::R13),
                Asm::set(Dest::AM, Comp::MMinusOne),
                Asm::set(Dest::D, Comp::M),
                Asm::at(ptr),
                Asm::set(Dest::M, Comp::D),
            ]);
        }

        self.emit([
            Asm::at(Reg::R14),
            Asm::set(Dest::A, Comp::M),
            Asm::jump(Comp::Zero, Jump::JMP),
        ]);
    }
}

/// Translate one file's worth of bytecode with a fresh translator.
pub fn translate<S: AsRef<str>>(file: &str, lines: &[S], boot: bool) -> Result<Vec<Asm>, Error> {
    Translator::new(file).translate(lines, boot)
}
