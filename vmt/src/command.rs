use strum::{Display, EnumString};

use crate::error::Error;
use arch::reg::{ADDR_MAX, TEMP_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Arith {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Static,
    Temp,
    Pointer,
}

/// One bytecode command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Arith(Arith),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u16),
    Call(String, u16),
    Return,
}

/// Outcome of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    /// First word is not a bytecode command.
    Unknown(String),
    Command(Command),
}

impl Command {
    pub fn parse(raw: &str) -> Result<Line, Error> {
        let code = match raw.split_once("//") {
            Some((code, _)) => code,
            None => raw,
        };
        let words: Vec<&str> = code.split_whitespace().collect();
        let Some((op, args)) = words.split_first() else {
            return Ok(Line::Blank);
        };

        macro_rules! arg {
            ($index:expr) => {
                *args
                    .get($index)
                    .ok_or_else(|| Error::MissingArgument(op.to_string()))?
            };
        }

        macro_rules! num {
            ($index:expr) => {{
                let arg = arg!($index);
                arg.parse::<u16>()
                    .map_err(|_| Error::ParseArgument(arg.to_string(), "index".to_string()))?
            }};
        }

        macro_rules! name {
            ($index:expr) => {{
                let arg = arg!($index);
                if !arch::asm::is_symbol(arg) {
                    return Err(Error::InvalidName(arg.to_string()));
                }
                arg.to_string()
            }};
        }

        macro_rules! segment {
            ($index:expr) => {{
                let arg = arg!($index);
                arg.parse::<Segment>()
                    .map_err(|_| Error::UnknownSegment(arg.to_string()))?
            }};
        }

        let cmd = match *op {
            "push" => Command::Push(segment!(0), num!(1)),
            "pop" => Command::Pop(segment!(0), num!(1)),
            "label" => Command::Label(name!(0)),
            "goto" => Command::Goto(name!(0)),
            "if-goto" => Command::IfGoto(name!(0)),
            "function" => Command::Function(name!(0), num!(1)),
            "call" => Command::Call(name!(0), num!(1)),
            "return" => Command::Return,
            op => match op.parse::<Arith>() {
                Ok(arith) => Command::Arith(arith),
                Err(_) => return Ok(Line::Unknown(op.to_string())),
            },
        };
        cmd.validate()?;
        Ok(Line::Command(cmd))
    }

    /// Check segment indices and counts against the machine's 15-bit addresses.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Command::Pop(Segment::Constant, _) => Err(Error::PopConstant),
            Command::Push(segment, index) | Command::Pop(segment, index) => {
                let limit = match segment {
                    Segment::Temp => TEMP_SIZE - 1,
                    Segment::Pointer => 1,
                    _ => ADDR_MAX,
                };
                match *index > limit {
                    true => Err(Error::IndexOutOfRange(*segment, *index)),
                    false => Ok(()),
                }
            }
            Command::Function(_, count) if *count > ADDR_MAX => Err(Error::CountOutOfRange(*count)),
            // ARG = SP - 5 - n needs `n + 5` as an address literal
            Command::Call(_, count) if *count > ADDR_MAX - 5 => Err(Error::CountOutOfRange(*count)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_parse {
        ($($name:ident: $line:expr => $cmd:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(Command::parse($line).unwrap(), Line::Command($cmd));
                }
            )*
        }
    }

    test_parse! {
        test_add: "add" => Command::Arith(Arith::Add),
        test_not: "  not  // bitwise" => Command::Arith(Arith::Not),
        test_push: "push constant 7" => Command::Push(Segment::Constant, 7),
        test_pop: "pop local 2" => Command::Pop(Segment::Local, 2),
        test_pointer: "push pointer 1" => Command::Push(Segment::Pointer, 1),
        test_label: "label LOOP_START" => Command::Label("LOOP_START".to_string()),
        test_goto: "goto END" => Command::Goto("END".to_string()),
        test_if_goto: "if-goto LOOP" => Command::IfGoto("LOOP".to_string()),
        test_function: "function Main.fib 2" => Command::Function("Main.fib".to_string(), 2),
        test_call: "call Main.fib 1   // recurse" => Command::Call("Main.fib".to_string(), 1),
        test_return: "return" => Command::Return,
    }

    #[test]
    fn blank_and_unknown() {
        assert_eq!(Command::parse("").unwrap(), Line::Blank);
        assert_eq!(Command::parse("   // comment").unwrap(), Line::Blank);
        assert_eq!(
            Command::parse("mul").unwrap(),
            Line::Unknown("mul".to_string())
        );
    }

    #[test]
    fn malformed() {
        assert!(matches!(Command::parse("push constant"), Err(Error::MissingArgument(_))));
        assert!(matches!(Command::parse("push constant x"), Err(Error::ParseArgument(..))));
        assert!(matches!(Command::parse("push heap 0"), Err(Error::UnknownSegment(_))));
        assert!(matches!(Command::parse("pop constant 0"), Err(Error::PopConstant)));
        assert!(matches!(Command::parse("pop temp 8"), Err(Error::IndexOutOfRange(..))));
        assert!(matches!(Command::parse("push pointer 2"), Err(Error::IndexOutOfRange(..))));
        assert!(matches!(Command::parse("function f"), Err(Error::MissingArgument(_))));
        assert!(matches!(Command::parse("push constant 32768"), Err(Error::IndexOutOfRange(..))));
        assert!(matches!(Command::parse("goto 1st"), Err(Error::InvalidName(_))));
        assert!(matches!(Command::parse("push local 40000"), Err(Error::IndexOutOfRange(..))));
        assert!(matches!(Command::parse("pop static 32768"), Err(Error::IndexOutOfRange(..))));
        assert!(matches!(Command::parse("call f 32763"), Err(Error::CountOutOfRange(_))));
    }

    #[test]
    fn validate_typed_commands() {
        assert!(matches!(
            Command::Pop(Segment::Constant, 3).validate(),
            Err(Error::PopConstant)
        ));
        assert!(matches!(
            Command::Push(Segment::Temp, 65535).validate(),
            Err(Error::IndexOutOfRange(Segment::Temp, 65535))
        ));
        assert!(matches!(
            Command::Pop(Segment::Pointer, 2).validate(),
            Err(Error::IndexOutOfRange(Segment::Pointer, 2))
        ));
        assert!(Command::Push(Segment::Temp, 7).validate().is_ok());
        assert!(Command::Push(Segment::Local, 32767).validate().is_ok());
        assert!(Command::Call("f".to_string(), 32762).validate().is_ok());
    }
}
