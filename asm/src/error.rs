use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown computation: `{0}`")]
    UnknownComp(String),

    #[error("Unknown jump: `{0}`")]
    UnknownJump(String),

    #[error("Unknown destination: `{0}`")]
    UnknownDest(String),

    #[error("Invalid symbol: `{0}`")]
    InvalidSymbol(String),

    #[error("Invalid label: `{0}`")]
    InvalidLabel(String),

    #[error("Address out of range: `{0}` (max 32767)")]
    AddressOutOfRange(String),

    #[error("Address space overflow: cannot allocate `{0}`")]
    AddressSpaceOverflow(String),

    #[error("Program too large: {0} instructions (max 32768)")]
    RomOverflow(usize),

    #[error("Undefined symbol: `{0}`")]
    UndefinedSymbol(String),

    /// Wraps an error with its 1-based source line number.
    #[error("line {0}: {1}")]
    Line(usize, Box<Error>),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Attach the source line, given as a 0-based index.
    pub fn at(self, line_idx: usize) -> Self {
        match self {
            Error::Line(..) => self,
            err => Error::Line(line_idx + 1, Box::new(err)),
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, lines: &[String]) {
        match self {
            Error::Line(line_num, inner) => {
                cprintln!("<red,bold>error</>: {}", inner);
                cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
                cprintln!("      <blue>|</>");
                let line_content = lines
                    .get(line_num.saturating_sub(1))
                    .map(|s| s.as_str())
                    .unwrap_or("");
                cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
                cprintln!("      <blue>|</>");
            }
            err => {
                cprintln!("<red,bold>error</>: {}", err);
                cprintln!("     <blue>--></> <underline>{}</>", file);
            }
        }
    }
}
