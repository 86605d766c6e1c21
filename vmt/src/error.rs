use color_print::cprintln;
use thiserror::Error;

use crate::command::Segment;

#[derive(Error, Debug)]
pub enum Error {
    #[error("More argument required for `{0}`")]
    MissingArgument(String),

    #[error("Cannot parse `{0}` as {1}")]
    ParseArgument(String, String),

    #[error("Unknown segment: `{0}`")]
    UnknownSegment(String),

    #[error("Invalid name: `{0}`")]
    InvalidName(String),

    #[error("Cannot pop to constant segment")]
    PopConstant,

    #[error("Index {1} out of range for {0} segment")]
    IndexOutOfRange(Segment, u16),

    #[error("Count {0} out of range")]
    CountOutOfRange(u16),

    /// Wraps an error with its 1-based source line number.
    #[error("line {0}: {1}")]
    Line(usize, Box<Error>),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("No .vm file in directory: {0}")]
    NoInput(String),

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
