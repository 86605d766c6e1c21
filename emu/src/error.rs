use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Illegal instruction {1:016b} at {0:04X}")]
    IllegalInstruction(u16, u16),

    #[error("Line {0}: not a binary word: `{1}`")]
    ParseWord(usize, String),

    #[error("Program too large: {0} words")]
    RomOverflow(usize),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to assemble {0}: {1}")]
    Assemble(String, #[source] hkasm::Error),

    #[error("Failed to parse config: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to serialize RAM: {0}")]
    RamOut(String, #[source] serde_yaml::Error),
}
