mod embed;
mod verify;

use std::process::ExitCode;

use exn::ResultExt;
use takeout_config::Config;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};

/// How a command finished, as far as the shell is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// Nothing could be done at all.
    Fatal,
    /// The run finished, but some files were skipped, failed or missing.
    Partial,
}
impl Status {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Fatal => 1,
            Self::Partial => 2,
        }
    }
}
impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

pub async fn run(cli: Cli) -> Result<Status> {
    match cli.command {
        Command::Embed(args) => {
            let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
            embed::embed(args, config).await
        },
        Command::Verify(args) => verify::verify(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Status::Success, 0)]
    #[case(Status::Fatal, 1)]
    #[case(Status::Partial, 2)]
    fn test_exit_code(#[case] status: Status, #[case] expected: u8) {
        assert_eq!(status.code(), expected);
    }
}
