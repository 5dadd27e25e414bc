use std::ffi::OsStr;
use std::process::Command;

use target_lexicon::Triple;

#[derive(thiserror::Error, Debug)]
pub enum LinkerError {
    #[error("couldn't run linker: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "linker exited with code {code} and stderr output:\n{}",
        String::from_utf8_lossy(.stderr)
    )]
    Exited { code: i32, stderr: Vec<u8> },

    #[error(
        "linker terminated with stderr output:\n{}",
        String::from_utf8_lossy(.stderr)
    )]
    Terminated { stderr: Vec<u8> },
}

/// Assembles a listing and links it into a freestanding static executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Linker {
    Cc,
    /// Any program that takes cc's arguments.
    Custom(String),
}

impl Linker {
    /// Only native builds get a default linker.
    pub fn detect(target: &Triple) -> Option<Self> {
        if target == &Triple::host() {
            Some(Self::Cc)
        } else {
            None
        }
    }

    pub fn link<P0: AsRef<OsStr>, P1: AsRef<OsStr>>(
        &self,
        asm_file: P0,
        output: P1,
    ) -> Result<(), LinkerError> {
        let mut cmd = match self {
            Self::Cc => Command::new("cc"),

            Self::Custom(program) => Command::new(program),
        };

        // no libc: the listing provides `_start` itself
        cmd.args(["-nostdlib", "-static"]);

        cmd.arg("-o");
        cmd.arg(output);

        // the listing's extension isn't necessarily one cc recognises
        cmd.args(["-x", "assembler"]);
        cmd.arg(asm_file);

        let output = cmd.output()?;

        if output.status.success() {
            Ok(())
        } else {
            match output.status.code() {
                Some(code) => Err(LinkerError::Exited {
                    code,
                    stderr: output.stderr,
                }),

                None => Err(LinkerError::Terminated {
                    stderr: output.stderr,
                }),
            }
        }
    }
}
