use crate::domain::HashAlgorithm;
use crate::util::{is_hex_digest, to_lower_case};
use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "sumcheck")]
#[command(about = "Compute and verify file hash sums")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Paths of the files to perform hash sums on")]
    pub files: Vec<PathBuf>,

    #[arg(long, alias = "md5sum", help = "Calculate the MD5 hash sum")]
    pub md5: bool,

    #[arg(long, alias = "sha1sum", help = "Calculate the SHA1 hash sum")]
    pub sha1: bool,

    #[arg(long, alias = "sha256sum", help = "Calculate the SHA256 hash sum")]
    pub sha256: bool,

    #[arg(long, alias = "sha384sum", help = "Calculate the SHA384 hash sum")]
    pub sha384: bool,

    #[arg(long, alias = "sha512sum", help = "Calculate the SHA512 hash sum")]
    pub sha512: bool,

    #[arg(
        short = 'P',
        long = "progress",
        help = "Show a progress bar while calculating hash sums"
    )]
    pub progress: bool,

    #[arg(
        short = 'H',
        long = "hide-invalid",
        help = "Hide invalid files instead of listing them"
    )]
    pub hide_invalid: bool,

    #[arg(
        short = 'c',
        long = "check",
        value_name = "DIGEST",
        help = "Compare each file's hash sum against this previously recorded digest"
    )]
    pub check: Option<String>,

    #[arg(
        short = 'f',
        long = "format",
        help = "Output format",
        value_enum,
        default_value = "text"
    )]
    pub output_format: OutputFormat,

    #[arg(
        short = 'o',
        long = "output",
        help = "Output file path (stdout if not specified)"
    )]
    pub output_file: Option<PathBuf>,
}

impl Cli {
    /// Exactly one algorithm flag must be set; zero or several is a user
    /// error reported before any hashing occurs.
    pub fn selected_algorithm(&self) -> Result<HashAlgorithm> {
        let flags = [
            (self.md5, HashAlgorithm::Md5),
            (self.sha1, HashAlgorithm::Sha1),
            (self.sha256, HashAlgorithm::Sha256),
            (self.sha384, HashAlgorithm::Sha384),
            (self.sha512, HashAlgorithm::Sha512),
        ];

        let mut selected = None;
        for (used, algorithm) in flags {
            if !used {
                continue;
            }
            if selected.is_some() {
                bail!("you can choose only one hash type each time");
            }
            selected = Some(algorithm);
        }

        match selected {
            Some(algorithm) => Ok(algorithm),
            None => bail!("must specify the type of hash sum"),
        }
    }

    pub fn input_files(&self) -> Result<&[PathBuf]> {
        if self.files.is_empty() {
            bail!("no files were provided");
        }
        Ok(&self.files)
    }

    /// The recorded digest for `--check`, lowercased. Digests are compared
    /// case-sensitively against the lowercase hex we compute, so normalize
    /// user input here.
    pub fn normalized_check(&self) -> Result<Option<String>> {
        match &self.check {
            None => Ok(None),
            Some(digest) => {
                let digest = to_lower_case(digest.trim());
                if !is_hex_digest(&digest) {
                    bail!("not a valid hex digest: {}", digest);
                }
                Ok(Some(digest))
            }
        }
    }
}
