//! Sign files and verify signature bundles from the command line.
//!
//! `gostec sign -f document.txt -s document.sig` hashes the file with
//! Streebog-512, signs the digest with a freshly generated key pair over
//! the standard domain parameters, and writes the self-describing
//! signature bundle. `gostec verify -f document.txt -s document.sig`
//! checks the bundle against the file and reports accept or reject.
//!
//! Exit codes: 0 when signing succeeds or the signature is accepted, 1
//! when the signature is rejected or the bundle is malformed, 2 for usage
//! errors such as a missing file or no action.

use clap::{Arg, ArgAction, Command};
use gostec_cryptography::{params, sign_message, Bundle};
use rand::rngs::OsRng;
use std::{fs, path::PathBuf, process::ExitCode};
use tracing::{debug, error, info};

/// Returns the version of the crate.
pub const fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Flag for verbose output
const VERBOSE_FLAG: &str = "verbose";

/// Path to the file being signed or verified
const FILE_ARG: &str = "file";

/// Path to the signature bundle
const SIGNATURE_ARG: &str = "signature";

const SIGN_CMD: &str = "sign";
const VERIFY_CMD: &str = "verify";

fn file_arg() -> Arg {
    Arg::new(FILE_ARG)
        .short('f')
        .long(FILE_ARG)
        .required(true)
        .help("Path to the file whose content is signed or verified")
        .value_parser(clap::value_parser!(PathBuf))
}

fn signature_arg() -> Arg {
    Arg::new(SIGNATURE_ARG)
        .short('s')
        .long(SIGNATURE_ARG)
        .required(true)
        .help("Path to the signature bundle")
        .value_parser(clap::value_parser!(PathBuf))
}

fn main() -> ExitCode {
    // Define application
    let matches = Command::new("gostec")
        .version(crate_version())
        .about("Sign files and verify signature bundles with GOST-style elliptic-curve signatures.")
        .arg(
            Arg::new(VERBOSE_FLAG)
                .short('v')
                .long(VERBOSE_FLAG)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new(SIGN_CMD)
                .aliases(["s", "sig", "signing"])
                .about("Sign a file's content and write the signature bundle.")
                .arg(file_arg())
                .arg(signature_arg()),
        )
        .subcommand(
            Command::new(VERIFY_CMD)
                .aliases(["v", "ver", "verification"])
                .about("Verify a signature bundle against a file's content.")
                .arg(file_arg())
                .arg(signature_arg()),
        )
        .get_matches();

    // Create logger
    let level = if matches.get_flag(VERBOSE_FLAG) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // Parse subcommands
    match matches.subcommand() {
        Some((SIGN_CMD, args)) => {
            let file = required_path(args, FILE_ARG);
            let signature = required_path(args, SIGNATURE_ARG);
            sign(file, signature)
        }
        Some((VERIFY_CMD, args)) => {
            let file = required_path(args, FILE_ARG);
            let signature = required_path(args, SIGNATURE_ARG);
            verify(file, signature)
        }
        Some((cmd, _)) => {
            error!(cmd, "invalid action");
            ExitCode::from(2)
        }
        None => {
            error!("no action selected (expected `sign` or `verify`)");
            ExitCode::from(2)
        }
    }
}

fn required_path<'a>(args: &'a clap::ArgMatches, name: &str) -> &'a PathBuf {
    // Marked required in the arg definition, so clap has already enforced
    // presence.
    args.get_one::<PathBuf>(name).expect("required argument")
}

fn sign(file: &PathBuf, signature: &PathBuf) -> ExitCode {
    let message = match fs::read(file) {
        Ok(message) => message,
        Err(err) => {
            error!(?file, %err, "cannot read input file");
            return ExitCode::from(2);
        }
    };

    let domain = params::standard();
    let bundle = match sign_message(&domain, &message, &mut OsRng) {
        Ok(bundle) => bundle,
        Err(err) => {
            error!(%err, "signing failed");
            return ExitCode::FAILURE;
        }
    };
    if tracing::enabled!(tracing::Level::DEBUG) {
        if let Ok(decoded) = Bundle::decode(&bundle) {
            debug!("signature bundle:\n{decoded}");
        }
    }

    if let Err(err) = fs::write(signature, &bundle) {
        error!(?signature, %err, "cannot write signature bundle");
        return ExitCode::from(2);
    }
    info!(?file, ?signature, "signature bundle written");
    ExitCode::SUCCESS
}

fn verify(file: &PathBuf, signature: &PathBuf) -> ExitCode {
    let message = match fs::read(file) {
        Ok(message) => message,
        Err(err) => {
            error!(?file, %err, "cannot read input file");
            return ExitCode::from(2);
        }
    };
    let raw = match fs::read(signature) {
        Ok(raw) => raw,
        Err(err) => {
            error!(?signature, %err, "cannot read signature bundle");
            return ExitCode::from(2);
        }
    };

    let bundle = match Bundle::decode(&raw) {
        Ok(bundle) => bundle,
        Err(err) => {
            error!(%err, "signature bundle rejected");
            return ExitCode::FAILURE;
        }
    };
    debug!("signature bundle:\n{bundle}");

    if bundle.verify(&message) {
        info!(?file, "the signature is genuine");
        ExitCode::SUCCESS
    } else {
        error!(?file, "the signature is incorrect");
        ExitCode::FAILURE
    }
}
