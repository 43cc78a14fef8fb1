//! Small CLI around the credential codec. With no arguments it runs the
//! derive-then-verify demonstration; the other commands expose each operation.

use std::env;
use std::process::ExitCode;

use pbkdf2_credentials::config::load_config;
use pbkdf2_credentials::{CodecParams, CredentialCodec, PasswordError};
use tracing::{error, info};

const CONFIG_ENV: &str = "PBKDF2_CONFIG";

fn print_usage() {
    eprintln!("Commands:\n  demo\n  hash-password <plaintext>\n  verify-password <plaintext> <record>\n\nSet {CONFIG_ENV} to a JSON file to override iterations, saltLength, or keyLength.");
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn build_codec() -> Option<CredentialCodec> {
    let Ok(path) = env::var(CONFIG_ENV) else {
        return Some(CredentialCodec::new(CodecParams::default()));
    };
    match load_config(&path).and_then(|cfg| cfg.params()) {
        Ok(params) => {
            info!(path = %path, iterations = params.iterations().get(), "loaded codec config");
            Some(CredentialCodec::new(params))
        }
        Err(err) => {
            error!(path = %path, "config load failed: {err}");
            None
        }
    }
}

fn run_demo(codec: &CredentialCodec) -> Result<(), PasswordError> {
    let original_password = "password";
    let secured = codec.derive(original_password)?;
    info!("{secured}");

    let matched = codec.verify(original_password, &secured)?;
    info!("Should be true: {matched}");

    let matched = codec.verify("wr0ngPassw0rd", &secured)?;
    info!("Should be false: {matched}");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let Some(codec) = build_codec() else {
        return ExitCode::FAILURE;
    };

    let command = args.get(1).map(String::as_str).unwrap_or("demo");
    let outcome = match command {
        "demo" => {
            if args.len() > 2 {
                print_usage();
                return ExitCode::FAILURE;
            }
            run_demo(&codec)
        }
        "hash-password" => {
            if args.len() != 3 {
                print_usage();
                return ExitCode::FAILURE;
            }
            codec.derive(&args[2]).map(|record| println!("{record}"))
        }
        "verify-password" => {
            if args.len() != 4 {
                print_usage();
                return ExitCode::FAILURE;
            }
            codec
                .verify(&args[2], &args[3])
                .map(|matches| println!("{}", if matches { "match" } else { "no-match" }))
        }
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{command} failed: {err}");
            ExitCode::FAILURE
        }
    }
}
