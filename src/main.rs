//! bcrypt_rust - hash a password, or check one against a stored hash.

use std::env::{self, args as args_fn};
use std::io::{self, Write};
use std::process::ExitCode;

use bcrypt_rust::{BCrypt, BCryptError, CostFactor, Hash, Password, Version};
use log::{error, info, warn};
use rpassword::read_password;

const COST_ENV: &str = "BCRYPT_COST";
const VARIANT_ENV: &str = "BCRYPT_VARIANT";
const USAGE_MSG: &str = "Usage:
    bcrypt_rust [hash] [-c <cost>] [--variant <2a|2b>] [-v ...]
    bcrypt_rust verify <hash> [-v ...]";
const OPTIONS_ARGS_MSG: &str = "Optional arguments:
    -c --cost COST          Work factor, 4-31. Default is $BCRYPT_COST or 10.
    --variant VARIANT       Version label, 2a or 2b. Default is $BCRYPT_VARIANT or 2b.
    -v --verbose            More logging. Repeat for trace output.
    -h --help               Show this message.";

enum Mode {
    Hash,
    Verify(String),
}

struct CliArgs {
    mode: Mode,
    cost: CostFactor,
    version: Version,
    verbose: u8,
}

impl CliArgs {
    /// Defaults, overridden by the environment.
    fn from_env() -> Result<Self, String> {
        let mut cliargs = CliArgs {
            mode: Mode::Hash,
            cost: CostFactor::default(),
            version: Version::default(),
            verbose: 0,
        };
        if let Ok(cost) = env::var(COST_ENV) {
            cliargs.set_cost(&cost)?;
        }
        if let Ok(variant) = env::var(VARIANT_ENV) {
            cliargs.version = variant.trim().parse().map_err(|e: BCryptError| e.to_string())?;
        }
        Ok(cliargs)
    }

    fn set_cost(&mut self, cost: &str) -> Result<(), String> {
        let value = cost
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("cost must be a number, but was {cost:?}"))?;
        self.cost = CostFactor::new(value).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn parse(args: &[String]) -> Result<Self, String> {
        let mut cliargs = CliArgs::from_env()?;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "hash" if i == 1 => cliargs.mode = Mode::Hash,
                "verify" if i == 1 => {
                    i += 1;
                    let hash = args.get(i).ok_or("verify needs a hash")?;
                    cliargs.mode = Mode::Verify(hash.clone());
                }
                "-c" | "--cost" => {
                    i += 1;
                    let cost = args.get(i).ok_or("--cost needs a value")?;
                    cliargs.set_cost(cost)?;
                }
                "--variant" => {
                    i += 1;
                    let variant = args.get(i).ok_or("--variant needs a value")?;
                    cliargs.version = variant.parse().map_err(|e: BCryptError| e.to_string())?;
                }
                "-v" | "--verbose" => cliargs.verbose = cliargs.verbose.saturating_add(1),
                other => return Err(format!("unknown argument: {other}")),
            }
            i += 1;
        }

        Ok(cliargs)
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Builds the logger. `RUST_LOG` wins over the verbosity flags.
fn build_logger(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .init();
}

fn prompt_password(prompt: &str) -> io::Result<Password> {
    // Read password securely (without displaying it)
    eprint!("{prompt}");
    io::stderr().flush()?;
    let password = read_password()?;

    let password = Password::new(password)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    if !password.is_nfc() {
        warn!("Password is not in Unicode NFC; it is hashed byte for byte as typed");
    }
    Ok(password)
}

fn run(cliargs: CliArgs) -> Result<bool, Box<dyn std::error::Error>> {
    match cliargs.mode {
        Mode::Hash => {
            let password = prompt_password("Enter password to hash: ")?;
            let bcrypt = BCrypt::new(cliargs.version, cliargs.cost);
            info!("Hashing with cost {} ({} rounds)", cliargs.cost, cliargs.cost.rounds());
            let hashed = bcrypt.hash(&password);
            println!("{hashed}");
            Ok(true)
        }
        Mode::Verify(hash) => {
            let hash: Hash = hash.parse()?;
            let password = prompt_password("Enter password to verify: ")?;
            let is_valid = hash.verify(&password);
            println!("Password verification: {}", if is_valid { "success" } else { "failed" });
            Ok(is_valid)
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = args_fn().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE_MSG}\n\n{OPTIONS_ARGS_MSG}");
        return ExitCode::SUCCESS;
    }

    let cliargs = match CliArgs::parse(&args) {
        Ok(cliargs) => cliargs,
        Err(e) => {
            eprintln!("{e}\n{USAGE_MSG}");
            return ExitCode::from(2);
        }
    };
    build_logger(cliargs.log_level());

    match run(cliargs) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("bcrypt_rust")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_hash_options() {
        let cliargs = CliArgs::parse(&args(&["-c", "12", "--variant", "2a", "-v", "-v"])).unwrap();
        assert!(matches!(cliargs.mode, Mode::Hash));
        assert_eq!(cliargs.cost.value(), 12);
        assert_eq!(cliargs.version, Version::TwoA);
        assert_eq!(cliargs.log_level(), "debug");
    }

    #[test]
    fn parses_verify_mode() {
        let hash = "$2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";
        let cliargs = CliArgs::parse(&args(&["verify", hash])).unwrap();
        assert!(matches!(cliargs.mode, Mode::Verify(ref h) if h == hash));
    }

    #[test]
    fn rejects_bad_options() {
        assert!(CliArgs::parse(&args(&["-c", "3"])).is_err());
        assert!(CliArgs::parse(&args(&["-c", "ten"])).is_err());
        assert!(CliArgs::parse(&args(&["--variant", "2y"])).is_err());
        assert!(CliArgs::parse(&args(&["verify"])).is_err());
        assert!(CliArgs::parse(&args(&["--frobnicate"])).is_err());
    }
}
