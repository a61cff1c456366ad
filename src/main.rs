use std::io::{self, Read as _};
use std::time::{Duration, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};

use signet::keys::{generate_secret_key, load_key_file, parse_hex_key, DEFAULT_KEY_LEN};
use signet::token::{inspect, unix_now};
use signet::{HashAlgorithm, SecretKey, Serializer, Signer, SignerError, TimedSigner};

/// Exit status for a well-formed token past its deadline.
const EXIT_EXPIRED: i32 = 2;

/// 9999-12-31T23:59:59Z, the last instant RFC 3339 formatting can show.
const MAX_RFC3339_SECS: u64 = 253_402_300_799;

#[derive(Parser)]
#[command(name = "signet", about = "Tamper-evident signed tokens")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct KeyArgs {
    /// Key file path. Raw key bytes, or hex with --hex-key.
    /// Takes precedence over --key-hex.
    #[arg(short, long)]
    key: Option<String>,

    /// Interpret the key file as hex-encoded.
    #[arg(long, default_value_t = false)]
    hex_key: bool,

    /// Hex-encoded key given directly.
    #[arg(long, env = "SIGNET_KEY", hide_env_values = true)]
    key_hex: Option<String>,

    /// Hash algorithm: sha1, sha256, sha384 or sha512.
    #[arg(short, long, default_value_t = HashAlgorithm::Sha1)]
    algorithm: HashAlgorithm,
}

#[derive(Subcommand)]
enum Command {
    /// Sign a string. With --ttl the token carries an expiration deadline.
    Sign {
        #[command(flatten)]
        key: KeyArgs,

        /// Token validity duration (e.g. "72h", "30m"). Omit for no expiry.
        #[arg(short, long, value_parser = humantime::parse_duration)]
        ttl: Option<Duration>,

        /// Payload to sign. If omitted, reads from stdin.
        payload: Option<String>,
    },

    /// Verify a signed string and print its payload.
    Verify {
        #[command(flatten)]
        key: KeyArgs,

        /// The token carries a deadline (signed with --ttl).
        #[arg(long, default_value_t = false)]
        timed: bool,

        /// Token to verify. If omitted, reads from stdin.
        token: Option<String>,
    },

    /// Sign a JSON document with a deadline and optional salt.
    Dump {
        #[command(flatten)]
        key: KeyArgs,

        /// Salt mixed into the MAC.
        #[arg(short, long, default_value = "")]
        salt: String,

        /// Token validity duration.
        #[arg(short, long, default_value = "72h", value_parser = humantime::parse_duration)]
        ttl: Duration,

        /// JSON document. If omitted, reads from stdin.
        value: Option<String>,
    },

    /// Verify a token produced by `dump` and print its JSON document.
    Load {
        #[command(flatten)]
        key: KeyArgs,

        /// Salt the token was dumped with.
        #[arg(short, long, default_value = "")]
        salt: String,

        /// Token to load. If omitted, reads from stdin.
        token: Option<String>,
    },

    /// Show the fields of a token without verifying it.
    Inspect {
        /// Token to inspect. If omitted, reads from stdin.
        token: Option<String>,
    },

    /// Generate a random secret key, printed as hex.
    GenerateKey {
        /// Key length in bytes.
        #[arg(short, long, default_value_t = DEFAULT_KEY_LEN)]
        length: usize,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Sign { key, ttl, payload } => cmd_sign(&key, ttl, payload),
        Command::Verify { key, timed, token } => cmd_verify(&key, timed, token),
        Command::Dump {
            key,
            salt,
            ttl,
            value,
        } => cmd_dump(&key, salt, ttl, value),
        Command::Load { key, salt, token } => cmd_load(&key, salt, token),
        Command::Inspect { token } => cmd_inspect(token),
        Command::GenerateKey { length } => cmd_generate_key(length),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        let expired = e
            .downcast_ref::<SignerError>()
            .is_some_and(SignerError::is_expired);
        std::process::exit(if expired { EXIT_EXPIRED } else { 1 });
    }
}

fn cmd_sign(
    key_args: &KeyArgs,
    ttl: Option<Duration>,
    payload_arg: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = read_key(key_args)?;
    let payload = read_input(payload_arg)?;

    let token = match ttl {
        Some(ttl) => {
            log::debug!(
                "signing {} bytes with {} for {ttl:?}",
                payload.len(),
                key_args.algorithm
            );
            TimedSigner::with_algorithm(key, key_args.algorithm).sign(&payload, ttl)?
        }
        None => {
            log::debug!("signing {} bytes with {}", payload.len(), key_args.algorithm);
            Signer::with_algorithm(key, key_args.algorithm).sign(&payload)?
        }
    };

    println!("{token}");
    Ok(())
}

fn cmd_verify(
    key_args: &KeyArgs,
    timed: bool,
    token_arg: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = read_key(key_args)?;
    let token = read_input(token_arg)?;

    let payload = if timed {
        TimedSigner::with_algorithm(key, key_args.algorithm).verify(&token)?
    } else {
        Signer::with_algorithm(key, key_args.algorithm).verify(&token)?
    };
    log::info!("token verified with {}", key_args.algorithm);

    let output = serde_json::json!({
        "valid": true,
        "payload": payload,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_dump(
    key_args: &KeyArgs,
    salt: String,
    ttl: Duration,
    value_arg: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = read_key(key_args)?;
    let input = read_input(value_arg)?;
    let value: serde_json::Value =
        serde_json::from_str(&input).map_err(|e| format!("value is not valid JSON: {e}"))?;

    log::debug!("dumping JSON document with {} for {ttl:?}", key_args.algorithm);
    let token = Serializer::with_algorithm(key, key_args.algorithm)
        .with_salt(salt)
        .dump(&value, ttl)?;

    println!("{token}");
    Ok(())
}

fn cmd_load(
    key_args: &KeyArgs,
    salt: String,
    token_arg: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = read_key(key_args)?;
    let token = read_input(token_arg)?;

    let value: serde_json::Value = Serializer::with_algorithm(key, key_args.algorithm)
        .with_salt(salt)
        .load(&token)?;
    log::info!("token loaded with {}", key_args.algorithm);

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn cmd_inspect(token_arg: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let token = read_input(token_arg)?;
    let parts = inspect(&token)?;

    let deadline_utc = parts.deadline.and_then(|ts| {
        let secs = u64::try_from(ts).ok().filter(|&s| s <= MAX_RFC3339_SECS)?;
        let at = UNIX_EPOCH.checked_add(Duration::from_secs(secs))?;
        Some(humantime::format_rfc3339_seconds(at).to_string())
    });
    let now = unix_now();
    let expired = parts.deadline.map(|ts| now > ts);

    let output = serde_json::json!({
        "parts": parts,
        "mac_bytes": parts.mac_hex.len() / 2,
        "deadline_utc": deadline_utc,
        "expired": expired,
        "verified": false,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_generate_key(length: usize) -> Result<(), Box<dyn std::error::Error>> {
    let key = generate_secret_key(length)?;
    log::debug!("generated {length}-byte key");

    let output = serde_json::json!({
        "length": key.len(),
        "key_hex": hex::encode(key.as_bytes()),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Resolve the key from a key file, or --key-hex / SIGNET_KEY.
fn read_key(args: &KeyArgs) -> Result<SecretKey, Box<dyn std::error::Error>> {
    match (&args.key, &args.key_hex) {
        (Some(path), _) => Ok(load_key_file(path, args.hex_key)?),
        (None, Some(hex_key)) => Ok(parse_hex_key(hex_key)?),
        (None, None) => Err("no key given: use --key <path>, --key-hex or SIGNET_KEY".into()),
    }
}

/// Read a value from a CLI argument, used exactly as given, or from stdin
/// with one trailing line ending removed.
fn read_input(arg: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => Ok(s),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(strip_line_ending(buf))
        }
    }
}

fn strip_line_ending(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}
