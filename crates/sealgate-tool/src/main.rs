//! Sealed-content authoring tool.
//!
//! # Usage
//!
//! ```bash
//! # Create a deployment identity: private container + public artifacts
//! sealgate-tool generate-cert content.key.pem securepassword
//!
//! # Seal a content file using the private container
//! sealgate-tool encrypt room_admin.txt room_admin.enc content.key.pem securepassword
//!
//! # Seal using only the distributable public key
//! sealgate-tool encrypt room_admin.txt room_admin.enc content.pub.pem
//!
//! # Verify a sealed artifact opens
//! sealgate-tool decrypt room_admin.enc content.key.pem securepassword
//! ```
//!
//! Missing required arguments print usage and exit before any key material
//! is touched.

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use sealgate_crypto::{Identity, KeyPair, RsaPublicKey, open_wrapped, seal_wrapped};
use sealgate_proto::Envelope;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Subject label for generated content certificates.
const CERT_SUBJECT: &str = "sealgate-content";

/// Sealed room content authoring tool
#[derive(Parser, Debug)]
#[command(name = "sealgate-tool")]
#[command(about = "Seals narrative content into role-gated envelopes")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a content identity: a password-protected private-key
    /// container plus distributable public artifacts
    GenerateCert {
        /// Where to write the private-key container
        output_path: PathBuf,

        /// Container password (must not be empty)
        password: String,
    },

    /// Seal a content file into a wrapped-key envelope
    Encrypt {
        /// Plaintext file to seal
        input: PathBuf,

        /// Where to write the sealed envelope
        output: PathBuf,

        /// Private-key container (with password) or public key PEM (without)
        cert_path: PathBuf,

        /// Container password; omit when cert-path is the public PEM
        cert_password: Option<String>,
    },

    /// Open a sealed envelope and print the content (verification aid)
    Decrypt {
        /// Sealed envelope file
        input: PathBuf,

        /// Private-key container
        cert_path: PathBuf,

        /// Container password
        cert_password: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    match args.command {
        Command::GenerateCert { output_path, password } => generate_cert(&output_path, &password),
        Command::Encrypt { input, output, cert_path, cert_password } => {
            encrypt(&input, &output, &cert_path, cert_password.as_deref())
        },
        Command::Decrypt { input, cert_path, cert_password } => {
            let text = open_envelope(&input, &cert_path, &cert_password)?;
            print_content(&text);
            Ok(())
        },
    }
}

/// Generate the identity and write all three artifacts.
///
/// The private container lands at `output_path`; the public key and the
/// certificate land next to it with `.pub.pem` and `.cert.pem` extensions.
fn generate_cert(output_path: &Path, password: &str) -> Result<(), Box<dyn Error>> {
    let identity = Identity::generate(CERT_SUBJECT)?;

    identity.save(output_path, password)?;
    tracing::info!("private-key container written to {}", output_path.display());

    let public_path = output_path.with_extension("pub.pem");
    identity.keys().write_public_key_pem(&public_path)?;
    tracing::info!("public key written to {}", public_path.display());

    let cert_path = output_path.with_extension("cert.pem");
    identity.write_certificate_pem(&cert_path)?;
    tracing::info!(
        "certificate for {:?} written to {}, valid until {}",
        identity.subject(),
        cert_path.display(),
        identity.not_after(),
    );

    Ok(())
}

/// Seal `input` into `output` for the identity at `cert_path`.
fn encrypt(
    input: &Path,
    output: &Path,
    cert_path: &Path,
    cert_password: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let plaintext = fs::read(input)?;
    let recipient = load_recipient(cert_path, cert_password)?;

    let envelope = seal_wrapped(&plaintext, &recipient, &mut OsRng)?;
    let wire = envelope.to_bytes()?;
    fs::write(output, &wire)?;

    tracing::info!(
        "sealed {} bytes from {} into {} ({} bytes)",
        plaintext.len(),
        input.display(),
        output.display(),
        wire.len(),
    );
    Ok(())
}

/// Recipient public key: from the private container when a password is
/// given, from the bare public PEM otherwise.
fn load_recipient(
    cert_path: &Path,
    cert_password: Option<&str>,
) -> Result<RsaPublicKey, Box<dyn Error>> {
    match cert_password {
        Some(password) => Ok(KeyPair::load(cert_path, password)?.public().clone()),
        None => Ok(KeyPair::load_public(cert_path)?),
    }
}

/// Open a sealed artifact with the private container and return the text.
fn open_envelope(
    input: &Path,
    cert_path: &Path,
    cert_password: &str,
) -> Result<String, Box<dyn Error>> {
    let keys = KeyPair::load(cert_path, cert_password)?;
    let wire = fs::read(input)?;

    let envelope = Envelope::decode_wrapped(&wire)?;
    let plaintext = open_wrapped(&envelope, keys.private())?;

    Ok(String::from_utf8(plaintext)?)
}

/// The one place recovered content goes to stdout rather than the log.
#[allow(clippy::print_stdout)]
fn print_content(text: &str) {
    println!("{text}");
}
