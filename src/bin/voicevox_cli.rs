//! voicevox-cli: list voices and synthesize speech with a local VOICEVOX engine
//!
//! Usage:
//!   voicevox-cli speakers                                        List selectable voices
//!   voicevox-cli speak --speaker <id> [--speed <s>] --out <file> <text...>
//!                                                                Synthesize text to a file

use std::io::Write;
use std::path::PathBuf;
use voicevox_client::{
    ClientConfig, Error, ErrorClass, SpeechRequest, SynthesisClient, SynthesisClientBuilder,
};

const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(EXIT_USAGE);
    }

    let code = match args[1].as_str() {
        "speakers" => cmd_speakers(&args[2..]).await,
        "speak" => cmd_speak(&args[2..]).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            0
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            EXIT_USAGE
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    println!(
        r#"voicevox-cli: text-to-speech with a local VOICEVOX engine

USAGE:
    voicevox-cli <COMMAND> [OPTIONS]

COMMANDS:
    speakers                              List voices as "<id>  <speaker> (<style>)"
    speak --speaker <id> --out <file> <text...>
          [--speed <0.8-1.2>]             Synthesize text; "-" as file writes to stdout
    version                               Show version information
    help                                  Show this help message

OPTIONS:
    --host <host>                         Engine host (default 127.0.0.1)
    --port <port>                         Engine port (default 50021)

ENVIRONMENT:
    VOICEVOX_HOST, VOICEVOX_PORT          Engine address
    VOICEVOX_TIMEOUT_SECS                 Whole-request timeout (default: none)
    VOICEVOX_CONNECT_TIMEOUT_SECS         Connection timeout (default: none)
    RUST_LOG                              Log filter, e.g. voicevox_client=debug"#
    );
}

fn cmd_version() {
    println!("voicevox-cli {}", env!("CARGO_PKG_VERSION"));
}

#[derive(Debug, Default)]
struct SpeakArgs {
    host: Option<String>,
    port: Option<u16>,
    speaker: Option<u32>,
    speed: Option<f64>,
    out: Option<PathBuf>,
    text: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<SpeakArgs, String> {
    let mut parsed = SpeakArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--host" => parsed.host = Some(next_value(&mut iter, "--host")?),
            "--port" => {
                let v = next_value(&mut iter, "--port")?;
                parsed.port = Some(v.parse().map_err(|_| format!("invalid port: {v}"))?);
            }
            "--speaker" => {
                let v = next_value(&mut iter, "--speaker")?;
                parsed.speaker = Some(v.parse().map_err(|_| format!("invalid speaker id: {v}"))?);
            }
            "--speed" => {
                let v = next_value(&mut iter, "--speed")?;
                parsed.speed = Some(v.parse().map_err(|_| format!("invalid speed: {v}"))?);
            }
            "--out" => parsed.out = Some(PathBuf::from(next_value(&mut iter, "--out")?)),
            "--" => {
                parsed.text.extend(iter.by_ref().cloned());
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option: {flag}")),
            word => parsed.text.push(word.to_string()),
        }
    }
    Ok(parsed)
}

fn next_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String, String> {
    iter.next()
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

async fn connect(args: &SpeakArgs) -> Result<SynthesisClient, i32> {
    let mut config = ClientConfig::from_env();
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let client = SynthesisClientBuilder::from_config(config)
        .connect()
        .await
        .map_err(|e| report(&e))?;
    if !client.is_ready() {
        eprintln!(
            "Error: the speech engine at {} is not reachable. Start VOICEVOX and try again.",
            client.base_url()
        );
        return Err(EXIT_FAILURE);
    }
    Ok(client)
}

fn report(err: &Error) -> i32 {
    match ErrorClass::from_error(err) {
        ErrorClass::InvalidInput => {
            eprintln!("Warning: {}", err.user_message());
            EXIT_USAGE
        }
        ErrorClass::Unavailable => {
            eprintln!("Error: {}", err.user_message());
            EXIT_FAILURE
        }
        _ => {
            eprintln!("Error: {err}");
            EXIT_FAILURE
        }
    }
}

async fn cmd_speakers(args: &[String]) -> i32 {
    let args = match parse_args(args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            return EXIT_USAGE;
        }
    };
    let client = match connect(&args).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let options = client
        .voices()
        .map(|catalog| catalog.options())
        .unwrap_or_default();
    if options.is_empty() {
        println!("No voices available.");
        return 0;
    }
    for option in &options {
        println!("{:>5}  {}", option.style_id, option.label);
    }
    println!("\nTotal: {} voice(s)", options.len());
    0
}

async fn cmd_speak(args: &[String]) -> i32 {
    let args = match parse_args(args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            return EXIT_USAGE;
        }
    };
    let Some(speaker) = args.speaker else {
        eprintln!("Error: --speaker <id> is required (see `voicevox-cli speakers`)");
        return EXIT_USAGE;
    };
    let Some(out) = args.out.clone() else {
        eprintln!("Error: --out <file> is required");
        return EXIT_USAGE;
    };

    let mut request = SpeechRequest::new(args.text.join(" "), speaker);
    if let Some(speed) = args.speed {
        request = request.speed(speed);
    }
    // Reject bad input before touching the network.
    if let Err(e) = request.validate() {
        return report(&e);
    }

    let client = match connect(&args).await {
        Ok(c) => c,
        Err(code) => return code,
    };
    let audio = match client.speak(&request).await {
        Ok(a) => a,
        Err(e) => return report(&e),
    };

    let written = if out.as_os_str() == "-" {
        std::io::stdout()
            .lock()
            .write_all(audio.as_bytes())
            .map_err(Error::from)
    } else {
        std::fs::write(&out, audio.as_bytes()).map_err(Error::from)
    };
    if let Err(e) = written {
        return report(&e);
    }

    if out.as_os_str() != "-" {
        eprintln!(
            "Wrote {} bytes ({}) to {}",
            audio.len(),
            audio.mime_type(),
            out.display()
        );
    }
    0
}
