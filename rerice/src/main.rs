use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rerice::values::{format_values, read_values_file};
use rerice::{CodecOptions, DEFAULT_MAX_QUOTIENT};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rerice")]
#[command(version)]
#[command(about = "Rice/Golomb codeword converter", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct CodecArgs {
    /// Divisor M (at least 1)
    #[arg(short = 'm', long = "divisor")]
    m: u64,
    /// Longest unary run accepted
    #[arg(long, default_value_t = DEFAULT_MAX_QUOTIENT)]
    max_quotient: u64,
}

impl CodecArgs {
    fn options(self) -> CodecOptions {
        CodecOptions::new(self.m).with_max_quotient(self.max_quotient)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode integers to codewords, one per line
    Encode {
        #[command(flatten)]
        codec: CodecArgs,
        /// Values to encode
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<i64>,
    },
    /// Decode codewords to integers, one per line
    Decode {
        #[command(flatten)]
        codec: CodecArgs,
        /// Codewords such as +1101
        #[arg(required = true, allow_hyphen_values = true)]
        codewords: Vec<String>,
    },
    /// Show the fields of a codeword
    Inspect {
        #[command(flatten)]
        codec: CodecArgs,
        /// Codeword to inspect
        #[arg(allow_hyphen_values = true)]
        codeword: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pack a text file of integers into a binary stream
    Pack {
        #[command(flatten)]
        codec: CodecArgs,
        /// Text file of integers
        input: PathBuf,
        /// Output packed file
        output: PathBuf,
    },
    /// Unpack a binary stream into a text file of integers
    Unpack {
        /// Packed file
        input: PathBuf,
        /// Output text file (stdout when omitted)
        output: Option<PathBuf>,
        /// Longest unary run accepted
        #[arg(long, default_value_t = DEFAULT_MAX_QUOTIENT)]
        max_quotient: u64,
    },
    /// Recommend a divisor for a text file of integers
    Estimate {
        /// Text file of integers
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode { codec, values } => {
            for codeword in rerice::encode_values(&values, codec.options())? {
                println!("{}", codeword);
            }
        }
        Commands::Decode { codec, codewords } => {
            let values = rerice::decode_codewords(&codewords, codec.options())?;
            print!("{}", format_values(&values));
        }
        Commands::Inspect {
            codec,
            codeword,
            json,
        } => {
            inspect(&codeword, codec.options(), json)?;
        }
        Commands::Pack {
            codec,
            input,
            output,
        } => {
            pack(&input, &output, codec.options())?;
        }
        Commands::Unpack {
            input,
            output,
            max_quotient,
        } => {
            unpack(&input, output.as_deref(), max_quotient)?;
        }
        Commands::Estimate { input, json } => {
            estimate(&input, json)?;
        }
    }

    Ok(())
}

/// stderr logging, RERICE_LOG overrides the -v level
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("RERICE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    let main_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(main_layer)
        .init();
}

fn inspect(codeword: &str, options: CodecOptions, json: bool) -> Result<()> {
    let parts = rerice::inspect_codeword(codeword, options)?;

    if json {
        let json_str = serde_json::to_string_pretty(&parts).context("Failed to serialize")?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("Codeword {}", codeword);
    println!("───────────────────────────────");
    println!("  Divisor:     {}", parts.m);
    println!("  Sign:        {}", parts.sign.symbol());
    println!("  Quotient:    {}", parts.quotient);
    println!(
        "  Remainder:   {} ({} bits)",
        parts.remainder, parts.remainder_width
    );
    println!("  Length:      {} symbols", parts.length);
    println!("  Value:       {}", parts.value);

    Ok(())
}

fn pack(input: &Path, output: &Path, options: CodecOptions) -> Result<()> {
    println!("Reading {}...", input.display());
    let values = read_values_file(input)?;
    println!("  Values: {}", values.len());

    println!("Packing with M = {}...", options.m);
    let packed = rerice::pack(&values, options)?;
    fs::write(output, &packed).context("Failed to write output file")?;

    let text_size = format_values(&values).len();
    println!("Done!");
    println!("  Output: {}", output.display());
    println!(
        "  Size: {} bytes ({:.1}x smaller than text)",
        packed.len(),
        text_size as f64 / packed.len() as f64
    );

    Ok(())
}

fn unpack(input: &Path, output: Option<&Path>, max_quotient: u64) -> Result<()> {
    let data = fs::read(input).context("Failed to read packed file")?;
    let (info, values) = rerice::unpack(&data, max_quotient)?;
    let text = format_values(&values);

    match output {
        Some(path) => {
            fs::write(path, text).context("Failed to write output file")?;
            println!("Unpacked {} values (M = {})", info.count, info.m);
            println!("  Output: {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn estimate(input: &Path, json: bool) -> Result<()> {
    let values = read_values_file(input)?;
    let estimate = rerice::estimate(&values)?;

    if json {
        let json_str = serde_json::to_string_pretty(&estimate).context("Failed to serialize")?;
        println!("{}", json_str);
    } else {
        println!("Recommended M: {}", estimate.m);
        println!("  Values:      {}", estimate.count);
        println!("  Total bits:  {}", estimate.total_bits);
        println!("  Bits/value:  {:.2}", estimate.bits_per_value);
    }

    Ok(())
}
