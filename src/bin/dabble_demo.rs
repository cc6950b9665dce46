//! Double Dabble demonstration
//! Encodes sample values to BCD, decodes them back and prints the results

use dabble_rs::bitwise::{parse_literal, BcdWidth, Dabble};
use dabble_rs::formats::{ConversionReport, DecodeReport};
use dabble_rs::SAMPLE_VALUES;
use std::env;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

struct Options {
    width: BcdWidth,
    json: bool,
    decode: bool,
    values: Vec<i64>,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} [--width N] [--json] [--decode] [VALUE...]", program);
    eprintln!("\nValues may be decimal, 0x hex or 0b binary (e.g. 0b0010_0101_0101).");
    eprintln!("\nExamples:");
    eprintln!("  {}                     # Encode the built-in samples", program);
    eprintln!("  {} --width 16 65535    # Encode with a 16-bit input", program);
    eprintln!("  {} --decode 0x127      # Decode packed BCD", program);
    std::process::exit(1);
}

fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let program = args.first().map(String::as_str).unwrap_or("dabble-demo");
    let mut options = Options {
        width: BcdWidth::default(),
        json: false,
        decode: false,
        values: Vec::new(),
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--width" | "-w" => {
                let bits = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--width needs a value"))?;
                options.width = BcdWidth::new(bits.parse()?)?;
            }
            "--json" => options.json = true,
            "--decode" | "-d" => options.decode = true,
            "--help" | "-h" => usage(program),
            other => options.values.push(parse_literal(other)?),
        }
    }

    if options.values.is_empty() {
        options.values = SAMPLE_VALUES.to_vec();
    }

    Ok(options)
}

fn run_one(codec: &Dabble, value: i64, options: &Options) -> anyhow::Result<()> {
    if options.decode {
        let packed = u64::try_from(value)
            .map_err(|_| anyhow::anyhow!("packed BCD cannot be negative: {}", value))?;
        let report = DecodeReport::decode(codec, packed)?;
        if options.json {
            println!("{}", report.to_json()?);
        } else {
            println!("{}", report.render_text());
        }
    } else {
        let report = ConversionReport::encode(codec, value)?;
        if options.json {
            println!("{}", report.to_json()?);
        } else {
            println!("{}", report.render_text());
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args)?;
    let codec = Dabble::new(options.width);

    tracing::info!(
        "Running {} {} conversion(s) at {}",
        options.values.len(),
        if options.decode { "decode" } else { "encode" },
        codec.width()
    );

    let mut failures = 0;
    for &value in &options.values {
        if let Err(e) = run_one(&codec, value, &options) {
            tracing::error!("Value {}: {}", value, e);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} conversions failed", failures, options.values.len());
    }

    Ok(())
}
