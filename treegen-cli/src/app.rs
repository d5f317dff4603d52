//! Argument parsing and the generate-and-print pipeline behind `treegen`.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use serde_json::Value;
use treegen_core::{GeneratedTree, binding};

pub const HELP: &str = "\
treegen - generate a tree mesh from growth parameters

Usage: treegen [OPTIONS] [CONFIG.json]

Reads the config object from CONFIG.json, or from stdin when omitted:
    {\"baseLength\": 1.0, \"widthHeightRatio\": 0.3,
     \"maxEnergy\": 10.0, \"branchEnergyRatio\": 0.5, \"seed\": 1}

Options:
    --seed <SEED>   Override the config's seed
    --pretty        Pretty-print the JSON output
    --outline       Print an indented node outline instead of JSON
    -h, --help      Show this help message";

/// What the user asked for on the command line.
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub pretty: bool,
    pub outline: bool,
    pub help: bool,
}

/// Parses the arguments following the program name.
pub fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => parsed.help = true,
            "--pretty" => parsed.pretty = true,
            "--outline" => parsed.outline = true,
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --seed")?;
                parsed.seed = Some(value.parse().map_err(|_| format!("Invalid seed: {value}"))?);
            }
            arg if arg.starts_with('-') => return Err(format!("Unknown option: {arg}")),
            path => {
                if parsed.config.is_some() {
                    return Err("Multiple config files specified".to_string());
                }
                parsed.config = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

/// Loads the config object from the file named in `args`, or from stdin.
fn read_config(args: &Args) -> treegen_core::Result<Value> {
    let reader: Box<dyn Read> = match &args.config {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

/// Runs one generation for `args` and renders the requested output.
pub fn run(args: &Args) -> treegen_core::Result<String> {
    let mut value = read_config(args)?;
    render(&mut value, args)
}

fn render(value: &mut Value, args: &Args) -> treegen_core::Result<String> {
    if let (Some(seed), Some(obj)) = (args.seed, value.as_object_mut()) {
        obj.insert("seed".to_string(), Value::from(seed));
    }

    let (config, seed) = binding::config_from_value(value)?;
    log::debug!("config {config:?}, seed {seed}");
    let tree = GeneratedTree::generate(seed, &config)?;

    if args.outline {
        return Ok(tree.tree().outline());
    }

    let out = binding::to_value(&tree);
    let text = if args.pretty {
        serde_json::to_string_pretty(&out)?
    } else {
        serde_json::to_string(&out)?
    };
    Ok(text)
}
