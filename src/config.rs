//! Command-line configuration for the `dispview` demo.

use anyhow::{anyhow, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub width: u16,
    pub height: u16,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log: String,
    /// Print view geometry as JSON after the frame.
    pub json: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 12,
            log: String::from("warn"),
            json: false,
        }
    }
}

fn parse_dim(flag: &str, value: Option<&String>) -> Result<u16> {
    let v = value.ok_or_else(|| anyhow!("dispview: missing value for {}", flag))?;
    let n = v
        .parse::<u16>()
        .map_err(|_| anyhow!("dispview: invalid {} value: {}", flag, v))?;
    if n < 2 {
        return Err(anyhow!("dispview: {} must be at least 2, got {}", flag, n));
    }
    Ok(n)
}

/// Parse arguments (without the program name).
pub fn parse_demo_args(args: &[String]) -> Result<DemoConfig> {
    let mut config = DemoConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                config.width = parse_dim("--width", args.get(i))?;
            }
            "--height" => {
                i += 1;
                config.height = parse_dim("--height", args.get(i))?;
            }
            "--log" => {
                i += 1;
                config.log = args
                    .get(i)
                    .ok_or_else(|| anyhow!("dispview: missing value for --log"))?
                    .clone();
            }
            "--json" => config.json = true,
            other => {
                return Err(anyhow!("dispview: unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}
