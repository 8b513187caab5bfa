use std::fs;
use std::path::Path;

use crate::error::HarnessError;

pub const MIN_VALUE: i64 = -1_000_000_000;
pub const MAX_VALUE: i64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigKind {
    None,
    Heap,
    Graph,
}

/// Options for the `gen` command, read from a line-oriented `key value`
/// file. Unknown keys and unparsable integers are ignored; missing keys
/// keep their defaults.
#[derive(Clone, Debug)]
pub struct GenConfig {
    pub kind: ConfigKind,
    pub name: String,
    pub vertices: usize,
    pub edges: usize,
    pub size: usize,
    pub op: usize,
    pub addfreq: u32,
    pub decfreq: u32,
    pub popfreq: u32,
    pub minweight: i64,
    pub maxweight: i64,
    pub minval: i64,
    pub maxval: i64,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            kind: ConfigKind::None,
            name: "default".to_string(),
            vertices: 100_000,
            edges: 1_000_000,
            size: 0,
            op: 1_000_000,
            addfreq: 1,
            decfreq: 1,
            popfreq: 1,
            minweight: 0,
            maxweight: MAX_VALUE,
            minval: MIN_VALUE,
            maxval: MAX_VALUE,
        }
    }
}

/// Keeps the characters that are safe in a data filename.
fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

fn parse_or_keep<T: std::str::FromStr + Copy>(value: &str, current: T) -> T {
    value.parse().unwrap_or(current)
}

pub fn read_config(path: &Path) -> Result<GenConfig, HarnessError> {
    let text = fs::read_to_string(path)?;
    let mut config = GenConfig::default();
    config.name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    for line in text.lines() {
        let lowered = line.to_lowercase();
        let mut parts = lowered.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        match key {
            "name" => config.name = value.to_string(),
            "type" => {
                config.kind = match value {
                    "heap" => ConfigKind::Heap,
                    "graph" => ConfigKind::Graph,
                    _ => ConfigKind::None,
                }
            }
            "vertices" => config.vertices = parse_or_keep(value, config.vertices),
            "edges" => config.edges = parse_or_keep(value, config.edges),
            "size" => config.size = parse_or_keep(value, config.size),
            "op" => config.op = parse_or_keep(value, config.op),
            "addfreq" => config.addfreq = parse_or_keep(value, config.addfreq),
            "decfreq" => config.decfreq = parse_or_keep(value, config.decfreq),
            "popfreq" => config.popfreq = parse_or_keep(value, config.popfreq),
            "minweight" => config.minweight = parse_or_keep(value, config.minweight),
            "maxweight" => config.maxweight = parse_or_keep(value, config.maxweight),
            "minval" => config.minval = parse_or_keep(value, config.minval),
            "maxval" => config.maxval = parse_or_keep(value, config.maxval),
            _ => {}
        }
    }

    config.name = sanitize_name(&config.name);
    if config.name.is_empty() {
        return Err(HarnessError::Malformed(
            "config resolves to an empty data name".to_string(),
        ));
    }
    Ok(config)
}
