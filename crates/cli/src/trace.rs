use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use heap::Key;
use indicatif::ProgressBar;
use rand::Rng;

use crate::config::GenConfig;
use crate::error::HarnessError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraceOp {
    Add(Key),
    /// Decrease the key of the element created at this add-order position.
    DecreaseKey(usize, Key),
    Pop,
}

#[derive(Clone, Copy, Debug)]
pub struct TraceStats {
    pub total: usize,
    pub add: usize,
    pub dec: usize,
    pub pop: usize,
    pub minval: i64,
    pub maxval: i64,
}

/// Reads an operation trace: a `heap` header line, then one operation per
/// line (`a <key>`, `d <index> <key>`, `p`).
pub fn read_trace(path: &Path) -> Result<Vec<TraceOp>, HarnessError> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines();
    if lines.next().map(str::trim) != Some("heap") {
        return Err(HarnessError::Malformed(
            "not an operation trace: missing `heap` header".to_string(),
        ));
    }

    let mut ops = Vec::new();
    for (number, line) in lines.enumerate() {
        let mut parts = line.split_whitespace();
        let op = match parts.next() {
            Some("a") => {
                let key = parse_field(parts.next(), number, "add key")?;
                TraceOp::Add(key)
            }
            Some("d") => {
                let index = parse_field(parts.next(), number, "decrease index")?;
                let key = parse_field(parts.next(), number, "decrease key")?;
                TraceOp::DecreaseKey(index, key)
            }
            Some("p") => TraceOp::Pop,
            Some(other) => {
                return Err(HarnessError::Malformed(format!(
                    "line {}: unknown operation `{other}`",
                    number + 2
                )));
            }
            None => continue,
        };
        ops.push(op);
    }
    Ok(ops)
}

fn parse_field<T: std::str::FromStr>(
    token: Option<&str>,
    number: usize,
    what: &str,
) -> Result<T, HarnessError> {
    token
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| HarnessError::Malformed(format!("line {}: bad {what}", number + 2)))
}

/// Generates a random operation trace and writes it to `path`.
///
/// The mix follows the configured add/decrease/pop frequencies after an
/// initial block of `size` adds. A binary-heap-plus-tombstone oracle tracks
/// the live set so every emitted decrease targets a live element with a key
/// no larger than its current one, and pops never outrun the adds (an empty
/// simulated heap turns the operation into an add).
pub fn generate_trace<R: Rng + ?Sized>(
    path: &Path,
    config: &GenConfig,
    rng: &mut R,
) -> Result<TraceStats, HarnessError> {
    let mut size = config.size;
    let mut op = config.op;
    let mut addfreq = config.addfreq;
    let mut decfreq = config.decfreq;
    let mut popfreq = config.popfreq;
    let maxval = config.maxval;
    let minval = config.minval.min(maxval);
    if size + op == 0 {
        op = 1;
    }
    if addfreq + decfreq + popfreq == 0 {
        addfreq = 1;
        decfreq = 1;
        popfreq = 1;
    }
    let totalfreq = addfreq + decfreq + popfreq;

    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "heap")?;

    let mut oracle: BinaryHeap<Reverse<(Key, usize)>> = BinaryHeap::new();
    let mut current: Vec<Option<Key>> = Vec::new();
    let mut live = 0_usize;
    let (mut add, mut dec, mut pop) = (0_usize, 0_usize, 0_usize);

    let bar = ProgressBar::new((size + op) as u64);
    for _ in 0..size {
        let key = rng.random_range(minval..=maxval);
        oracle.push(Reverse((key, current.len())));
        current.push(Some(key));
        writeln!(out, "a {key}")?;
        add += 1;
        live += 1;
        bar.inc(1);
    }

    for _ in 0..op {
        let action = rng.random_range(0..totalfreq);
        if action < decfreq && live > 0 {
            let mut index = rng.random_range(0..current.len());
            while current[index].is_none() {
                index = rng.random_range(0..current.len());
            }
            let key = current[index].expect("index is live");
            let new_key = rng.random_range(minval..=key);
            current[index] = Some(new_key);
            oracle.push(Reverse((new_key, index)));
            writeln!(out, "d {index} {new_key}")?;
            dec += 1;
        } else if action < decfreq + popfreq && live > 0 {
            loop {
                let Reverse((key, index)) = oracle.pop().expect("oracle tracks a live element");
                if current[index] == Some(key) {
                    current[index] = None;
                    break;
                }
            }
            live -= 1;
            writeln!(out, "p")?;
            pop += 1;
        } else {
            let key = rng.random_range(minval..=maxval);
            oracle.push(Reverse((key, current.len())));
            current.push(Some(key));
            live += 1;
            writeln!(out, "a {key}")?;
            add += 1;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    out.flush()?;

    Ok(TraceStats {
        total: size + op,
        add,
        dec,
        pop,
        minval,
        maxval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::env;

    #[test]
    fn parses_the_three_operations() {
        let path = env::temp_dir().join(format!("trace-parse-{}", std::process::id()));
        fs::write(&path, "heap\na 5\na 3\na 8\np\nd 2 1\np\np\n").unwrap();
        let ops = read_trace(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(
            ops,
            vec![
                TraceOp::Add(5),
                TraceOp::Add(3),
                TraceOp::Add(8),
                TraceOp::Pop,
                TraceOp::DecreaseKey(2, 1),
                TraceOp::Pop,
                TraceOp::Pop,
            ]
        );
    }

    #[test]
    fn rejects_wrong_header_and_bad_lines() {
        let path = env::temp_dir().join(format!("trace-bad-{}", std::process::id()));
        fs::write(&path, "graph 5\n").unwrap();
        assert!(matches!(
            read_trace(&path),
            Err(HarnessError::Malformed(_))
        ));
        fs::write(&path, "heap\nq 1\n").unwrap();
        assert!(matches!(
            read_trace(&path),
            Err(HarnessError::Malformed(_))
        ));
        fs::write(&path, "heap\nd 1\n").unwrap();
        assert!(matches!(
            read_trace(&path),
            Err(HarnessError::Malformed(_))
        ));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn generated_trace_round_trips_and_stays_valid() {
        let path = env::temp_dir().join(format!("trace-gen-{}", std::process::id()));
        let config = GenConfig {
            kind: ConfigKind::Heap,
            size: 50,
            op: 400,
            minval: -100,
            maxval: 100,
            ..GenConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0x7ACE_2026);
        let stats = generate_trace(&path, &config, &mut rng).unwrap();
        let ops = read_trace(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(stats.total, 450);
        assert_eq!(ops.len(), 450);
        assert_eq!(stats.add + stats.dec + stats.pop, 450);

        // Replaying against a tombstone array must never step outside the
        // live set or raise a key.
        let mut current: Vec<Option<Key>> = Vec::new();
        let mut live = 0_i64;
        for op in ops {
            match op {
                TraceOp::Add(key) => {
                    assert!((-100..=100).contains(&key));
                    current.push(Some(key));
                    live += 1;
                }
                TraceOp::DecreaseKey(index, key) => {
                    let old = current[index].expect("decrease targets a live element");
                    assert!(key <= old);
                    current[index] = Some(key);
                }
                TraceOp::Pop => {
                    live -= 1;
                    assert!(live >= 0);
                    let (index, _) = current
                        .iter()
                        .enumerate()
                        .filter_map(|(i, k)| k.map(|k| (i, k)))
                        .min_by_key(|&(i, k)| (k, i))
                        .expect("pop targets a non-empty heap");
                    current[index] = None;
                }
            }
        }
    }

    #[test]
    fn degenerate_configs_are_normalized() {
        let path = env::temp_dir().join(format!("trace-degenerate-{}", std::process::id()));
        let config = GenConfig {
            kind: ConfigKind::Heap,
            size: 0,
            op: 0,
            addfreq: 0,
            decfreq: 0,
            popfreq: 0,
            minval: 10,
            maxval: -10,
            ..GenConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let stats = generate_trace(&path, &config, &mut rng).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.minval, -10);
        assert_eq!(stats.maxval, -10);
    }
}
