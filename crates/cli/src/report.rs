use std::time::Duration;

use crate::run::Backend;
use crate::trace::TraceStats;

/// Groups digits by thousands for the composition reports.
fn with_separators(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn signed_with_separators(value: i64) -> String {
    if value < 0 {
        format!("-{}", with_separators(value.unsigned_abs()))
    } else {
        with_separators(value as u64)
    }
}

pub fn graph_composition(name: &str, vertices: usize, edges: usize, min_weight: i64) {
    let average_degree = 2.0 * edges as f64 / vertices as f64;
    let completeness = if vertices > 1 {
        2.0 * edges as f64 / (vertices as f64 * (vertices as f64 - 1.0))
    } else {
        0.0
    };
    let negative = if min_weight < 0 { "yes" } else { "no" };
    let acyclic = if edges < vertices { "yes" } else { "no" };
    println!(
        "\n-----Graph Composition-----\n\
         name           {name}\n\
         vertices       {}\n\
         average degree {average_degree:.4}\n\
         completeness   {:.3}%\n\
         edges          {}\n\
         neg weights?   {negative}\n\
         acyclic?       {acyclic}\n\
         ---------------------------\n",
        with_separators(vertices as u64),
        completeness * 100.0,
        with_separators(edges as u64),
    );
}

pub fn trace_composition(name: &str, stats: &TraceStats) {
    let total = stats.total.max(1) as f64;
    println!(
        "\n-----Test  Composition-----\n\
         name       {name}\n\
         operations {}\n\
         add        {:.3}%\n\
         decrease   {:.3}%\n\
         pop min    {:.3}%\n\
         min value  {}\n\
         max value  {}\n\
         ---------------------------\n",
        with_separators(stats.total as u64),
        100.0 * stats.add as f64 / total,
        100.0 * stats.dec as f64 / total,
        100.0 * stats.pop as f64 / total,
        signed_with_separators(stats.minval),
        signed_with_separators(stats.maxval),
    );
}

pub fn runtime(backend: Backend, data: &str, elapsed: Duration) {
    println!(
        "\n{} runtime on {data}: {:.5} s\n",
        backend.label(),
        elapsed.as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_group_by_thousands() {
        assert_eq!(with_separators(0), "0");
        assert_eq!(with_separators(999), "999");
        assert_eq!(with_separators(1_000), "1,000");
        assert_eq!(with_separators(1_234_567), "1,234,567");
        assert_eq!(signed_with_separators(-1_000_000_000), "-1,000,000,000");
    }
}
