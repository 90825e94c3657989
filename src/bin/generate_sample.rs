use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic launch table for trying the dashboard.
#[derive(Parser)]
#[command(name = "generate-sample")]
struct Args {
    /// Output CSV path
    #[arg(default_value = "spacex_launch_dash.csv")]
    output: PathBuf,
}

/// One row in the layout of `spacex_launch_dash.csv`.
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Launch Site")]
    launch_site: &'a str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'a str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in flight order: (category, heaviest payload, success rate).
const GENERATIONS: [(&str, f64, f64); 5] = [
    ("v1.0", 1000.0, 0.3),
    ("v1.1", 5000.0, 0.4),
    ("FT", 9600.0, 0.7),
    ("B4", 9600.0, 0.6),
    ("B5", 9600.0, 0.9),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn main() -> Result<()> {
    let output_path = Args::parse().output;

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let per_generation = 12;
    let mut flight_number = 0;
    for (gen_idx, &(category, max_payload, success_rate)) in GENERATIONS.iter().enumerate() {
        for _ in 0..per_generation {
            flight_number += 1;
            // Later generations fly more from the newer pads.
            let site = if gen_idx < 2 { SITES[0] } else { *rng.pick(&SITES[1..]) };
            let payload = (rng.next_f64() * max_payload).round();
            writer.serialize(Row {
                flight_number,
                launch_site: site,
                class: u8::from(rng.next_f64() < success_rate),
                payload_mass_kg: payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight_number),
                booster_version_category: category,
            })?;
        }
    }
    writer.flush()?;

    println!("Wrote {flight_number} launches to {}", output_path.display());
    Ok(())
}
