//! Writes a deterministic, deliberately messy sample CSV for manual testing:
//! a linear relationship plus noise, a handful of missing-value tokens in
//! all four recognized spellings, and a few verbatim duplicate rows.

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let samples = ["Batch_A", "Batch_B", "Batch_C"];
    let missing_tokens = ["", " ", "nan", "NaN"];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["sample", "temperature", "pressure", "yield"])
        .expect("Failed to write header");

    let mut rows: Vec<[String; 4]> = Vec::new();
    for (i, sample) in samples.iter().cycle().take(36).enumerate() {
        let temperature = 20.0 + rng.next_f64() * 60.0;
        let pressure = 1.0 + rng.next_f64() * 4.0;
        // yield = 2*temperature - 5*pressure + noise
        let yield_value = 2.0 * temperature - 5.0 * pressure + rng.gauss(0.0, 0.5);

        let mut row = [
            sample.to_string(),
            format!("{temperature:.2}"),
            format!("{pressure:.2}"),
            format!("{yield_value:.2}"),
        ];

        // Every 7th row loses one measurement, rotating through the
        // recognized missing-token spellings.
        if i % 7 == 3 {
            let col = 1 + i % 3;
            row[col] = missing_tokens[i % missing_tokens.len()].to_string();
        }

        rows.push(row);
    }

    // Duplicate a few rows verbatim so duplicate detection has work to do.
    rows.push(rows[4].clone());
    rows.push(rows[10].clone());
    rows.push(rows[4].clone());

    let row_count = rows.len();
    for row in rows {
        writer.write_record(&row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {row_count} rows to {output_path}");
}
