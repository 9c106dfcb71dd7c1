use chrono::{Months, NaiveDate};

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

    /// Uniform integer in [lo, hi)
    fn next_range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo) as f64) as i64
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let trusts = [
        "Northern General Trust",
        "Riverside University Hospitals",
        "St Edmund's Foundation Trust",
        "Westmoor Community Trust",
    ];
    let specialties = ["Orthopaedics", "Cardiology", "Ophthalmology", "General Surgery"];

    // One year of monthly periods, April 2024 → March 2025.
    let anchor = NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid anchor date");
    let months: Vec<String> = (0..12)
        .map(|i| (anchor + Months::new(i)).format("%B %Y").to_string())
        .collect();

    // "Clock Stops" is the legacy label the loader renames on import.
    let metrics: [(&str, i64, i64); 5] = [
        ("Clock Starts", 80, 400),
        ("Clock Stops", 60, 350),
        ("Admitted Clock Stops", 30, 200),
        ("Incomplete Pathways", 200, 900),
        ("Incomplete Admitted Pathways", 20, 150),
    ];

    let output_path = "sample_rtt.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["Type", "Month", "Pathways", "TF Name", "Specialty"])
        .expect("Failed to write header");

    let mut row_count = 0usize;
    for month in &months {
        for &trust in &trusts {
            for &(metric, lo, hi) in &metrics {
                let specialty = specialties[(rng.next_u64() % specialties.len() as u64) as usize];
                let pathways = rng.next_range(lo, hi).to_string();
                writer
                    .write_record([metric, month.as_str(), pathways.as_str(), trust, specialty])
                    .expect("Failed to write row");
                row_count += 1;
            }
        }
    }
    writer.flush().expect("Failed to flush CSV");

    println!(
        "Wrote {row_count} rows ({} months, {} trusts) to {output_path}",
        months.len(),
        trusts.len()
    );
}
