use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Destinations in the built-in seed with their single and return fares.
pub const SEED_FARES: [(&str, &str, &str); 8] = [
    ("London", "25.50", "45.00"),
    ("Manchester", "32.00", "58.00"),
    ("Birmingham", "28.50", "52.00"),
    ("Liverpool", "35.00", "63.00"),
    ("Leeds", "30.00", "55.00"),
    ("Edinburgh", "45.00", "85.00"),
    ("Glasgow", "42.00", "78.00"),
    ("Bristol", "22.50", "40.00"),
];

/// Writes a script of `purchases` paid-in-full ticket sales at random
/// destinations and returns how many were bought per destination.
pub fn generate_purchase_script(path: &Path, purchases: usize) -> Result<Vec<(String, u32)>, Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);
    wtr.write_record(["action", "arg1", "arg2"])?;

    let mut rng = rand::thread_rng();
    let mut counts: Vec<(String, u32)> = SEED_FARES
        .iter()
        .map(|(name, _, _)| (name.to_string(), 0))
        .collect();

    for _ in 0..purchases {
        let index = rng.gen_range(0..SEED_FARES.len());
        let (name, single, ret) = SEED_FARES[index];
        let (ticket_type, fare) = *[("Single", single), ("Return", ret)]
            .choose(&mut rng)
            .expect("non-empty");

        wtr.write_record(["insert", fare])?;
        wtr.write_record(["buy", name, ticket_type])?;
        counts[index].1 += 1;
    }

    wtr.flush()?;
    Ok(counts)
}
