use std::collections::hash_map::RandomState;

use chain_hash::HashSet;
use chain_hash::LoadFactor;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// Number of distinct values to insert.
    #[arg(short = 'n', long = "values", default_value_t = 1000)]
    values: usize,

    /// Maximum ratio of values to buckets before the set grows.
    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f64,

    /// Remove this many values again after filling, to show shrinking.
    #[arg(short = 'r', long = "remove", default_value_t = 0)]
    remove: usize,
}

fn main() {
    let args = Args::parse();

    let load_factor = match LoadFactor::new(args.load_factor) {
        Ok(load_factor) => load_factor,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut set: HashSet<u64, RandomState> =
        HashSet::with_capacity_load_factor_and_hasher(0, load_factor, RandomState::new());

    println!(
        "Filling set with {} u64 values (load factor {})...",
        args.values,
        load_factor.get()
    );

    let mut num_failures = 0;
    for i in 0..args.values as u64 {
        if set.try_insert(i).is_err() {
            num_failures += 1;
        }
    }

    println!("Inserted {} values into set", set.len());
    set.stats().print();

    if args.remove > 0 {
        let removed = (0..args.remove as u64).filter(|v| set.remove(v)).count();
        println!();
        println!("Removed {} values", removed);
        set.stats().print();
    }

    if num_failures > 0 {
        println!(
            "Number of failed insertions: {} ({:.02}%)",
            num_failures,
            num_failures as f64 / args.values as f64 * 100.0
        );
    }
}
