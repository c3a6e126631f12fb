use clap::Parser;
use probe_hash::ChainedTable;
use probe_hash::DoubleHashTable;
use probe_hash::ProbedTable;
use probe_hash::Probing;
use probe_hash::Slot;
use probe_hash::stats::print_histogram;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "capacity", default_value_t = 10)]
    capacity: usize,

    #[arg(short = 'k', long = "keys", value_delimiter = ',', default_values_t = [15, 25, 35, 15, 5, 20, 25])]
    keys: Vec<i64>,

    #[arg(long = "two-sum", default_value_t = 30)]
    two_sum: i64,
}

fn print_slots(title: &str, slots: &[(usize, Slot)]) {
    println!("\n=== {title} ===");
    for (idx, slot) in slots {
        match slot {
            Slot::Empty => println!("{idx}: empty"),
            Slot::Tombstone => println!("{idx}: deleted"),
            Slot::Occupied(key) => println!("{idx}: {key}"),
        }
    }
}

fn print_chains<K: std::fmt::Display>(table: &ChainedTable<K>) {
    for (idx, keys) in table.display() {
        print!("{idx}: ");
        for key in keys {
            print!("{key} -> ");
        }
        println!("NULL");
    }
}

fn main() {
    let args = Args::parse();

    let mut chained = match ChainedTable::new(args.capacity) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    chained.extend(args.keys.iter().copied());

    println!("=== Separate Chaining ===");
    print_chains(&chained);

    let show = |value: Option<i64>| value.map_or("none".to_string(), |v| v.to_string());
    let first = args.keys.first().copied().unwrap_or(0);
    println!("\nCount of {first}: {}", chained.count_occurrences(&first));
    println!("Has duplicates? {}", chained.has_duplicate());
    println!("First unique: {}", show(chained.first_unique().copied()));
    println!("Count distinct: {}", chained.count_distinct());
    println!("Max value: {}", show(chained.max()));
    println!("Min value: {}", show(chained.min()));
    println!("Total elements: {}", chained.total());
    println!("Two-sum {} exists? {}", args.two_sum, chained.two_sum(args.two_sum));

    let removed = chained.remove_duplicates();
    println!("\nAfter removing {removed} duplicates:");
    print_chains(&chained);

    let open_tables = [
        ("Linear Probing", ProbedTable::new(args.capacity, Probing::Linear)),
        ("Quadratic Probing", ProbedTable::new(args.capacity, Probing::Quadratic)),
    ];
    for (title, table) in open_tables {
        let Ok(mut table) = table else { continue };
        for &key in &args.keys {
            if let Err(err) = table.insert(key) {
                println!("{title}: {err}");
            }
        }
        print_slots(title, &table.display());
        print_histogram(&table.probe_histogram());
        table.debug_stats().print();
    }

    if let Ok(mut table) = DoubleHashTable::new(args.capacity) {
        for &key in &args.keys {
            if let Err(err) = table.insert(key) {
                println!(
                    "Double Hashing: {err} (probe cycle covers {} of {} slots)",
                    table.probe_cycle_len(key),
                    table.capacity()
                );
            }
        }
        print_slots("Double Hashing", &table.display());
        print_histogram(&table.probe_histogram());
        table.debug_stats().print();
    }

    let mut words: ChainedTable<String> = ChainedTable::default();
    words.extend(
        ["apple", "banana", "apple", "orange", "grape", "kiwi"]
            .iter()
            .map(|s| s.to_string()),
    );
    println!("\n=== String Chaining ===");
    print_chains(&words);
    println!("\nHas duplicate? {}", words.has_duplicate());
    println!("Occurrences of 'apple': {}", words.count_occurrences("apple"));
    println!(
        "First unique string: {}",
        words.first_unique().map_or("none", String::as_str)
    );
    println!("Number of distinct strings: {}", words.count_distinct());
    println!(
        "Has common with {{mango, kiwi}}? {}",
        words.has_common_string(["mango", "kiwi"])
    );

    words.remove_duplicates();
    println!("\nAfter removing duplicates:");
    print_chains(&words);
    println!("Total strings: {}", words.total_strings());
    println!("All unique? {}", words.all_unique());
    println!("Longest string: {}", words.longest_string().unwrap_or(""));
    println!("Concatenate all strings: {}", words.concatenate_all());
    println!("Strings with prefix 'a': {}", words.count_prefix("a"));
}
