use std::thread;

use fixed_bits::{BitsetError, ConcurrentBitset, SequentialBitset};

fn main() -> Result<(), BitsetError> {
    println!("=== Fixed Bits Examples ===\n");

    example_sequential()?;
    example_concurrent()?;
    example_out_of_bounds();

    Ok(())
}

fn example_sequential() -> Result<(), BitsetError> {
    println!("Example 1: Tracking visited nodes on one thread");

    let mut visited = SequentialBitset::new(100);
    for node in [3, 14, 15, 92] {
        visited.set(node)?;
    }

    println!("  Capacity: {} bits in {} words", visited.capacity(), visited.num_words());
    println!("  Visited: {:?}", visited.iter_ones().collect::<Vec<_>>());
    println!("  Node 15 visited: {}", visited.get(15)?);
    println!("  Node 16 visited: {}", visited.get(16)?);
    println!();

    Ok(())
}

fn example_concurrent() -> Result<(), BitsetError> {
    println!("Example 2: Deduplicating work across threads");

    let claimed = ConcurrentBitset::new(1_000);
    let per_thread: Vec<usize> = thread::scope(|s| {
        let claimed = &claimed;
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || (0..1_000).filter(|&job| claimed.try_set(job)).count()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap_or(0)).collect()
    });

    println!("  Jobs claimed per thread: {per_thread:?}");
    println!("  Total claimed: {}", claimed.count_ones());

    let word = claimed.get_word(0)?;
    println!("  First word: {word:#018x}");
    println!();

    Ok(())
}

fn example_out_of_bounds() {
    println!("Example 3: Out-of-range indices");

    let bits = SequentialBitset::new(10);
    match bits.get(10) {
        Ok(v) => println!("  Unexpected value: {v}"),
        Err(e) => println!("  Error: {e}"),
    }
    println!();
}
