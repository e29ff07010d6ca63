//! Multi-threaded behaviour of `ConcurrentBitset`.

use std::sync::Barrier;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use fixed_bits::{ConcurrentBitset, WORD_BITS};

const THREADS: usize = 8;

#[test]
fn exactly_one_try_set_wins_per_bit() {
    let bits = ConcurrentBitset::new(1_000);
    let wins = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                barrier.wait();
                for k in 0..1_000 {
                    if bits.try_set(k) {
                        wins.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(wins.load(Ordering::Relaxed), 1_000);
    assert_eq!(bits.count_ones(), 1_000);
}

#[test]
fn try_set_with_one_winner_under_stale_hints() {
    let bits = ConcurrentBitset::new(WORD_BITS);
    let barrier = Barrier::new(THREADS);

    let winners: Vec<usize> = thread::scope(|s| {
        let (bits, barrier) = (&bits, &barrier);
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(move || {
                    let hint = bits.get_word(0).unwrap();
                    barrier.wait();
                    (0..WORD_BITS).filter(|&k| bits.try_set_with(hint, k)).count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(winners.iter().sum::<usize>(), WORD_BITS);
    assert_eq!(bits.count_ones(), WORD_BITS);
}

#[test]
fn toggling_one_bit_never_drops_a_neighbour() {
    // Thread 0 flips bit 0 on and off while the others set the rest of the
    // same word. Every neighbour must survive the churn.
    let bits = ConcurrentBitset::new(WORD_BITS);
    let barrier = Barrier::new(THREADS);

    thread::scope(|s| {
        s.spawn(|| {
            barrier.wait();
            for _ in 0..10_000 {
                bits.set(0).unwrap();
                bits.clear(0).unwrap();
            }
        });
        for t in 1..THREADS {
            let bits = &bits;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for k in (t..WORD_BITS).step_by(THREADS - 1) {
                    bits.set(k).unwrap();
                    assert_eq!(bits.get(k), Ok(true));
                }
            });
        }
    });

    assert_eq!(bits.get(0), Ok(false));
    for k in 1..WORD_BITS {
        assert_eq!(bits.get(k), Ok(true), "bit {k} was lost");
    }
}

#[test]
fn concurrent_clears_keep_other_bits() {
    let bits = ConcurrentBitset::new(2 * WORD_BITS);
    for k in 0..2 * WORD_BITS {
        bits.set(k).unwrap();
    }

    thread::scope(|s| {
        for t in 0..THREADS {
            let bits = &bits;
            s.spawn(move || {
                // Even bits only; odd bits must stay set.
                for k in (2 * t..2 * WORD_BITS).step_by(2 * THREADS) {
                    bits.clear(k).unwrap();
                }
            });
        }
    });

    for k in 0..2 * WORD_BITS {
        assert_eq!(bits.get(k), Ok(k % 2 == 1));
    }
}

#[test]
fn shared_through_arc() {
    use std::sync::Arc;

    let bits = Arc::new(ConcurrentBitset::new(128));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let bits = Arc::clone(&bits);
            thread::spawn(move || bits.set(t * 32).unwrap())
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snapshot = bits.snapshot();
    assert_eq!(snapshot.iter_ones().collect::<Vec<_>>(), vec![0, 32, 64, 96]);
}
