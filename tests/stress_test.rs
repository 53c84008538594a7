//! Stress tests for the Dark Matcher engine.
//!
//! These tests verify:
//! 1. The engine stays consistent over long random streams
//! 2. Determinism is preserved across runs
//! 3. Cancellation under load never loses or duplicates orders
//! 4. The book stays bounded when both sides trade around the same price
//!
//! Timings are printed, not asserted.
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test stress_100k_orders -- --nocapture
//! ```

use std::time::Instant;

use dark_matcher::{IdSequence, MatchingEngine, Order, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Number of orders for the main stress test
const STRESS_ORDER_COUNT: usize = 100_000;

/// Share of generated orders that are market orders
const MARKET_RATE: f64 = 0.1;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate one random order around 50000.00.
///
/// `spread_cents` bounds the price offset; quantities run 0.001 to 1.000.
fn random_order(rng: &mut ChaCha8Rng, id: u64, spread_cents: i64) -> Order {
    let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };

    let offset: i64 = rng.gen_range(-spread_cents..=spread_cents);
    let price = Decimal::new(5_000_000 + offset, 2);
    let volume = Decimal::new(rng.gen_range(1..=1_000), 3);

    if rng.gen_bool(MARKET_RATE) {
        let locked = match side {
            // enough for the whole volume at up to 50500.00
            Side::Buy => volume * Decimal::new(50_500, 0),
            Side::Sell => volume,
        };
        Order::market(id, side, volume, locked)
    } else {
        Order::limit(id, side, price, volume)
    }
}

/// Generate deterministic orders for stress testing.
///
/// Uses a seeded RNG for reproducibility. Same seed = same orders.
fn generate_deterministic_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ids = IdSequence::new();

    (0..count)
        .map(|_| random_order(&mut rng, ids.next_id(), 100_000))
        .collect()
}

/// Run a deterministic order sequence and return the final state root.
fn run_deterministic_sequence(seed: u64, count: usize) -> [u8; 32] {
    let mut engine = MatchingEngine::new();

    for order in generate_deterministic_orders(count, seed) {
        engine.submit(order).expect("generated orders are valid");
    }

    engine.book().state_root()
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Main stress test: process 100k mixed orders.
///
/// # Verification
/// - No errors or panics during execution
/// - Book is never crossed
/// - Trade count is positive (some matching occurred)
#[test]
fn stress_100k_orders() {
    println!("\n=== STRESS TEST: {} Orders ===\n", STRESS_ORDER_COUNT);

    let orders = generate_deterministic_orders(STRESS_ORDER_COUNT, 42);
    let mut engine = MatchingEngine::new();

    let start = Instant::now();

    let mut trade_count = 0;
    let mut rejected = 0;
    for order in orders {
        let result = engine.submit(order).expect("generated orders are valid");
        trade_count += result.trades.len();
        if result.is_rejected() {
            rejected += 1;
        }
    }

    let elapsed = start.elapsed();
    let throughput = STRESS_ORDER_COUNT as f64 / elapsed.as_secs_f64();
    let book = engine.book();

    println!("  Orders processed:  {:>12}", STRESS_ORDER_COUNT);
    println!("  Trades generated:  {:>12}", trade_count);
    println!("  Market rejects:    {:>12}", rejected);
    println!("  Final book size:   {:>12}", book.order_count());
    println!("  Bid count:         {:>12}", book.bid_count());
    println!("  Ask count:         {:>12}", book.ask_count());
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!("  Throughput:        {:>12.0} orders/sec", throughput);
    println!("  State root:        {}", hex::encode(book.state_root()));

    assert!(trade_count > 0, "Expected some trades to occur");
    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid < ask, "book crossed: {} >= {}", bid, ask);
    }
    assert!(book.ascend(Side::Buy).all(|o| o.volume > Decimal::ZERO));
    assert!(book.ascend(Side::Sell).all(|o| o.volume > Decimal::ZERO));

    println!("\n=== STRESS TEST PASSED ===\n");
}

/// Verify determinism: Same sequence produces identical state root.
#[test]
fn verify_determinism() {
    const TEST_COUNT: usize = 10_000;
    const SEED: u64 = 12345;

    let root1 = run_deterministic_sequence(SEED, TEST_COUNT);
    let root2 = run_deterministic_sequence(SEED, TEST_COUNT);

    println!("  Run 1 state root: {}", hex::encode(root1));
    println!("  Run 2 state root: {}", hex::encode(root2));

    assert_eq!(root1, root2, "State roots must match for determinism");

    let root3 = run_deterministic_sequence(SEED + 1, TEST_COUNT);
    assert_ne!(root1, root3, "Different seeds should produce different roots");
}

/// Test varying load sizes.
#[test]
fn stress_scaling() {
    let test_sizes = [1_000, 10_000, 50_000];

    println!("{:>12} {:>12} {:>12} {:>12}", "Orders", "Time", "Throughput", "Latency");
    println!("{:-<12} {:-<12} {:-<12} {:-<12}", "", "", "", "");

    for &size in &test_sizes {
        let orders = generate_deterministic_orders(size, 42);
        let mut engine = MatchingEngine::new();

        let start = Instant::now();
        for order in orders {
            engine.submit(order).expect("generated orders are valid");
        }
        let elapsed = start.elapsed();

        let throughput = size as f64 / elapsed.as_secs_f64();
        let latency_us = elapsed.as_micros() as f64 / size as f64;

        println!("{:>12} {:>12.2?} {:>12.0} {:>12.2}μs", size, elapsed, throughput, latency_us);
    }
}

/// Cancel a random share of resting orders while trading continues.
#[test]
fn stress_cancellations() {
    const ORDER_COUNT: usize = 50_000;
    const CANCEL_RATE: f64 = 0.3;

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut ids = IdSequence::new();
    let mut engine = MatchingEngine::new();

    let mut orders_cancelled = 0;
    let mut cancel_misses = 0;
    let mut resting: Vec<Order> = Vec::new();

    for _ in 0..ORDER_COUNT {
        if !resting.is_empty() && rng.gen_bool(CANCEL_RATE) {
            let idx = rng.gen_range(0..resting.len());
            let order = resting.swap_remove(idx);

            // the order may have been filled since it rested
            match engine.cancel(&order) {
                Some(removed) => {
                    assert_eq!(removed.id, order.id);
                    assert!(!engine.book().contains(&order));
                    orders_cancelled += 1;
                }
                None => cancel_misses += 1,
            }
        }

        let order = random_order(&mut rng, ids.next_id(), 100_000);
        let snapshot = order.clone();
        engine.submit(order).expect("generated orders are valid");

        if engine.book().contains(&snapshot) {
            resting.push(snapshot);
        }
    }

    let still_resting = resting.iter().filter(|o| engine.book().contains(o)).count();

    println!("  Orders placed:     {:>12}", ORDER_COUNT);
    println!("  Orders cancelled:  {:>12}", orders_cancelled);
    println!("  Cancel misses:     {:>12}", cancel_misses);
    println!("  Final book size:   {:>12}", engine.book().order_count());

    assert!(orders_cancelled > 0);
    // everything resting was placed by this loop and never cancelled
    assert_eq!(still_resting, engine.book().order_count());
}

/// The book does not grow unbounded with a tight spread.
#[test]
fn stress_memory_stability() {
    const ITERATIONS: usize = 100_000;
    const MAX_BOOK_SIZE: usize = 50_000;

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut ids = IdSequence::new();
    let mut engine = MatchingEngine::new();

    let mut max_size_seen = 0;

    for _ in 0..ITERATIONS {
        let order = random_order(&mut rng, ids.next_id(), 10_000);
        engine.submit(order).expect("generated orders are valid");

        max_size_seen = max_size_seen.max(engine.book().order_count());
    }

    println!("  Iterations:        {:>12}", ITERATIONS);
    println!("  Max book size:     {:>12}", max_size_seen);
    println!("  Final book size:   {:>12}", engine.book().order_count());

    assert!(
        max_size_seen < MAX_BOOK_SIZE,
        "Book grew too large: {} (max {})",
        max_size_seen,
        MAX_BOOK_SIZE
    );
}
