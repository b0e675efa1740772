//! Order Lifecycle Example
//!
//! This example demonstrates:
//! - Recording order lifecycle facts
//! - Folding an order's events into its current status
//! - Filtered order queries
//! - Poll engagement facts on the same ledger
//!
//! Run with: cargo run --example order_lifecycle

use annal::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("annal=info")
        .init();

    println!("\n╔═══════════════════════════════════════╗");
    println!("║   Annal Order Lifecycle Example       ║");
    println!("╚═══════════════════════════════════════╝\n");

    let db = AnnalDb::new();

    // ========================================
    // 1. Record Order Facts
    // ========================================
    println!("📦 Step 1: Recording Order Facts");

    db.orders().create_order("ORD-1001", 249.00)?;
    db.orders().update_order_status("ORD-1001", OrderStatus::Processing)?;
    db.orders().fulfill_order("ORD-1001", Some("TRK-8842-XK"))?;

    db.orders().create_order("ORD-1002", 19.99)?;
    db.orders().cancel_order("ORD-1002", Some("payment declined"))?;

    db.orders().create_order_with_status("ORD-1003", 75.25, OrderStatus::Processing)?;

    println!("   Recorded {} order events\n", db.orders().count(&OrderFilter::new())?);

    // ========================================
    // 2. Fold Current Status
    // ========================================
    println!("🧾 Step 2: Current Status per Order");

    for order_id in ["ORD-1001", "ORD-1002", "ORD-1003"] {
        let history = db.orders().query(&OrderFilter::new().order_id(order_id))?;
        // The latest status-bearing event wins.
        let status = history
            .iter()
            .rev()
            .find_map(|event| {
                event
                    .metadata_str("new_status")
                    .or_else(|| event.metadata_str("status"))
            })
            .unwrap_or("unknown");
        println!("   {}: {} ({} events)", order_id, status, history.len());
    }
    println!();

    // ========================================
    // 3. Filtered Queries
    // ========================================
    println!("🔍 Step 3: Filtered Queries");

    let cancelled = db.orders().query(&OrderFilter::new().action(OrderAction::Cancelled))?;
    for event in &cancelled {
        println!(
            "   Cancelled: {} (reason: {})",
            event.metadata_str("order_id").unwrap_or("-"),
            event.metadata_str("reason").unwrap_or("none"),
        );
    }

    let processing = db.orders().query(&OrderFilter::new().status(OrderStatus::Processing))?;
    println!("   Events recording a processing status: {}\n", processing.len());

    // ========================================
    // 4. Poll Engagements on the Same Ledger
    // ========================================
    println!("🗳️  Step 4: Poll Engagements");

    db.polls().record(
        Engagement::new("color-vote", "alice", EngagementKind::VoteCast)
            .with_new_choice("blue")
            .with_session_id("sess-81"),
    )?;
    db.polls().record(
        Engagement::new("color-vote", "bob", EngagementKind::VoteCast).with_new_choice("red"),
    )?;
    db.polls().record(
        Engagement::new("color-vote", "alice", EngagementKind::VoteChanged)
            .with_previous_choice("blue")
            .with_new_choice("red"),
    )?;

    let alice = db
        .polls()
        .query(&EngagementFilter::new().poll_id("color-vote").user_id("alice"))?;
    println!("   alice's engagements: {}", alice.len());
    for event in &alice {
        println!(
            "     {} -> {}",
            event.metadata_str("event_type").unwrap_or("-"),
            event.metadata_str("new_choice").unwrap_or("(none)"),
        );
    }
    println!();

    // ========================================
    // 5. One Interleaved Sequence
    // ========================================
    println!("🧵 Step 5: One Interleaved Sequence");

    let all = db.store().query(None)?;
    println!("   {} events total; last five:", all.len());
    for event in all.iter().rev().take(5).rev() {
        println!("     #{:<2} {}", event.id, event.event_type);
    }

    println!("\n✅ Done");
    Ok(())
}
