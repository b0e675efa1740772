//! Basic Annal Usage Example
//!
//! This example demonstrates:
//! - Creating a database
//! - Appending events with metadata
//! - Querying by type and by id
//! - Store statistics and generations
//! - Clearing the ledger
//!
//! Run with: cargo run --example basic_usage

use annal::prelude::*;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("annal=info")
        .init();

    println!("\n╔═══════════════════════════════════════╗");
    println!("║    Annal Basic Usage Example          ║");
    println!("╚═══════════════════════════════════════╝\n");

    // ========================================
    // 1. Create Database
    // ========================================
    println!("📂 Step 1: Creating Database");

    let db = AnnalDb::new();
    println!("   ✅ In-memory ledger ready (generation {})\n", db.store().stats().generation);

    // ========================================
    // 2. Append Events
    // ========================================
    println!("✍️  Step 2: Appending Events");

    let event = db.store().create(
        "user_created",
        "User alice created",
        Some(json!({ "username": "alice", "plan": "premium" })),
    )?;
    println!("   Event #{} [{}] {}", event.id, event.event_type, event.message);

    let event = db.store().create(
        "user_created",
        "User bob created",
        Some(json!({ "username": "bob", "plan": "free" })),
    )?;
    println!("   Event #{} [{}] {}", event.id, event.event_type, event.message);

    let event = db.store().create("user_deleted", "User bob deleted", None)?;
    println!("   Event #{} [{}] {}\n", event.id, event.event_type, event.message);

    // ========================================
    // 3. Query Events
    // ========================================
    println!("🔍 Step 3: Querying");

    let all = db.store().query(None)?;
    println!("   All events: {}", all.len());

    let created = db.store().query(Some("user_created"))?;
    println!("   user_created events: {}", created.len());
    for event in &created {
        println!("     #{} {} ({})", event.id, event.message, event.timestamp);
    }

    let second = db.store().get_by_id(2)?;
    println!("   Lookup by id 2: {}\n", second.message);

    // ========================================
    // 4. Prefix Filters
    // ========================================
    println!("🪣 Step 4: Prefix Filters");

    db.audit().record(
        audit_types::SUSPICIOUS_ACTIVITY,
        "Unexpected query volume",
        Some(json!({ "severity": "warning", "queries": 1402 })),
    )?;

    let user_events = db.store().query_filtered(&EventFilter::prefix("user_"))?;
    let audit_events = db.store().query_filtered(&EventFilter::prefix("audit."))?;
    println!("   user_* events: {}", user_events.len());
    println!("   audit.* events: {}\n", audit_events.len());

    // ========================================
    // 5. Statistics
    // ========================================
    println!("📊 Step 5: Statistics");

    let stats = db.store().stats();
    println!("   Events held:   {}", stats.event_count);
    println!("   Next event id: {}", stats.next_event_id);
    println!("   Generation:    {}\n", stats.generation);

    // ========================================
    // 6. Clear
    // ========================================
    println!("🧹 Step 6: Clearing the Ledger");

    let removed = db.store().clear_all()?;
    let stats = db.store().stats();
    println!("   Removed {} events", removed);
    println!("   Generation is now {}, ids restart at {}", stats.generation, stats.next_event_id);

    let event = db.store().create("user_created", "User carol created", None)?;
    println!("   First event of the new generation has id {}\n", event.id);

    println!("✅ Done");
    Ok(())
}
