//! Login Audit Example
//!
//! This example demonstrates:
//! - Credential logins and the audit events they leave behind
//! - Vague caller-facing errors vs precise audit reasons
//! - Suspicious-activity records for hostile input
//! - Guest identities
//! - Reviewing the trail with filters and time ranges
//!
//! Run with: cargo run --example login_audit

use annal::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("annal=info")
        .init();

    println!("\n╔═══════════════════════════════════════╗");
    println!("║     Annal Login Audit Example         ║");
    println!("╚═══════════════════════════════════════╝\n");

    let db = AnnalDb::new();

    // ========================================
    // 1. Successful Login
    // ========================================
    println!("🔑 Step 1: Successful Login");

    let identity = db.auth().login("admin", "admin123")?;
    println!("   ✅ {} logged in with role {}\n", identity.username, identity.role);

    // ========================================
    // 2. Failed Logins
    // ========================================
    println!("🚫 Step 2: Failed Logins");

    for (username, password) in [("admin", "wrong"), ("mallory", "guess1"), ("", "pw")] {
        match db.auth().login(username, password) {
            Ok(_) => println!("   Unexpected success for {:?}", username),
            Err(err) => println!("   login({:?}, ...) -> {}", username, err),
        }
    }
    println!();

    // ========================================
    // 3. Hostile Input
    // ========================================
    println!("⚠️  Step 3: Hostile Input");

    let err = db.auth().login("admin'; DROP TABLE users;--", "pw").unwrap_err();
    println!("   Injection attempt -> {}", err);

    let err = db.auth().login(&"A".repeat(300), "pw").unwrap_err();
    println!("   300-byte username -> {}\n", err);

    // ========================================
    // 4. Guest Login
    // ========================================
    println!("👤 Step 4: Guest Login");

    let guest = db.auth().guest_login()?;
    println!("   Guest identity: {} (role {})\n", guest.username, guest.role);

    // ========================================
    // 5. Reviewing the Trail
    // ========================================
    println!("📜 Step 5: Reviewing the Trail");

    let trail = db.audit().query(None)?;
    println!("   {} audit events recorded:", trail.len());
    for event in &trail {
        let reason = event.metadata_str("reason").unwrap_or("-");
        println!(
            "     #{:<2} {:<26} reason={:<20} severity={}",
            event.id,
            event.event_type,
            reason,
            event.metadata_str("severity").unwrap_or("-"),
        );
    }
    println!();

    let failures = db.audit().count(Some(audit_types::LOGIN_FAILURE))?;
    let suspicious = db.audit().count(Some(audit_types::SUSPICIOUS_ACTIVITY))?;
    println!("   Failures:   {}", failures);
    println!("   Suspicious: {}\n", suspicious);

    // ========================================
    // 6. Time Range Query
    // ========================================
    println!("⏱️  Step 6: Time Range Query");

    let first = &trail[0];
    let last = &trail[trail.len() - 1];
    let window = db.audit().query_time_range(&first.timestamp, &last.timestamp)?;
    println!(
        "   {} events between {} and {}\n",
        window.events.len(),
        window.range.start,
        window.range.end
    );

    println!("✅ Done");
    Ok(())
}
