//! Weekend trip example: build a group, register expenses and settle up

use split_core::utils::{round_to_cents, MemoryStorage};
use split_core::Group;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("🏕️  Split Core - Weekend Trip Example\n");

    let storage = MemoryStorage::new();
    let mut group = Group::new(storage);
    group.set_event_name("Weekend at the lake").await?;

    // 1. Who is coming
    println!("👥 Adding participants...");
    let ana = group.add_participant("Ana", Some("ana@example.com")).await?;
    let bruno = group.add_participant("Bruno", None).await?;
    let carla = group.add_participant("Carla", Some("+5511988887777")).await?;
    let davi = group.add_participant("Davi", None).await?;

    for participant in group.list_participants().await? {
        match &participant.pix_key {
            Some(key) => println!("  ✓ {} (PIX: {})", participant.name, key),
            None => println!("  ✓ {}", participant.name),
        }
    }
    println!();

    // 2. What was paid, typed the way people type it
    println!("💸 Registering expenses...");
    group.register_expense_input(&ana.id, "350,00", "Cabin").await?;
    group.register_expense_input(&carla.id, "124,90", "Groceries").await?;
    group.register_expense_input(&bruno.id, "60", "Fuel").await?;
    group.register_expense_input(&ana.id, "45.50", "").await?;

    for expense in group.list_expenses().await? {
        println!("  ✓ {:>8.2}  {}", expense.amount, expense.description);
    }
    println!();

    // 3. Balances
    let settlement = group.settle().await?;
    println!("📊 Total: {:.2}  |  Per person: {:.2}\n", settlement.total, settlement.fair_share);

    let participants = group.list_participants().await?;
    for (participant, balance) in participants.iter().zip(&settlement.balances) {
        println!(
            "  {:<6} paid {:>8.2}  balance {:>+8.2}",
            participant.name, balance.paid, balance.net
        );
    }
    println!();

    // 4. Who pays whom
    println!("🤝 Transfers:");
    for transfer in &settlement.transfers {
        let routing = transfer
            .pix_key
            .as_deref()
            .map(|key| format!(" via PIX {key}"))
            .unwrap_or_default();
        println!(
            "  {} → {}: {:.2}{}",
            transfer.from,
            transfer.to,
            round_to_cents(transfer.amount),
            routing
        );
    }

    // 5. Davi goes home early and takes his expenses with him
    group.remove_participant(&davi.id).await?;
    let after = group.settle().await?;
    println!(
        "\n🚗 Without Davi: {} transfers, {:.2} per person",
        after.transfers.len(),
        after.fair_share
    );

    Ok(())
}
