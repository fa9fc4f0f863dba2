//! Settle a group snapshot read as JSON from stdin (or a built-in sample)

use std::io::Read;

use split_core::utils::round_to_cents;
use split_core::{settle, GroupState};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"{
  "eventName": "Pizza night",
  "participants": [
    { "id": "1", "name": "Ana", "pixKey": "ana@example.com" },
    { "id": "2", "name": "Bia" },
    { "id": "3", "name": "Caio" }
  ],
  "expenses": [
    { "id": "a", "participantId": "1", "amount": 100, "description": "Pizza", "date": 0 },
    { "id": "b", "participantId": "3", "amount": 50, "description": "Soda", "date": 0 }
  ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut input = String::new();
    if std::env::args().any(|arg| arg == "-") {
        std::io::stdin().read_to_string(&mut input)?;
    } else {
        input.push_str(SAMPLE);
    }

    let state: GroupState = serde_json::from_str(&input)?;
    let settlement = settle(&state.participants, &state.expenses);

    println!("{}", state.event_name);
    for transfer in &settlement.transfers {
        println!(
            "{} pays {} {:.2}",
            transfer.from,
            transfer.to,
            round_to_cents(transfer.amount)
        );
    }
    if settlement.is_settled() {
        println!("Everyone is settled");
    }

    Ok(())
}
