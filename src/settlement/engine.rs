//! Fair-share balances and greedy debt settlement

use tracing::{debug, trace};

use crate::types::*;

/// Balances within this distance of zero are considered settled
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// Outstanding amount of one participant during matching
struct Position<'a> {
    participant: &'a Participant,
    remaining: f64,
}

/// Sum of all expense amounts
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Amount each participant should cover, or zero for an empty group
pub fn fair_share(participants: &[Participant], expenses: &[Expense]) -> f64 {
    if participants.is_empty() {
        0.0
    } else {
        total_amount(expenses) / participants.len() as f64
    }
}

/// Net balance of every participant, in participant order.
///
/// Expenses paid by an id that is not in `participants` still count toward
/// the fair share but are credited to nobody.
pub fn compute_balances(participants: &[Participant], expenses: &[Expense]) -> Vec<Balance> {
    let share = fair_share(participants, expenses);

    participants
        .iter()
        .map(|participant| {
            let paid: f64 = expenses
                .iter()
                .filter(|e| e.is_paid_by(&participant.id))
                .map(|e| e.amount)
                .sum();
            Balance {
                participant_id: participant.id.clone(),
                paid,
                net: paid - share,
            }
        })
        .collect()
}

/// Compute balances and the transfers that settle them.
///
/// Debtors and creditors are matched largest first with two cursors; a
/// cursor moves on once its participant is within [`SETTLEMENT_EPSILON`]
/// of zero. Groups with fewer than two participants never produce
/// transfers.
pub fn settle(participants: &[Participant], expenses: &[Expense]) -> Settlement {
    let total = total_amount(expenses);
    let share = fair_share(participants, expenses);
    let balances = compute_balances(participants, expenses);

    debug!(
        participants = participants.len(),
        expenses = expenses.len(),
        total,
        fair_share = share,
        "computing settlement"
    );

    let transfers = if participants.len() < 2 {
        Vec::new()
    } else {
        match_transfers(participants, &balances)
    };

    debug!(transfers = transfers.len(), "settlement computed");

    Settlement {
        total,
        fair_share: share,
        balances,
        transfers,
    }
}

fn match_transfers(participants: &[Participant], balances: &[Balance]) -> Vec<Transfer> {
    let mut debtors: Vec<(&Participant, f64)> = Vec::new();
    let mut creditors: Vec<(&Participant, f64)> = Vec::new();

    for (participant, balance) in participants.iter().zip(balances) {
        if balance.net < -SETTLEMENT_EPSILON {
            debtors.push((participant, balance.net));
        } else if balance.net > SETTLEMENT_EPSILON {
            creditors.push((participant, balance.net));
        } else {
            trace!(participant = %participant.name, net = balance.net, "already settled");
        }
    }

    // Most negative first for debtors, most positive first for creditors
    debtors.sort_by(|a, b| a.1.total_cmp(&b.1));
    creditors.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut debtors: Vec<Position> = debtors
        .into_iter()
        .map(|(participant, net)| Position {
            participant,
            remaining: net.abs(),
        })
        .collect();
    let mut creditors: Vec<Position> = creditors
        .into_iter()
        .map(|(participant, net)| Position {
            participant,
            remaining: net,
        })
        .collect();

    let mut transfers = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];
        let amount = debtor.remaining.min(creditor.remaining);

        trace!(
            from = %debtor.participant.name,
            to = %creditor.participant.name,
            amount,
            "transfer"
        );
        transfers.push(Transfer {
            from: debtor.participant.name.clone(),
            to: creditor.participant.name.clone(),
            amount,
            pix_key: creditor.participant.pix_key.clone(),
            from_id: debtor.participant.id.clone(),
            to_id: creditor.participant.id.clone(),
        });

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        // A NaN remainder (inf - inf after overflow) counts as exhausted
        if debtor.remaining.is_nan() || debtor.remaining < SETTLEMENT_EPSILON {
            i += 1;
        }
        if creditor.remaining.is_nan() || creditor.remaining < SETTLEMENT_EPSILON {
            j += 1;
        }
    }

    transfers
}
