//! Plain-text rendering of a wallet score card

use onchain_score::{ScoreCalculator, WalletScore};

/// Group digits in thousands, e.g. `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

pub fn render(score: &WalletScore) -> String {
    let m = &score.metrics;
    let total = score.score.total;

    let breakdown: String = score
        .score
        .breakdown
        .iter()
        .map(|term| {
            format!(
                "  {:<13} {:.2} / {:.1}  {}\n",
                term.name, term.score, term.max_score, term.reason
            )
        })
        .collect();

    format!(
        "ON-CHAIN SCORE  {total}  ({rating})\n\n\
         Transactions          {txns}\n\
         NFTs Owned            {nfts}\n\
         Bridged Volume        {bridged:.2} ETH\n\
         Transacted Volume     {volume:.2} ETH\n\
         Contracts Interacted  {contracts}\n\
         Wallet Age            {age:.1} years\n\n\
         {breakdown}\n\
         Address: {address}",
        rating = ScoreCalculator::get_rating(total),
        txns = group_thousands(m.txn_count),
        nfts = m.nft_count,
        bridged = m.bridged_volume,
        volume = m.total_volume,
        contracts = m.unique_counterparty_count,
        age = m.wallet_age_years(),
        address = m.address,
    )
}
