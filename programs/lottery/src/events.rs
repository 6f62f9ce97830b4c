use anchor_lang::prelude::*;

#[event]
pub struct ConfigInitialized {
    pub owner: Pubkey,
    pub token_mint: Pubkey,
    pub escrow: Pubkey,
    pub bet_price: u64,
    pub bet_fee: u64,
    pub purchase_ratio: u64,
}

#[event]
pub struct OwnerTransferred {
    pub old_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
pub struct TokensPurchased {
    pub buyer: Pubkey,
    pub lamports_paid: u64,
    pub tokens_minted: u64,
    pub total_supply_after: u64,
}

#[event]
pub struct TokensReturned {
    pub holder: Pubkey,
    pub tokens_burned: u64,
    pub lamports_refunded: u64,
    pub total_supply_after: u64,
}

#[event]
pub struct SpenderApproved {
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub amount: u64,
}

#[event]
pub struct BetsOpened {
    pub round_id: u64,
    pub opened_ts: i64,
    pub closing_ts: i64,
}

#[event]
pub struct BetsPlaced {
    pub round_id: u64,
    pub bettor: Pubkey,
    pub times: u64,
    pub price_paid: u64,
    pub fee_paid: u64,
    pub bettor_tickets: u64,
    pub total_tickets_after: u64,
    pub bet_pool_after: u64,
}

#[event]
pub struct LotteryClosed {
    pub round_id: u64,
    pub closed_ts: i64,
    pub total_tickets: u64,
    /// `Pubkey::default()` when the round had no bets.
    pub winner: Pubkey,
    pub winning_ticket: u64,
    pub randomness: [u8; 32],
    pub prize: u64,
    pub owner_fee: u64,
}

#[event]
pub struct PrizeCredited {
    pub winner: Pubkey,
    pub amount: u64,
    pub claimable: u64,
}

#[event]
pub struct PrizeWithdrawn {
    pub winner: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}

#[event]
pub struct OwnerWithdrawn {
    pub owner: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}
