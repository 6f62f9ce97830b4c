use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};
use crate::constants::{MAX_BETTORS, SEED_CFG};
use crate::errors::ErrorCode;
use crate::utils::{
    bit_add, bit_find_prefix, bit_prefix_sum, checked_add_u64, checked_sub_u64, winning_ticket,
    BetCost,
};

/// Wrapper for the bettor key array; bytemuck doesn't impl Pod for arbitrary array sizes.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct ParticipantsArray {
    pub data: [[u8; 32]; MAX_BETTORS],
}

unsafe impl Pod for ParticipantsArray {}
unsafe impl Zeroable for ParticipantsArray {}

/// Fenwick tree of per-bettor ticket counts, 1-indexed.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct FenwickTree {
    pub data: [u64; MAX_BETTORS + 1],
}

unsafe impl Pod for FenwickTree {}
unsafe impl Zeroable for FenwickTree {}

/// IDL description for the fixed-size array wrappers above.
#[cfg(feature = "idl-build")]
macro_rules! idl_array_wrapper {
    ($name:ident, $item:expr, $len:expr) => {
        impl anchor_lang::IdlBuild for $name {
            fn create_type() -> Option<anchor_lang::idl::types::IdlTypeDef> {
                use anchor_lang::idl::types::*;
                Some(IdlTypeDef {
                    name: stringify!($name).to_string(),
                    docs: vec![],
                    serialization: IdlSerialization::Bytemuck,
                    repr: Some(IdlRepr::C(IdlReprModifier { packed: false, align: None })),
                    generics: vec![],
                    ty: IdlTypeDefTy::Struct {
                        fields: Some(IdlDefinedFields::Named(vec![IdlField {
                            name: "data".to_string(),
                            docs: vec![],
                            ty: IdlType::Array(Box::new($item), IdlArrayLen::Value($len)),
                        }])),
                    },
                })
            }
            fn insert_types(
                types: &mut std::collections::BTreeMap<String, anchor_lang::idl::types::IdlTypeDef>,
            ) {
                if let Some(ty) = Self::create_type() {
                    types.insert(stringify!($name).to_string(), ty);
                }
            }
            fn get_full_path() -> String {
                stringify!($name).to_string()
            }
        }
    };
}

#[cfg(feature = "idl-build")]
idl_array_wrapper!(
    ParticipantsArray,
    anchor_lang::idl::types::IdlType::Array(
        Box::new(anchor_lang::idl::types::IdlType::U8),
        anchor_lang::idl::types::IdlArrayLen::Value(32)
    ),
    MAX_BETTORS
);
#[cfg(feature = "idl-build")]
idl_array_wrapper!(FenwickTree, anchor_lang::idl::types::IdlType::U64, MAX_BETTORS + 1);

#[repr(u8)]
pub enum RoundStatus {
    Closed = 0,
    Open = 1,
}

#[account]
pub struct Config {
    /// Operator: opens rounds and withdraws the owner pool.
    pub owner: Pubkey,
    pub token_mint: Pubkey,
    /// Token account (owned by this config PDA) holding every token committed by bets.
    pub escrow: Pubkey,
    pub bet_price: u64,
    pub bet_fee: u64,
    /// Lamports per token base unit.
    pub purchase_ratio: u64,
    /// Fees settled so far and not yet withdrawn by the owner.
    pub owner_pool: u64,
    /// Winner of the last settled round. Their prize waits in `pending_prize`
    /// until it is moved into their `PrizeAccount`.
    pub pending_winner: Pubkey,
    pub pending_prize: u64,
    pub bump: u8,
    pub mint_bump: u8,
    pub vault_bump: u8,
    pub reserved: [u8; 29],
}

impl Config {
    pub const SPACE: usize = 8
        + 32 + 32 + 32
        + 8 + 8 + 8
        + 8
        + 32 + 8
        + 1 + 1 + 1
        + 29;

    /// PDA signer seeds; the config is mint authority, escrow owner and bet spender.
    pub fn signer_seeds(&self) -> [&[u8]; 2] {
        [SEED_CFG, core::slice::from_ref(&self.bump)]
    }

    pub fn ensure_owner(&self, key: &Pubkey) -> Result<()> {
        require_keys_eq!(*key, self.owner, ErrorCode::NotOwner);
        Ok(())
    }

    pub fn credit_owner_pool(&mut self, amount: u64) -> Result<u64> {
        self.owner_pool = checked_add_u64(self.owner_pool, amount)?;
        Ok(self.owner_pool)
    }

    /// Returns what is left in the pool.
    pub fn debit_owner_pool(&mut self, amount: u64) -> Result<u64> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        require!(self.owner_pool >= amount, ErrorCode::InsufficientOwnerBalance);
        self.owner_pool = checked_sub_u64(self.owner_pool, amount)?;
        Ok(self.owner_pool)
    }

    /// Holds a freshly drawn prize until the winner's prize account is credited.
    /// A parked prize for someone else must have been moved out first.
    pub fn park_prize(&mut self, winner: &Pubkey, amount: u64) -> Result<()> {
        if self.pending_prize > 0 {
            require_keys_eq!(self.pending_winner, *winner, ErrorCode::PrizePending);
        }
        self.pending_winner = *winner;
        self.pending_prize = checked_add_u64(self.pending_prize, amount)?;
        Ok(())
    }

    /// Prize parked for `account`, zero for anyone else.
    pub fn pending_prize_of(&self, account: &Pubkey) -> u64 {
        if self.pending_winner == *account {
            self.pending_prize
        } else {
            0
        }
    }

    /// Clears the parked prize and returns it. `pending_winner` is kept so the
    /// next unpark targets an account that already exists.
    pub fn take_pending_prize(&mut self) -> u64 {
        core::mem::take(&mut self.pending_prize)
    }
}

/// Claimable prize of one account, `[SEED_PRIZE, owner]`.
#[account]
#[derive(Default)]
pub struct PrizeAccount {
    pub owner: Pubkey,
    pub claimable: u64,
    pub bump: u8,
    pub reserved: [u8; 15],
}

impl PrizeAccount {
    pub const SPACE: usize = 8 + 32 + 8 + 1 + 15;

    /// Sets owner and bump on an account created by `init_if_needed`.
    pub fn ensure_initialized(&mut self, owner: &Pubkey, bump: u8) -> Result<()> {
        if self.owner == Pubkey::default() {
            self.owner = *owner;
            self.bump = bump;
        }
        require_keys_eq!(self.owner, *owner, ErrorCode::InvalidOwner);
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) -> Result<u64> {
        self.claimable = checked_add_u64(self.claimable, amount)?;
        Ok(self.claimable)
    }

    /// Returns what is left to claim.
    pub fn debit(&mut self, amount: u64) -> Result<u64> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        require!(self.claimable >= amount, ErrorCode::InsufficientPrizeBalance);
        self.claimable = checked_sub_u64(self.claimable, amount)?;
        Ok(self.claimable)
    }
}

/// Moves the parked prize into `prize_account` when it belongs to its owner.
/// Returns the amount moved.
pub fn unpark_prize(config: &mut Config, prize_account: &mut PrizeAccount) -> Result<u64> {
    if config.pending_prize == 0 || config.pending_winner != prize_account.owner {
        return Ok(0);
    }
    let amount = config.take_pending_prize();
    prize_account.credit(amount)?;
    Ok(amount)
}

/// Program-owned lamport reserve backing the token supply.
#[account]
#[derive(Default)]
pub struct Vault {
    pub bump: u8,
    pub reserved: [u8; 15],
}

impl Vault {
    pub const SPACE: usize = 8 + 1 + 15;
}

/// The current round. A single account is reused for every round.
#[account(zero_copy)]
#[repr(C)]
pub struct Round {
    pub round_id: u64,
    pub status: u8,
    pub bump: u8,
    pub _padding: [u8; 6],

    pub opened_ts: i64,
    pub closing_ts: i64,

    /// Bet prices collected this round; becomes the prize.
    pub bet_pool: u64,
    /// Bet fees collected this round; moves to the owner pool on settlement.
    pub fee_pool: u64,
    pub total_tickets: u64,
    pub participants_count: u16,
    pub _padding2: [u8; 6],

    // Last settlement, kept for audit.
    pub randomness: [u8; 32],
    pub winning_ticket: u64,
    pub winner: [u8; 32],
    pub last_prize: u64,

    pub participants: ParticipantsArray,
    pub bit: FenwickTree,

    pub reserved: [u8; 32],
}

/// Outcome of a round that had at least one bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub round_id: u64,
    pub winner: Pubkey,
    pub winning_ticket: u64,
    pub total_tickets: u64,
    pub prize: u64,
    pub owner_fee: u64,
}

impl Round {
    pub const SPACE: usize = 8 + core::mem::size_of::<Round>();

    pub fn winner_pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.winner)
    }

    pub fn is_open_phase(&self) -> bool {
        self.status == RoundStatus::Open as u8
    }

    /// Open for bets: the phase flag alone can be stale once the closing time passes.
    pub fn is_open(&self, now: i64) -> bool {
        self.is_open_phase() && now < self.closing_ts
    }

    /// Starts the next round. Returns its id.
    pub fn open(&mut self, now: i64, closing_ts: i64) -> Result<u64> {
        require!(!self.is_open_phase(), ErrorCode::AlreadyOpen);
        require!(closing_ts > now, ErrorCode::InvalidClosingTime);

        self.round_id = checked_add_u64(self.round_id, 1)?;
        self.status = RoundStatus::Open as u8;
        self.opened_ts = now;
        self.closing_ts = closing_ts;
        self.reset_registry();
        Ok(self.round_id)
    }

    pub fn ensure_accepting_bets(&self, now: i64) -> Result<()> {
        require!(self.is_open(now), ErrorCode::LotteryNotOpen);
        Ok(())
    }

    fn bettor_index(&self, bettor: &[u8; 32]) -> Option<usize> {
        self.participants.data[..self.participants_count as usize]
            .iter()
            .position(|p| p == bettor)
    }

    /// Tickets held by `bettor` in the current round.
    pub fn bets_of(&self, bettor: &Pubkey) -> u64 {
        match self.bettor_index(&bettor.to_bytes()) {
            Some(i) => {
                bit_prefix_sum(&self.bit.data, i + 1) - bit_prefix_sum(&self.bit.data, i)
            }
            None => 0,
        }
    }

    /// Adds `times` tickets for `bettor` and books the price and fee.
    /// Returns the bettor's ticket count after the update.
    pub fn record_bets(&mut self, bettor: &Pubkey, times: u64, cost: &BetCost) -> Result<u64> {
        let key = bettor.to_bytes();
        let index = match self.bettor_index(&key) {
            Some(i) => i,
            None => {
                let next = self.participants_count as usize;
                require!(next < MAX_BETTORS, ErrorCode::MaxBettorsReached);
                self.participants.data[next] = key;
                self.participants_count += 1;
                next
            }
        };

        bit_add(&mut self.bit.data, index + 1, times)?;
        self.total_tickets = checked_add_u64(self.total_tickets, times)?;
        self.bet_pool = checked_add_u64(self.bet_pool, cost.price)?;
        self.fee_pool = checked_add_u64(self.fee_pool, cost.fee)?;

        Ok(self.bets_of(bettor))
    }

    pub fn close(&mut self, now: i64) -> Result<()> {
        require!(self.is_open_phase(), ErrorCode::NotOpen);
        require!(now >= self.closing_ts, ErrorCode::TooEarly);
        self.status = RoundStatus::Closed as u8;
        Ok(())
    }

    /// Picks the winner for `seed` and records the draw. Pools are left untouched.
    pub fn draw_winner(&mut self, seed: [u8; 32]) -> Result<Settlement> {
        let ticket = winning_ticket(&seed, self.total_tickets)?;
        let winner_idx = bit_find_prefix(&self.bit.data, ticket)?;
        require!(
            winner_idx >= 1 && winner_idx <= self.participants_count as usize,
            ErrorCode::MathOverflow
        );

        self.randomness = seed;
        self.winning_ticket = ticket;
        self.winner = self.participants.data[winner_idx - 1];
        self.last_prize = self.bet_pool;

        Ok(Settlement {
            round_id: self.round_id,
            winner: self.winner_pubkey(),
            winning_ticket: ticket,
            total_tickets: self.total_tickets,
            prize: self.bet_pool,
            owner_fee: self.fee_pool,
        })
    }

    pub fn reset_registry(&mut self) {
        let used = self.participants_count as usize;
        self.participants.data[..used].fill([0u8; 32]);
        self.bit.data.fill(0);
        self.participants_count = 0;
        self.total_tickets = 0;
        self.bet_pool = 0;
        self.fee_pool = 0;
    }
}

/// Closes the round at `now` and settles it exactly once.
///
/// `draw_seed` is only consulted when the round has bets. On success the fee
/// pool has moved to `config.owner_pool`, the prize is parked for the winner,
/// and the registry is empty.
pub fn settle_round<F>(
    round: &mut Round,
    config: &mut Config,
    now: i64,
    draw_seed: F,
) -> Result<Option<Settlement>>
where
    F: FnOnce(&Round) -> Result<[u8; 32]>,
{
    round.close(now)?;

    if round.total_tickets == 0 {
        round.reset_registry();
        return Ok(None);
    }

    let seed = draw_seed(round)?;
    let settlement = round.draw_winner(seed)?;

    config.credit_owner_pool(settlement.owner_fee)?;
    config.park_prize(&settlement.winner, settlement.prize)?;
    round.reset_registry();

    Ok(Some(settlement))
}
