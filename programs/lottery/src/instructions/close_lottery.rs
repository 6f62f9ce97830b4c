use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;
use crate::{
    constants::*,
    events::LotteryClosed,
    state::{settle_round, Config, Round},
    utils::{derive_draw_seed, latest_slot_hash, DrawInputs},
};

#[derive(Accounts)]
pub struct CloseLottery<'info> {
    /// Anyone can close once the closing time has passed.
    pub caller: Signer<'info>,

    #[account(mut, seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(mut, seeds = [SEED_ROUND], bump)]
    pub round: AccountLoader<'info, Round>,

    /// CHECK: address-checked SlotHashes sysvar, read as raw bytes.
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<CloseLottery>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let slot_hashes_info = ctx.accounts.slot_hashes.to_account_info();

    let mut round = ctx.accounts.round.load_mut()?;
    let cfg = &mut ctx.accounts.config;

    let settlement = settle_round(&mut round, cfg, now, |current| {
        let data = slot_hashes_info.try_borrow_data()?;
        let (slot, slot_hash) = latest_slot_hash(&data)?;
        Ok(derive_draw_seed(&DrawInputs {
            slot_hash,
            slot,
            round_id: current.round_id,
            closing_ts: current.closing_ts,
            now,
            total_tickets: current.total_tickets,
        }))
    })?;

    let event = match settlement {
        Some(s) => LotteryClosed {
            round_id: s.round_id,
            closed_ts: now,
            total_tickets: s.total_tickets,
            winner: s.winner,
            winning_ticket: s.winning_ticket,
            randomness: round.randomness,
            prize: s.prize,
            owner_fee: s.owner_fee,
        },
        None => LotteryClosed {
            round_id: round.round_id,
            closed_ts: now,
            total_tickets: 0,
            winner: Pubkey::default(),
            winning_ticket: 0,
            randomness: [0u8; 32],
            prize: 0,
            owner_fee: 0,
        },
    };

    emit!(event);

    Ok(())
}
