use anchor_lang::prelude::*;
use crate::{
    constants::*,
    errors::ErrorCode,
    events::{BetsOpened, PrizeCredited},
    state::{unpark_prize, Config, PrizeAccount, Round},
};

#[derive(Accounts)]
pub struct OpenBets<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CFG],
        bump = config.bump,
        constraint = config.owner == owner.key() @ ErrorCode::NotOwner,
    )]
    pub config: Account<'info, Config>,

    #[account(mut, seeds = [SEED_ROUND], bump)]
    pub round: AccountLoader<'info, Round>,

    /// Prize account of the last winner; receives a prize still parked on the config.
    #[account(
        init_if_needed,
        payer = owner,
        space = PrizeAccount::SPACE,
        seeds = [SEED_PRIZE, config.pending_winner.as_ref()],
        bump
    )]
    pub pending_prize_account: Account<'info, PrizeAccount>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<OpenBets>, closing_time: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let cfg = &mut ctx.accounts.config;
    let prize_account = &mut ctx.accounts.pending_prize_account;

    prize_account.ensure_initialized(&cfg.pending_winner, ctx.bumps.pending_prize_account)?;
    let credited = unpark_prize(cfg, prize_account)?;
    if credited > 0 {
        emit!(PrizeCredited {
            winner: prize_account.owner,
            amount: credited,
            claimable: prize_account.claimable,
        });
    }

    let mut round = ctx.accounts.round.load_mut()?;
    let round_id = round.open(now, closing_time)?;

    emit!(BetsOpened {
        round_id,
        opened_ts: now,
        closing_ts: closing_time,
    });

    Ok(())
}
