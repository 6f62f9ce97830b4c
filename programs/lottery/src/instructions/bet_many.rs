use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::BetsPlaced,
    state::{Config, Round},
    utils::{bet_cost, delegated_allowance, ensure_spendable},
};

#[derive(Accounts)]
pub struct BetMany<'info> {
    pub bettor: Signer<'info>,

    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(mut, seeds = [SEED_ROUND], bump)]
    pub round: AccountLoader<'info, Round>,

    #[account(
        mut,
        constraint = bettor_token_account.mint == config.token_mint @ ErrorCode::InvalidTokenAccount,
        constraint = bettor_token_account.owner == bettor.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub bettor_token_account: Account<'info, TokenAccount>,

    #[account(mut, address = config.escrow @ ErrorCode::InvalidEscrow)]
    pub escrow: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<BetMany>, times: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let bettor = ctx.accounts.bettor.key();
    let now = Clock::get()?.unix_timestamp;

    let mut round = ctx.accounts.round.load_mut()?;
    round.ensure_accepting_bets(now)?;

    let cost = bet_cost(times, cfg.bet_price, cfg.bet_fee)?;

    // The config PDA spends on the bettor's behalf, so it must be the delegate.
    let source = &ctx.accounts.bettor_token_account;
    let allowance = delegated_allowance(source.delegate, source.delegated_amount, &cfg.key());
    ensure_spendable(source.amount, allowance, cost.total)?;

    let bettor_tickets = round.record_bets(&bettor, times, &cost)?;

    let round_id = round.round_id;
    let total_tickets_after = round.total_tickets;
    let bet_pool_after = round.bet_pool;

    // Drop RefMut before CPI
    drop(round);

    let seeds = cfg.signer_seeds();
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.bettor_token_account.to_account_info(),
                to: ctx.accounts.escrow.to_account_info(),
                authority: cfg.to_account_info(),
            },
            &[&seeds[..]],
        ),
        cost.total,
    )?;

    emit!(BetsPlaced {
        round_id,
        bettor,
        times,
        price_paid: cost.price,
        fee_paid: cost.fee,
        bettor_tickets,
        total_tickets_after,
        bet_pool_after,
    });

    Ok(())
}
