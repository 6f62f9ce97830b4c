//! Read-only instructions. Values come back through return data, so clients
//! read them by simulating the transaction.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};
use crate::{
    constants::*,
    errors::ErrorCode,
    utils::checked_add_u64,
    state::{Config, PrizeAccount, Round},
};

#[derive(Accounts)]
pub struct ReadLottery<'info> {
    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(seeds = [SEED_ROUND], bump)]
    pub round: AccountLoader<'info, Round>,
}

#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct ReadPrize<'info> {
    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    /// Absent until the account first receives or withdraws a prize.
    #[account(seeds = [SEED_PRIZE, account.as_ref()], bump)]
    pub prize_account: Option<Account<'info, PrizeAccount>>,
}

#[derive(Accounts)]
pub struct ReadBalance<'info> {
    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        constraint = token_account.mint == config.token_mint @ ErrorCode::InvalidTokenAccount,
    )]
    pub token_account: Account<'info, TokenAccount>,
}

#[derive(Accounts)]
pub struct ReadSupply<'info> {
    #[account(
        seeds = [SEED_CFG],
        bump = config.bump,
        has_one = token_mint @ ErrorCode::InvalidTokenAccount,
    )]
    pub config: Account<'info, Config>,

    pub token_mint: Account<'info, Mint>,
}

/// Time-aware: a round past its closing time reads as closed even before
/// `close_lottery` runs.
pub fn bets_open(ctx: Context<ReadLottery>) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.round.load()?.is_open(now))
}

pub fn bets_closing_time(ctx: Context<ReadLottery>) -> Result<i64> {
    Ok(ctx.accounts.round.load()?.closing_ts)
}

pub fn bets_of(ctx: Context<ReadLottery>, account: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.round.load()?.bets_of(&account))
}

/// Tokens the current round will pay its winner.
pub fn prize_pool(ctx: Context<ReadLottery>) -> Result<u64> {
    Ok(ctx.accounts.round.load()?.bet_pool)
}

/// Credited balance plus any prize still parked on the config.
pub fn prize(ctx: Context<ReadPrize>, account: Pubkey) -> Result<u64> {
    let credited = ctx
        .accounts
        .prize_account
        .as_ref()
        .map_or(0, |p| p.claimable);
    checked_add_u64(credited, ctx.accounts.config.pending_prize_of(&account))
}

pub fn owner_pool(ctx: Context<ReadLottery>) -> Result<u64> {
    Ok(ctx.accounts.config.owner_pool)
}

pub fn balance_of(ctx: Context<ReadBalance>) -> Result<u64> {
    Ok(ctx.accounts.token_account.amount)
}

pub fn token_name(_ctx: Context<ReadSupply>) -> Result<String> {
    Ok(TOKEN_NAME.to_string())
}

pub fn total_supply(ctx: Context<ReadSupply>) -> Result<u64> {
    Ok(ctx.accounts.token_mint.supply)
}
