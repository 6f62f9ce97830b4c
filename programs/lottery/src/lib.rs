use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod state;
pub mod utils;
pub mod instructions;

use instructions::*;

declare_id!("ATTExeUmb9K9ZsYrMhbbkJJzRPpTJk6zZa9Q2w3xLW7e");

#[program]
pub mod lottery {
    use super::*;

    pub fn init_config(ctx: Context<InitConfig>, args: InitConfigArgs) -> Result<()> {
        init_config::handler(ctx, args)
    }

    pub fn transfer_owner(ctx: Context<TransferOwner>, new_owner: Pubkey) -> Result<()> {
        transfer_owner::handler(ctx, new_owner)
    }

    /// Mint tokens for `value` lamports at the configured ratio.
    pub fn purchase_tokens(ctx: Context<PurchaseTokens>, value: u64) -> Result<u64> {
        purchase_tokens::handler(ctx, value)
    }

    /// Burn tokens and get the lamports back.
    pub fn return_tokens(ctx: Context<ReturnTokens>, amount: u64) -> Result<u64> {
        return_tokens::handler(ctx, amount)
    }

    pub fn approve(ctx: Context<Approve>, amount: u64) -> Result<bool> {
        approve::handler(ctx, amount)
    }

    /// Owner-only: start a round that takes bets until `closing_time`.
    pub fn open_bets(ctx: Context<OpenBets>, closing_time: i64) -> Result<()> {
        open_bets::handler(ctx, closing_time)
    }

    pub fn bet_many(ctx: Context<BetMany>, times: u64) -> Result<()> {
        bet_many::handler(ctx, times)
    }

    /// Anyone can close once the closing time is reached; settles the round.
    pub fn close_lottery(ctx: Context<CloseLottery>) -> Result<()> {
        close_lottery::handler(ctx)
    }

    pub fn prize_withdraw(ctx: Context<PrizeWithdraw>, amount: u64) -> Result<()> {
        prize_withdraw::handler(ctx, amount)
    }

    pub fn owner_withdraw(ctx: Context<OwnerWithdraw>, amount: u64) -> Result<()> {
        owner_withdraw::handler(ctx, amount)
    }

    pub fn bets_open(ctx: Context<ReadLottery>) -> Result<bool> {
        views::bets_open(ctx)
    }

    pub fn bets_closing_time(ctx: Context<ReadLottery>) -> Result<i64> {
        views::bets_closing_time(ctx)
    }

    pub fn bets_of(ctx: Context<ReadLottery>, account: Pubkey) -> Result<u64> {
        views::bets_of(ctx, account)
    }

    pub fn prize_pool(ctx: Context<ReadLottery>) -> Result<u64> {
        views::prize_pool(ctx)
    }

    pub fn prize(ctx: Context<ReadPrize>, account: Pubkey) -> Result<u64> {
        views::prize(ctx, account)
    }

    pub fn owner_pool(ctx: Context<ReadLottery>) -> Result<u64> {
        views::owner_pool(ctx)
    }

    pub fn balance_of(ctx: Context<ReadBalance>) -> Result<u64> {
        views::balance_of(ctx)
    }

    pub fn total_supply(ctx: Context<ReadSupply>) -> Result<u64> {
        views::total_supply(ctx)
    }

    pub fn token_name(ctx: Context<ReadSupply>) -> Result<String> {
        views::token_name(ctx)
    }
}
