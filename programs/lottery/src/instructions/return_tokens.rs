use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::TokensReturned,
    state::{Config, Vault},
    utils::{checked_add_u64, checked_sub_u64, ensure_vault_covers, refund_for_tokens},
};

#[derive(Accounts)]
pub struct ReturnTokens<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        seeds = [SEED_CFG],
        bump = config.bump,
        has_one = token_mint @ ErrorCode::InvalidTokenAccount,
    )]
    pub config: Account<'info, Config>,

    #[account(mut, seeds = [SEED_VAULT], bump = vault.bump)]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = holder_token_account.mint == config.token_mint @ ErrorCode::InvalidTokenAccount,
        constraint = holder_token_account.owner == holder.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub holder_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Burns `amount` tokens and returns the lamports refunded.
pub fn handler(ctx: Context<ReturnTokens>, amount: u64) -> Result<u64> {
    let refund = refund_for_tokens(amount, ctx.accounts.config.purchase_ratio)?;
    require!(
        ctx.accounts.holder_token_account.amount >= amount,
        ErrorCode::InsufficientBalance
    );

    let vault_info = ctx.accounts.vault.to_account_info();
    let rent_floor = Rent::get()?.minimum_balance(vault_info.data_len());
    ensure_vault_covers(vault_info.lamports(), rent_floor, refund)?;

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.token_mint.to_account_info(),
                from: ctx.accounts.holder_token_account.to_account_info(),
                authority: ctx.accounts.holder.to_account_info(),
            },
        ),
        amount,
    )?;

    // Vault is program-owned, so lamports move directly (after the CPI).
    let holder_info = ctx.accounts.holder.to_account_info();
    let vault_after = checked_sub_u64(vault_info.lamports(), refund)?;
    let holder_after = checked_add_u64(holder_info.lamports(), refund)?;
    **vault_info.try_borrow_mut_lamports()? = vault_after;
    **holder_info.try_borrow_mut_lamports()? = holder_after;

    ctx.accounts.token_mint.reload()?;

    emit!(TokensReturned {
        holder: ctx.accounts.holder.key(),
        tokens_burned: amount,
        lamports_refunded: refund,
        total_supply_after: ctx.accounts.token_mint.supply,
    });

    Ok(refund)
}
