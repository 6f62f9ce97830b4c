use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer as SystemTransfer};
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::TokensPurchased,
    state::{Config, Vault},
    utils::{checked_mul_u64, tokens_for_payment},
};

#[derive(Accounts)]
pub struct PurchaseTokens<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

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
        init_if_needed,
        payer = buyer,
        associated_token::mint = token_mint,
        associated_token::authority = buyer,
    )]
    pub buyer_token_account: Account<'info, TokenAccount>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Returns the number of token base units minted.
pub fn handler(ctx: Context<PurchaseTokens>, value: u64) -> Result<u64> {
    let cfg = &ctx.accounts.config;

    let minted = tokens_for_payment(value, cfg.purchase_ratio)?;
    // the truncated remainder stays with the buyer
    let lamports_paid = checked_mul_u64(minted, cfg.purchase_ratio)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            SystemTransfer {
                from: ctx.accounts.buyer.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        lamports_paid,
    )?;

    let seeds = cfg.signer_seeds();
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.token_mint.to_account_info(),
                to: ctx.accounts.buyer_token_account.to_account_info(),
                authority: cfg.to_account_info(),
            },
            &[&seeds[..]],
        ),
        minted,
    )?;

    ctx.accounts.token_mint.reload()?;

    emit!(TokensPurchased {
        buyer: ctx.accounts.buyer.key(),
        lamports_paid,
        tokens_minted: minted,
        total_supply_after: ctx.accounts.token_mint.supply,
    });

    Ok(minted)
}
