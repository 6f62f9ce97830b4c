use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::OwnerWithdrawn,
    state::Config,
};

#[derive(Accounts)]
pub struct OwnerWithdraw<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CFG],
        bump = config.bump,
        constraint = config.owner == owner.key() @ ErrorCode::NotOwner,
    )]
    pub config: Account<'info, Config>,

    #[account(mut, address = config.escrow @ ErrorCode::InvalidEscrow)]
    pub escrow: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = owner_token_account.mint == config.token_mint @ ErrorCode::InvalidTokenAccount,
        constraint = owner_token_account.owner == owner.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<OwnerWithdraw>, amount: u64) -> Result<()> {
    let remaining = ctx.accounts.config.debit_owner_pool(amount)?;

    let cfg = &ctx.accounts.config;
    let seeds = cfg.signer_seeds();
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.escrow.to_account_info(),
                to: ctx.accounts.owner_token_account.to_account_info(),
                authority: cfg.to_account_info(),
            },
            &[&seeds[..]],
        ),
        amount,
    )?;

    emit!(OwnerWithdrawn {
        owner: ctx.accounts.owner.key(),
        amount,
        remaining,
    });

    Ok(())
}
