use anchor_lang::prelude::*;
use anchor_spl::token::{self, Approve as TokenApprove, Token, TokenAccount};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::SpenderApproved,
    state::Config,
};

#[derive(Accounts)]
pub struct Approve<'info> {
    pub owner: Signer<'info>,

    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        constraint = owner_token_account.mint == config.token_mint @ ErrorCode::InvalidTokenAccount,
        constraint = owner_token_account.owner == owner.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    /// CHECK: any address may be approved; pass the config PDA to let the lottery take bets.
    pub spender: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

/// Sets the spender's allowance to exactly `amount` (not additive).
pub fn handler(ctx: Context<Approve>, amount: u64) -> Result<bool> {
    token::approve(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TokenApprove {
                to: ctx.accounts.owner_token_account.to_account_info(),
                delegate: ctx.accounts.spender.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(SpenderApproved {
        owner: ctx.accounts.owner.key(),
        spender: ctx.accounts.spender.key(),
        amount,
    });

    Ok(true)
}
