use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::{PrizeCredited, PrizeWithdrawn},
    state::{unpark_prize, Config, PrizeAccount},
};

#[derive(Accounts)]
pub struct PrizeWithdraw<'info> {
    #[account(mut)]
    pub winner: Signer<'info>,

    #[account(mut, seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = winner,
        space = PrizeAccount::SPACE,
        seeds = [SEED_PRIZE, winner.key().as_ref()],
        bump
    )]
    pub prize_account: Account<'info, PrizeAccount>,

    #[account(mut, address = config.escrow @ ErrorCode::InvalidEscrow)]
    pub escrow: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = winner_token_account.mint == config.token_mint @ ErrorCode::InvalidTokenAccount,
        constraint = winner_token_account.owner == winner.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub winner_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PrizeWithdraw>, amount: u64) -> Result<()> {
    let winner = ctx.accounts.winner.key();
    let prize_account = &mut ctx.accounts.prize_account;
    prize_account.ensure_initialized(&winner, ctx.bumps.prize_account)?;

    // A prize from the last round may still be parked on the config.
    let credited = unpark_prize(&mut ctx.accounts.config, prize_account)?;
    if credited > 0 {
        emit!(PrizeCredited {
            winner,
            amount: credited,
            claimable: prize_account.claimable,
        });
    }

    // Debit the claimable balance before any tokens move.
    let remaining = prize_account.debit(amount)?;

    let cfg = &ctx.accounts.config;
    let seeds = cfg.signer_seeds();
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.escrow.to_account_info(),
                to: ctx.accounts.winner_token_account.to_account_info(),
                authority: cfg.to_account_info(),
            },
            &[&seeds[..]],
        ),
        amount,
    )?;

    emit!(PrizeWithdrawn {
        winner,
        amount,
        remaining,
    });

    Ok(())
}
