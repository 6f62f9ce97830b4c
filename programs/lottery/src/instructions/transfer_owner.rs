use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::ErrorCode,
    events::OwnerTransferred,
    state::Config,
};

#[derive(Accounts)]
pub struct TransferOwner<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CFG],
        bump = config.bump,
        constraint = config.owner == owner.key() @ ErrorCode::NotOwner,
    )]
    pub config: Account<'info, Config>,
}

pub fn handler(ctx: Context<TransferOwner>, new_owner: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;

    require!(new_owner != Pubkey::default(), ErrorCode::InvalidOwner);
    require!(new_owner != cfg.owner, ErrorCode::InvalidOwner);

    let old_owner = cfg.owner;
    cfg.owner = new_owner;

    emit!(OwnerTransferred {
        old_owner,
        new_owner,
    });

    Ok(())
}
